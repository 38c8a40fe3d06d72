use std::borrow::Cow;

use crate::encode::sink::{AnimationSink, IndexedFrame, SinkConfig, check_order};
use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// GIF delays are in hundredths of a second.
pub fn delay_centis(delay_ms: u32) -> u16 {
    let cs = (f64::from(delay_ms) / 10.0).round();
    cs.clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Sink producing an infinitely looping GIF89a in memory, one local palette per frame.
#[derive(Default)]
pub struct GifSink {
    encoder: Option<::gif::Encoder<Vec<u8>>>,
    cfg: Option<SinkConfig>,
    last: Option<u64>,
    bytes: Option<Vec<u8>>,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("cfg", &self.cfg)
            .field("last", &self.last)
            .field("finished", &self.bytes.is_some())
            .finish()
    }
}

impl GifSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded stream. Fails unless `end` completed.
    pub fn into_bytes(self) -> GlyphfxResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| GlyphfxError::encode("gif stream was not finished"))
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> GlyphfxResult<()> {
        let w = u16::try_from(cfg.width)
            .map_err(|_| GlyphfxError::encode(format!("gif width {} too large", cfg.width)))?;
        let h = u16::try_from(cfg.height)
            .map_err(|_| GlyphfxError::encode(format!("gif height {} too large", cfg.height)))?;
        let mut encoder = ::gif::Encoder::new(Vec::new(), w, h, &[])
            .map_err(|e| GlyphfxError::encode(format!("gif header: {e}")))?;
        encoder
            .set_repeat(::gif::Repeat::Infinite)
            .map_err(|e| GlyphfxError::encode(format!("gif loop extension: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last = None;
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &IndexedFrame) -> GlyphfxResult<()> {
        let (Some(encoder), Some(cfg)) = (self.encoder.as_mut(), self.cfg) else {
            return Err(GlyphfxError::encode("push_frame called before begin"));
        };
        check_order(&mut self.last, idx)?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(GlyphfxError::encode(format!(
                "frame {idx} is {}x{}, stream is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.palette.is_empty() || frame.palette.len() > 256 {
            return Err(GlyphfxError::encode(format!(
                "frame {idx} palette has {} entries",
                frame.palette.len()
            )));
        }

        let out = ::gif::Frame {
            width: cfg.width as u16,
            height: cfg.height as u16,
            delay: delay_centis(frame.delay_ms),
            palette: Some(frame.palette.iter().flatten().copied().collect()),
            buffer: Cow::Borrowed(&frame.indices),
            ..::gif::Frame::default()
        };
        encoder
            .write_frame(&out)
            .map_err(|e| GlyphfxError::encode(format!("gif frame {idx}: {e}")))
    }

    fn end(&mut self) -> GlyphfxResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| GlyphfxError::encode("end called before begin"))?;
        let bytes = encoder
            .into_inner()
            .map_err(|e| GlyphfxError::encode(format!("gif trailer: {e}")))?;
        self.bytes = Some(bytes);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
