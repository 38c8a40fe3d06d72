use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// A palettized frame ready for encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// At most 256 RGB entries.
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// Display time of this frame.
    pub delay_ms: u32,
}

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames the export will push.
    pub frame_count: u64,
    /// Per-frame delay.
    pub delay_ms: u32,
}

/// Consumer of exported frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices, between one
/// `begin` and one `end`.
pub trait AnimationSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> GlyphfxResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &IndexedFrame) -> GlyphfxResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> GlyphfxResult<()>;
}

/// Reject indices that do not strictly increase.
pub(crate) fn check_order(last: &mut Option<u64>, idx: u64) -> GlyphfxResult<()> {
    if let Some(prev) = *last
        && idx <= prev
    {
        return Err(GlyphfxError::encode(format!(
            "frame {idx} pushed after frame {prev}"
        )));
    }
    *last = Some(idx);
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    last: Option<u64>,
    ended: bool,
    pub(crate) frames: Vec<(u64, IndexedFrame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, IndexedFrame)] {
        &self.frames
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GlyphfxResult<()> {
        self.cfg = Some(cfg);
        self.last = None;
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &IndexedFrame) -> GlyphfxResult<()> {
        check_order(&mut self.last, idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GlyphfxResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
