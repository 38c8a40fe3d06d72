use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::animation::anim::{EffectAnimations, resolve_effects};
use crate::effects::model::Effect;
use crate::encode::gif::{GifSink, delay_centis};
use crate::encode::quantize::quantize;
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::core::{Affine, Canvas, Rgba8};
use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::glyph::provider::GlyphOutlineProvider;
use crate::render::cpu::CpuRasterizer;
use crate::render::frame::{RenderOpts, render_frame};
use crate::scene::color::parse_css_color;

/// Output settings of an animated export.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOpts {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: f64,
    /// Animation length in seconds.
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    /// Glyph paint.
    #[serde(rename = "foregroundColor")]
    pub foreground: String,
    /// Opaque background; must be a parseable CSS color.
    #[serde(rename = "backgroundColor")]
    pub background: String,
    /// Frames between cooperative yields to the host.
    pub yield_every: u32,
    /// Em size in scene units.
    #[serde(skip)]
    pub font_size: f64,
    /// Viewport padding in scene units.
    #[serde(skip)]
    pub padding: f64,
}

impl Default for ExportOpts {
    fn default() -> Self {
        let render = RenderOpts::default();
        Self {
            width: 400,
            height: 200,
            fps: 15.0,
            duration_secs: 2.0,
            foreground: "black".to_owned(),
            background: "white".to_owned(),
            yield_every: 3,
            font_size: render.font_size,
            padding: render.padding,
        }
    }
}

impl ExportOpts {
    /// Layout options for each frame.
    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            font_size: self.font_size,
            padding: self.padding,
            foreground: self.foreground.clone(),
        }
    }

    /// The background as an opaque color; any alpha in the CSS value is dropped.
    ///
    /// Rasterized pixels are premultiplied, so only an opaque background makes them valid
    /// straight-alpha output.
    pub fn background_rgba(&self) -> GlyphfxResult<Rgba8> {
        let c = parse_css_color(&self.background).ok_or_else(|| {
            GlyphfxError::validation(format!("unparsable background color '{}'", self.background))
        })?;
        Ok(Rgba8 { a: 255, ..c })
    }
}

/// Upper bound on the frames of one export.
pub const MAX_FRAMES: u64 = 10_000;

/// Number of frames and per-frame delay for an export.
///
/// `frames = max(1, round(fps * duration))`, `delay_ms = round(1000 / fps)`.
///
/// Rejects a frame rate whose delay rounds to zero GIF centiseconds and exports longer than
/// [`MAX_FRAMES`].
pub fn frame_timing(fps: f64, duration_secs: f64) -> GlyphfxResult<(u64, u32)> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(GlyphfxError::validation(format!(
            "fps must be finite and > 0, got {fps}"
        )));
    }
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(GlyphfxError::validation(format!(
            "duration must be finite and >= 0, got {duration_secs}"
        )));
    }
    let delay_ms = (1000.0 / fps).round() as u32;
    if delay_centis(delay_ms) == 0 {
        return Err(GlyphfxError::validation(format!(
            "fps {fps} is too high: frame delay rounds to 0 cs"
        )));
    }
    let frames = (fps * duration_secs).round().max(1.0);
    if frames > MAX_FRAMES as f64 {
        return Err(GlyphfxError::validation(format!(
            "{frames} frames exceeds the limit of {MAX_FRAMES}"
        )));
    }
    Ok((frames as u64, delay_ms))
}

/// Callbacks from a running export.
pub trait ExportHost {
    /// Fraction of frames finished, in `(0, 1]`.
    fn progress(&mut self, _fraction: f64) {}

    /// Called every `yield_every` frames (never after the last one). `Break` cancels the export.
    fn yield_now(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Host that ignores progress and never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl ExportHost for NoopHost {}

/// A snapshot of everything an export needs.
///
/// The effect list and animation map are copied at construction, so edits made while the job
/// runs do not leak into its frames.
#[derive(Clone, Debug)]
pub struct ExportJob {
    text: String,
    wireframe: bool,
    effects: Vec<Effect>,
    animations: EffectAnimations,
    opts: ExportOpts,
}

impl ExportJob {
    /// Capture the inputs of an export.
    pub fn new(
        text: impl Into<String>,
        wireframe: bool,
        effects: &[Effect],
        animations: &EffectAnimations,
        opts: ExportOpts,
    ) -> Self {
        Self {
            text: text.into(),
            wireframe,
            effects: effects.to_vec(),
            animations: animations.clone(),
            opts,
        }
    }

    /// Export options.
    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    /// Render, rasterize, quantize and push every frame in order, then close the sink.
    ///
    /// Returns the number of frames written. Any failure aborts the run; the sink is not
    /// ended in that case and whatever it holds should be discarded.
    #[tracing::instrument(skip_all, fields(text = %self.text, fps = self.opts.fps))]
    pub fn run(
        &self,
        provider: &dyn GlyphOutlineProvider,
        sink: &mut dyn AnimationSink,
        host: &mut dyn ExportHost,
    ) -> GlyphfxResult<u64> {
        let opts = &self.opts;
        let canvas = Canvas::new(opts.width, opts.height)?;
        let background = opts.background_rgba()?;
        let (total, delay_ms) = frame_timing(opts.fps, opts.duration_secs)?;
        let yield_every = u64::from(opts.yield_every.max(1));
        let render_opts = opts.render_opts();

        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            frame_count: total,
            delay_ms,
        })?;

        let mut raster = CpuRasterizer::new();
        for i in 0..total {
            let t = i as f64 / opts.fps;
            let effects = resolve_effects(&self.effects, &self.animations, t);
            let frame =
                render_frame(&self.text, provider, self.wireframe, &effects, &render_opts)?;
            let rgba = raster.rasterize(&frame, canvas, background, Affine::IDENTITY)?;
            let indexed = quantize(&rgba, delay_ms)?;
            sink.push_frame(i, &indexed)?;

            let done = i + 1;
            tracing::debug!(frame = i, t, colors = indexed.palette.len(), "exported frame");
            host.progress(done as f64 / total as f64);

            if done < total && done % yield_every == 0 && host.yield_now().is_break() {
                tracing::info!(done, total, "export cancelled");
                return Err(GlyphfxError::Cancelled {
                    frames_done: done,
                    frames_total: total,
                });
            }
        }

        sink.end()?;
        Ok(total)
    }
}

/// Export an animated GIF of `text` with `effects` animated by `animations`.
pub fn export_animation(
    text: &str,
    provider: &dyn GlyphOutlineProvider,
    wireframe: bool,
    effects: &[Effect],
    animations: &EffectAnimations,
    opts: &ExportOpts,
    host: &mut dyn ExportHost,
) -> GlyphfxResult<Vec<u8>> {
    let job = ExportJob::new(text, wireframe, effects, animations, opts.clone());
    let mut sink = GifSink::new();
    job.run(provider, &mut sink, host)?;
    sink.into_bytes()
}

/// Single-flight guard: at most one [`ExportTicket`] exists at a time.
#[derive(Debug, Default)]
pub struct ExportSlot {
    busy: AtomicBool,
}

impl ExportSlot {
    /// Idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` while another export holds it.
    pub fn try_acquire(&self) -> Option<ExportTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| ExportTicket { slot: self })
    }

    /// Whether an export currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding an [`ExportSlot`]; dropping it frees the slot.
#[derive(Debug)]
pub struct ExportTicket<'a> {
    slot: &'a ExportSlot,
}

impl Drop for ExportTicket<'_> {
    fn drop(&mut self) {
        self.slot.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
