use std::collections::HashSet;

use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8};
use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::path::convert::to_bezpath;
use crate::render::frame::Frame;
use crate::scene::color::parse_css_color;
use crate::scene::model::{LineCap, LineJoin, Outline, Paint, PaintOrder};

/// A rasterized frame.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. Frames drawn over an opaque
/// background are fully opaque, so the bytes are also valid straight alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// CPU rasterizer backed by `vello_cpu`.
///
/// Keeps its render context and target pixmap between calls so consecutive frames of the same
/// size reuse their buffers.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    warned_colors: HashSet<String>,
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl CpuRasterizer {
    /// Fresh rasterizer without any cached buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `frame` into a `canvas`-sized image over `background`.
    ///
    /// The viewport is fitted into the canvas (`xMidYMid meet`), then `view` is applied in
    /// canvas pixels. Paints that do not parse as CSS colors are skipped with a warning.
    #[tracing::instrument(skip(self, frame, view), fields(w = canvas.width, h = canvas.height))]
    pub fn rasterize(
        &mut self,
        frame: &Frame,
        canvas: Canvas,
        background: Rgba8,
        view: Affine,
    ) -> GlyphfxResult<FrameRGBA> {
        let (w, h) = canvas_u16(canvas)?;
        let fit = view * frame.viewport.fit_affine(f64::from(w), f64::from(h));

        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };

        self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                background.r,
                background.g,
                background.b,
                background.a,
            ));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));

            for group in &frame.scene.groups {
                for layer in &group.layers {
                    if layer.outlines.is_empty() {
                        continue;
                    }
                    let opacity = layer.opacity.clamp(0.0, 1.0) as f32;
                    if opacity <= 0.0 {
                        continue;
                    }
                    ctx.set_transform(affine_to_cpu(fit * layer.transform));
                    if opacity < 1.0 {
                        ctx.push_opacity_layer(opacity);
                    }
                    for outline in &layer.outlines {
                        this.draw_outline(ctx, outline);
                    }
                    if opacity < 1.0 {
                        ctx.pop_layer();
                    }
                }
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        let out = FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
        };
        self.pixmap = Some(pixmap);
        Ok(out)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> GlyphfxResult<R>,
    ) -> GlyphfxResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_outline(&mut self, ctx: &mut vello_cpu::RenderContext, outline: &Outline) {
        let path = to_bezpath(&outline.commands);
        if path.elements().is_empty() {
            return;
        }
        let path = bezpath_to_cpu(&path);
        match outline.style.paint_order {
            PaintOrder::FillStroke => {
                self.fill(ctx, outline, &path);
                self.stroke(ctx, outline, &path);
            }
            PaintOrder::StrokeFill => {
                self.stroke(ctx, outline, &path);
                self.fill(ctx, outline, &path);
            }
        }
    }

    fn fill(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        outline: &Outline,
        path: &vello_cpu::kurbo::BezPath,
    ) {
        let Some(c) = self.resolve(&outline.style.fill) else {
            return;
        };
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.fill_path(path);
    }

    fn stroke(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        outline: &Outline,
        path: &vello_cpu::kurbo::BezPath,
    ) {
        let style = &outline.style;
        if !style.stroke_width.is_finite() || style.stroke_width <= 0.0 {
            return;
        }
        let Some(c) = self.resolve(&style.stroke) else {
            return;
        };
        let join = match style.line_join {
            LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
            LineJoin::Round => vello_cpu::kurbo::Join::Round,
            LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        };
        let cap = match style.line_cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
        };
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(style.stroke_width)
                .with_join(join)
                .with_caps(cap),
        );
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.stroke_path(path);
    }

    fn resolve(&mut self, paint: &Paint) -> Option<Rgba8> {
        let s = paint.as_color()?;
        let c = parse_css_color(s);
        if c.is_none() && self.warned_colors.insert(s.to_owned()) {
            tracing::warn!(color = s, "unparsable paint skipped");
        }
        c
    }
}

/// One-shot [`CpuRasterizer::rasterize`] without a view transform.
pub fn rasterize(frame: &Frame, canvas: Canvas, background: Rgba8) -> GlyphfxResult<FrameRGBA> {
    CpuRasterizer::new().rasterize(frame, canvas, background, Affine::IDENTITY)
}

fn canvas_u16(canvas: Canvas) -> GlyphfxResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| GlyphfxError::render(format!("canvas width {} too large", canvas.width)))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| GlyphfxError::render(format!("canvas height {} too large", canvas.height)))?;
    if w == 0 || h == 0 {
        return Err(GlyphfxError::render("canvas width/height must be > 0"));
    }
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
