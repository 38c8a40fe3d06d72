use crate::effects::model::Effect;
use crate::effects::pipeline::apply_effects;
use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::glyph::provider::GlyphOutlineProvider;
use crate::path::convert::transform;
use crate::scene::model::{CharGroup, Outline, Scene, Style};

/// Layout and styling knobs for [`render_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    /// Em size in scene units.
    pub font_size: f64,
    /// Space kept around the content when fitting the viewport.
    pub padding: f64,
    /// Base paint for glyph outlines.
    pub foreground: String,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            font_size: 72.0,
            padding: 10.0,
            foreground: "black".to_owned(),
        }
    }
}

/// A styled scene plus the region of it to show.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Effect output.
    pub scene: Scene,
    /// Fitted scene-space window.
    pub viewport: Viewport,
}

/// Lay `text` out on one baseline, apply `effects` and fit the viewport.
///
/// Characters the provider has no glyph for keep their slot as an empty group and advance by
/// half an em. A provider error (unusable font) fails the whole frame.
#[tracing::instrument(skip(provider, effects, opts), fields(effects = effects.len()))]
pub fn render_frame(
    text: &str,
    provider: &dyn GlyphOutlineProvider,
    wireframe: bool,
    effects: &[Effect],
    opts: &RenderOpts,
) -> GlyphfxResult<Frame> {
    let scene = layout_text(text, provider, wireframe, opts)?;
    let scene = apply_effects(&scene, effects);
    let viewport = fit_viewport(&scene, opts.padding);
    Ok(Frame { scene, viewport })
}

/// Glyph outlines for `text` in scene units (y-down), before any effect.
pub fn layout_text(
    text: &str,
    provider: &dyn GlyphOutlineProvider,
    wireframe: bool,
    opts: &RenderOpts,
) -> GlyphfxResult<Scene> {
    if !opts.font_size.is_finite() || opts.font_size <= 0.0 {
        return Err(GlyphfxError::validation(format!(
            "font size must be finite and > 0, got {}",
            opts.font_size
        )));
    }
    let style = if wireframe {
        Style::wireframe(opts.foreground.clone())
    } else {
        Style::filled(opts.foreground.clone())
    };

    let baseline = opts.font_size;
    let mut pen_x = 0.0;
    let mut scene = Scene::new(opts.foreground.clone());

    for ch in text.chars() {
        let Some(glyph) = provider.glyph(ch)? else {
            tracing::debug!(?ch, "no glyph");
            scene.groups.push(CharGroup::new(ch, Vec::new()));
            pen_x += opts.font_size / 2.0;
            continue;
        };
        let upem = if glyph.units_per_em.is_finite() && glyph.units_per_em > 0.0 {
            glyph.units_per_em
        } else {
            provider.units_per_em()
        };
        if !upem.is_finite() || upem <= 0.0 {
            return Err(GlyphfxError::font(format!(
                "font reports invalid units per em ({upem})"
            )));
        }
        let s = opts.font_size / upem;

        let outlines = if glyph.commands.is_empty() {
            Vec::new()
        } else {
            // Font units are y-up with the origin on the baseline.
            let place = Affine::new([s, 0.0, 0.0, -s, pen_x, baseline]);
            vec![Outline::new(transform(&glyph.commands, place), style.clone())]
        };
        scene.groups.push(CharGroup::new(ch, outlines));
        pen_x += glyph.advance * s;
    }
    Ok(scene)
}

/// Union of every outline's painted bounds grown by `padding`, or [`Viewport::DEFAULT`] when
/// nothing has a finite bound.
pub fn fit_viewport(scene: &Scene, padding: f64) -> Viewport {
    scene
        .bounds()
        .and_then(|r| Viewport::from_rect(r, padding))
        .unwrap_or(Viewport::DEFAULT)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
