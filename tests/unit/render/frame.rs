use super::*;
use crate::effects::model::{EffectKind, EffectParams, MultiplyParams};
use crate::glyph::provider::{GlyphOutline, MemoryOutlineProvider};
use crate::path::command::{parse, serialize};
use crate::scene::model::Paint;

fn provider() -> MemoryOutlineProvider {
    let mut p = MemoryOutlineProvider::new(100.0);
    p.insert('a', parse("M0 0 L50 0 L50 70 L0 70 Z"), 60.0)
        .insert(' ', Vec::new(), 30.0);
    p
}

fn opts() -> RenderOpts {
    RenderOpts {
        font_size: 100.0,
        padding: 10.0,
        foreground: "black".to_owned(),
    }
}

struct BrokenFont;

impl GlyphOutlineProvider for BrokenFont {
    fn units_per_em(&self) -> f64 {
        1000.0
    }

    fn glyph(&self, _ch: char) -> GlyphfxResult<Option<GlyphOutline>> {
        Err(GlyphfxError::font("font not loaded"))
    }
}

#[test]
fn glyphs_are_flipped_onto_the_baseline_and_advanced() {
    let frame = render_frame("a a", &provider(), false, &[], &opts()).unwrap();
    let groups = &frame.scene.groups;
    assert_eq!(groups.len(), 3);
    assert_eq!(
        serialize(&groups[0].layers[0].outlines[0].commands),
        "M0 100 L50 100 L50 30 L0 30 Z"
    );
    assert!(groups[1].layers[0].outlines.is_empty());
    // 'a' advances 60, the space 30.
    assert_eq!(
        serialize(&groups[2].layers[0].outlines[0].commands),
        "M90 100 L140 100 L140 30 L90 30 Z"
    );
    assert_eq!(groups[0].layers[0].outlines[0].style, Style::filled("black"));
}

#[test]
fn viewport_is_padded_union_of_bounds() {
    let frame = render_frame("aa", &provider(), false, &[], &opts()).unwrap();
    assert_eq!(
        frame.viewport,
        Viewport {
            x: -10.0,
            y: 20.0,
            width: 130.0,
            height: 90.0
        }
    );
}

#[test]
fn wireframe_strokes_with_the_foreground() {
    let frame = render_frame("a", &provider(), true, &[], &opts()).unwrap();
    let style = &frame.scene.groups[0].layers[0].outlines[0].style;
    assert_eq!(style.fill, Paint::None);
    assert_eq!(style.stroke, Paint::color("black"));
    assert_eq!(style.stroke_width, 1.0);
    assert_eq!(frame.viewport.x, -10.5);
    assert_eq!(frame.viewport.width, 71.0);
}

#[test]
fn missing_glyphs_keep_their_slot() {
    let frame = render_frame("?a", &provider(), false, &[], &opts()).unwrap();
    assert_eq!(frame.scene.groups[0].ch, '?');
    assert!(frame.scene.groups[0].bounds().is_none());
    // Missing glyph advances half an em.
    let b = frame.scene.groups[1].bounds().unwrap();
    assert_eq!(b.x0, 50.0);
}

#[test]
fn nothing_drawable_falls_back_to_default_viewport() {
    let frame = render_frame("  ?", &provider(), false, &[], &opts()).unwrap();
    assert_eq!(frame.viewport, Viewport::DEFAULT);
    let frame = render_frame("", &provider(), false, &[], &opts()).unwrap();
    assert_eq!(frame.viewport, Viewport::DEFAULT);
}

#[test]
fn effects_run_before_fitting() {
    let effects = vec![Effect::new(
        "m",
        EffectParams::Multiply(MultiplyParams {
            count: 2.0,
            offset_x: 20.0,
            offset_y: 0.0,
            rotation: 0.0,
            opacity_decay: 0.5,
        }),
    )];
    let frame = render_frame("a", &provider(), false, &effects, &opts()).unwrap();
    assert_eq!(frame.scene.groups[0].layers.len(), 2);
    assert_eq!(frame.viewport.width, 90.0);

    let mut disabled = Effect::with_defaults("m", EffectKind::Multiply);
    disabled.enabled = false;
    let frame = render_frame("a", &provider(), false, &[disabled], &opts()).unwrap();
    assert_eq!(frame.scene.groups[0].layers.len(), 1);
}

#[test]
fn provider_failure_is_an_error() {
    let err = render_frame("a", &BrokenFont, false, &[], &opts()).unwrap_err();
    assert!(matches!(err, GlyphfxError::Font(_)));
}

#[test]
fn invalid_font_size_is_rejected() {
    let mut o = opts();
    o.font_size = 0.0;
    assert!(render_frame("a", &provider(), false, &[], &o).is_err());
}
