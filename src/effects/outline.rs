use crate::effects::model::{OutlineParams, OutlineStyle};
use crate::scene::model::{LineCap, LineJoin, Outline, Paint, PaintOrder, Scene, Style};

/// Stroke every outline behind its fill.
///
/// The stroke takes the fill color, falling back to the existing stroke color and then to the
/// scene foreground. Geometry is unchanged.
pub fn outline(scene: &Scene, params: &OutlineParams) -> Scene {
    let (line_join, line_cap) = match params.style {
        OutlineStyle::Round => (LineJoin::Round, LineCap::Round),
        OutlineStyle::Square => (LineJoin::Miter, LineCap::Square),
    };

    scene.map_outlines(|o| {
        let stroke = if !o.style.fill.is_none() {
            o.style.fill.clone()
        } else if !o.style.stroke.is_none() {
            o.style.stroke.clone()
        } else {
            Paint::color(scene.foreground.clone())
        };
        Outline {
            commands: o.commands.clone(),
            style: Style {
                fill: o.style.fill.clone(),
                stroke,
                stroke_width: params.thickness,
                line_join,
                line_cap,
                paint_order: PaintOrder::StrokeFill,
            },
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/outline.rs"]
mod tests;
