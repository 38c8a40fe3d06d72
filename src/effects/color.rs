use crate::effects::model::ColorParams;
use crate::scene::color::hsl_string;
use crate::scene::model::{Outline, Paint, Scene, Style};

/// Recolor every painted fill and stroke to `hsl(hue, saturation%, lightness%)`.
///
/// `none` paints stay `none`.
pub fn color(scene: &Scene, params: &ColorParams) -> Scene {
    let hsl = hsl_string(params.hue, params.saturation, params.lightness);
    let recolor = |p: &Paint| {
        if p.is_none() {
            Paint::None
        } else {
            Paint::Color(hsl.clone())
        }
    };
    scene.map_outlines(|o| Outline {
        commands: o.commands.clone(),
        style: Style {
            fill: recolor(&o.style.fill),
            stroke: recolor(&o.style.stroke),
            ..o.style.clone()
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
