use crate::effects::model::MultiplyParams;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::scene::model::{CharGroup, Layer, Scene};

/// Add `count - 1` offset, rotated and fading copies of every character behind the original.
///
/// Copy `i` is translated by `(offsetX, offsetY) * i`, rotated by `rotation * i` degrees about
/// the character's bounding-box center and faded by `(1 - opacityDecay)^i`. The farthest copy
/// paints first.
pub fn multiply(scene: &Scene, params: &MultiplyParams) -> Scene {
    let count = rounded_count(params.count);
    if count <= 1 {
        return scene.clone();
    }
    let keep = (1.0 - params.opacity_decay).clamp(0.0, 1.0);

    let groups = scene
        .groups
        .iter()
        .map(|g| {
            let center = g.bounds().map(|r| r.center()).unwrap_or(Point::ZERO);
            let mut layers = Vec::with_capacity(g.layers.len() * count as usize);
            for i in (1..count).rev() {
                let step = f64::from(i);
                let placement = Affine::translate(Vec2::new(
                    params.offset_x * step,
                    params.offset_y * step,
                )) * Affine::rotate_about((params.rotation * step).to_radians(), center);
                let fade = keep.powi(i as i32);
                layers.extend(g.layers.iter().map(|l| Layer {
                    outlines: l.outlines.clone(),
                    transform: placement * l.transform,
                    opacity: l.opacity * fade,
                }));
            }
            layers.extend(g.layers.iter().cloned());
            CharGroup { ch: g.ch, layers }
        })
        .collect();

    Scene {
        groups,
        foreground: scene.foreground.clone(),
    }
}

fn rounded_count(count: f64) -> u32 {
    if !count.is_finite() {
        return 1;
    }
    count.round().clamp(1.0, f64::from(u16::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/effects/multiply.rs"]
mod tests;
