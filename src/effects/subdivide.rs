use crate::effects::model::SubdivideParams;
use crate::path::subdivide::subdivide as subdivide_commands;
use crate::scene::model::{Outline, Scene};

/// Replace every curve and line with `subdivisions` straight segments.
pub fn subdivide(scene: &Scene, params: &SubdivideParams) -> Scene {
    let n = if params.subdivisions.is_finite() {
        params.subdivisions.round().clamp(1.0, f64::from(u16::MAX)) as u32
    } else {
        1
    };
    scene.map_outlines(|o| Outline {
        commands: subdivide_commands(&o.commands, n),
        style: o.style.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/subdivide.rs"]
mod tests;
