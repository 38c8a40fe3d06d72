use crate::effects::model::{Effect, EffectParams};
use crate::scene::model::Scene;

/// Run one stage.
pub fn apply_effect(scene: &Scene, params: &EffectParams) -> Scene {
    match params {
        EffectParams::Multiply(p) => crate::effects::multiply::multiply(scene, p),
        EffectParams::Distortion(p) => crate::effects::distortion::distortion(scene, p),
        EffectParams::Outline(p) => crate::effects::outline::outline(scene, p),
        EffectParams::Subdivide(p) => crate::effects::subdivide::subdivide(scene, p),
        EffectParams::Color(p) => crate::effects::color::color(scene, p),
    }
}

/// Fold every enabled effect over `scene`, left to right. Disabled effects are skipped.
pub fn apply_effects(scene: &Scene, effects: &[Effect]) -> Scene {
    let mut out = scene.clone();
    for effect in effects.iter().filter(|e| e.enabled) {
        tracing::trace!(id = %effect.id, kind = ?effect.kind(), "apply effect");
        out = apply_effect(&out, &effect.params);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
