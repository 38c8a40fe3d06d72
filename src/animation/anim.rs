use std::collections::BTreeMap;

use crate::animation::ease::Easing;
use crate::effects::model::{Effect, ParamSpec};
use crate::foundation::math::lerp;

/// Per-parameter animation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Disabled animations hold `min`.
    pub enabled: bool,
    /// Value at progress 0.
    pub min: f64,
    /// Value at progress 1.
    pub max: f64,
    /// Cycles per second.
    pub speed: f64,
    /// Curve applied to progress.
    pub easing: Easing,
    /// Fold each cycle into min -> max -> min.
    pub ping_pong: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: 1.0,
            speed: 1.0,
            easing: Easing::Linear,
            ping_pong: true,
        }
    }
}

impl AnimationConfig {
    /// Enabled animation sweeping the full declared range of a parameter.
    pub fn for_spec(spec: &ParamSpec) -> Self {
        Self {
            enabled: true,
            min: spec.min,
            max: spec.max,
            ..Self::default()
        }
    }

    /// Copy with `min` and `max` clamped into the declared range of `spec`, swapped when
    /// `min > max`. Easing overshoot past `max` is left alone.
    pub fn bounded_by(&self, spec: &ParamSpec) -> Self {
        let (a, b) = (spec.clamp(self.min), spec.clamp(self.max));
        Self {
            min: a.min(b),
            max: a.max(b),
            ..self.clone()
        }
    }
}

/// Animation configs keyed by effect id, then by parameter name.
pub type EffectAnimations = BTreeMap<String, BTreeMap<String, AnimationConfig>>;

/// Sample `config` at `elapsed` seconds.
///
/// Disabled configs and configs with a non-positive or non-finite speed return `min`.
pub fn animated_value(config: &AnimationConfig, elapsed: f64) -> f64 {
    if !config.enabled || !config.speed.is_finite() || config.speed <= 0.0 {
        return config.min;
    }
    let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };

    let cycle = 1.0 / config.speed;
    let raw = elapsed.rem_euclid(cycle) / cycle;
    let progress = if !config.ping_pong {
        raw
    } else if raw < 0.5 {
        2.0 * raw
    } else {
        2.0 * (1.0 - raw)
    };
    lerp(config.min, config.max, config.easing.apply(progress))
}

/// Copy of `effects` with every enabled animation of a declared parameter substituted at time
/// `t`. `effects` is left untouched.
pub fn resolve_effects(effects: &[Effect], animations: &EffectAnimations, t: f64) -> Vec<Effect> {
    effects
        .iter()
        .map(|effect| {
            let mut out = effect.clone();
            if let Some(params) = animations.get(&effect.id) {
                for (name, config) in params {
                    if let Some(spec) = effect.kind().spec(name)
                        && config.enabled
                    {
                        out.params.set(name, animated_value(&config.bounded_by(spec), t));
                    }
                }
            }
            out
        })
        .collect()
}

/// Whether any config in the map is enabled.
pub fn any_enabled(animations: &EffectAnimations) -> bool {
    animations
        .values()
        .flat_map(BTreeMap::values)
        .any(|c| c.enabled)
}

/// Drop entries whose effect no longer exists or whose parameter the effect does not declare,
/// and bound the remaining ones by their parameter's declared range (see
/// [`AnimationConfig::bounded_by`]).
///
/// Returns the number of removed entries.
pub fn retain_declared(animations: &mut EffectAnimations, effects: &[Effect]) -> usize {
    let before: usize = animations.values().map(BTreeMap::len).sum();
    animations.retain(|id, params| {
        let Some(effect) = effects.iter().find(|e| &e.id == id) else {
            return false;
        };
        params.retain(|name, config| match effect.kind().spec(name) {
            Some(spec) => {
                *config = config.bounded_by(spec);
                true
            }
            None => false,
        });
        !params.is_empty()
    });
    let after: usize = animations.values().map(BTreeMap::len).sum();
    before - after
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
