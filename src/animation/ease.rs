use std::f64::consts::TAU;

/// Easing curves applied to normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic in/out, same curve as [`Easing::EaseInOut`].
    Ease,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in/out.
    EaseInOut,
    /// Four-bounce settle onto 1.
    BounceOut,
    /// Damped spring that overshoots 1 before settling.
    ElasticOut,
}

impl Easing {
    /// Apply this easing to progress `t` in `[0, 1]`.
    ///
    /// The output is not clamped: [`Easing::ElasticOut`] leaves `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Ease | Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::BounceOut => bounce_out(t),
            Self::ElasticOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((10.0 * t - 0.75) * (TAU / 3.0)).sin() + 1.0
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
