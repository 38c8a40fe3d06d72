use super::*;
use crate::effects::model::{EffectKind, EffectParams};
use serde_json::json;

fn linear(min: f64, max: f64) -> AnimationConfig {
    AnimationConfig {
        enabled: true,
        min,
        max,
        speed: 1.0,
        easing: Easing::Linear,
        ping_pong: true,
    }
}

#[test]
fn disabled_always_returns_min() {
    let cfg = AnimationConfig {
        enabled: false,
        ..linear(2.0, 8.0)
    };
    for t in [0.0, 0.25, 0.5, 3.7, -1.0] {
        assert_eq!(animated_value(&cfg, t), 2.0);
    }
}

#[test]
fn ping_pong_peaks_mid_cycle() {
    let cfg = linear(0.0, 10.0);
    assert_eq!(animated_value(&cfg, 0.0), 0.0);
    assert_eq!(animated_value(&cfg, 0.5), 10.0);
    assert_eq!(animated_value(&cfg, 1.0), 0.0);
    assert_eq!(animated_value(&cfg, 0.25), 5.0);
    assert_eq!(animated_value(&cfg, 0.75), 5.0);
}

#[test]
fn without_ping_pong_the_value_ramps_and_wraps() {
    let cfg = AnimationConfig {
        ping_pong: false,
        speed: 2.0,
        ..linear(0.0, 10.0)
    };
    assert_eq!(animated_value(&cfg, 0.25), 5.0);
    assert_eq!(animated_value(&cfg, 0.5), 0.0);
}

#[test]
fn degenerate_speed_freezes_at_min() {
    for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let cfg = AnimationConfig {
            speed,
            ..linear(3.0, 9.0)
        };
        assert_eq!(animated_value(&cfg, 0.4), 3.0);
    }
}

#[test]
fn resolve_substitutes_declared_params_only() {
    let effects = vec![Effect::with_defaults("c", EffectKind::Color)];
    let mut animations = EffectAnimations::new();
    let params = animations.entry("c".to_owned()).or_default();
    params.insert("hue".to_owned(), linear(0.0, 360.0));
    params.insert("count".to_owned(), linear(0.0, 10.0));
    params.insert(
        "lightness".to_owned(),
        AnimationConfig {
            enabled: false,
            ..linear(0.0, 100.0)
        },
    );

    let resolved = resolve_effects(&effects, &animations, 0.5);
    assert_eq!(resolved[0].params.get("hue"), Some(360.0));
    assert_eq!(resolved[0].params.get("lightness"), Some(50.0));
    assert_eq!(resolved[0].params.get("count"), None);
    // The base list is untouched.
    assert_eq!(effects[0].params, EffectParams::defaults(EffectKind::Color));
}

#[test]
fn retain_declared_prunes_stale_entries() {
    let effects = vec![Effect::with_defaults("m", EffectKind::Multiply)];
    let mut animations: EffectAnimations = serde_json::from_value(json!({
        "m": {"count": {"enabled": true}, "hue": {"enabled": true}},
        "gone": {"count": {"enabled": true}}
    }))
    .unwrap();

    assert_eq!(retain_declared(&mut animations, &effects), 2);
    assert_eq!(animations.len(), 1);
    assert!(animations["m"].contains_key("count"));
    assert!(any_enabled(&animations));
}

#[test]
fn config_json_uses_camel_case() {
    let v = serde_json::to_value(linear(1.0, 2.0)).unwrap();
    assert_eq!(
        v,
        json!({
            "enabled": true,
            "min": 1.0,
            "max": 2.0,
            "speed": 1.0,
            "easing": "linear",
            "pingPong": true
        })
    );
}

#[test]
fn ranges_are_bounded_by_the_declared_parameter() {
    let effects = vec![Effect::with_defaults("m", EffectKind::Multiply)];
    let mut animations: EffectAnimations = serde_json::from_value(json!({
        "m": {
            "count": {"enabled": true, "min": 1, "max": 100000, "pingPong": false},
            "rotation": {"enabled": true, "min": 500, "max": -500}
        }
    }))
    .unwrap();

    assert_eq!(retain_declared(&mut animations, &effects), 0);
    let count = &animations["m"]["count"];
    assert_eq!((count.min, count.max), (1.0, 20.0));
    let rotation = &animations["m"]["rotation"];
    assert_eq!((rotation.min, rotation.max), (-180.0, 180.0));
}

#[test]
fn resolve_never_leaves_the_declared_range() {
    let effects = vec![Effect::with_defaults("m", EffectKind::Multiply)];
    let mut animations = EffectAnimations::new();
    animations.entry("m".to_owned()).or_default().insert(
        "count".to_owned(),
        AnimationConfig {
            ping_pong: false,
            ..linear(1.0, 100_000.0)
        },
    );

    let resolved = resolve_effects(&effects, &animations, 0.5);
    assert_eq!(resolved[0].params.get("count"), Some(10.5));
}

#[test]
fn bounding_keeps_elastic_overshoot() {
    let spec = EffectKind::Color.spec("hue").unwrap();
    let cfg = AnimationConfig {
        easing: Easing::ElasticOut,
        ping_pong: false,
        ..linear(0.0, 360.0)
    }
    .bounded_by(spec);
    let peak = (1..100)
        .map(|i| animated_value(&cfg, i as f64 / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 360.0);
}
