use super::*;
use serde_json::json;

#[test]
fn every_kind_declares_its_parameters() {
    let names: Vec<&str> = EffectKind::Multiply.specs().iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        ["count", "offsetX", "offsetY", "rotation", "opacityDecay"]
    );
    assert!(EffectKind::Distortion.spec("waveType").is_none());
    assert_eq!(EffectKind::Subdivide.spec("subdivisions").map(|s| s.max), Some(16.0));
    for kind in EffectKind::ALL {
        assert!(EffectParams::defaults(kind).validate().is_ok(), "{kind:?}");
    }
}

#[test]
fn get_and_set_by_name() {
    let mut p = EffectParams::defaults(EffectKind::Color);
    assert_eq!(p.get("hue"), Some(200.0));
    assert!(p.set("hue", 42.0));
    assert_eq!(p.get("hue"), Some(42.0));
    assert!(!p.set("count", 3.0));
    assert_eq!(p.get("count"), None);
}

#[test]
fn validate_and_clamp_use_declared_ranges() {
    let mut p = EffectParams::Multiply(MultiplyParams {
        count: 40.0,
        opacity_decay: -1.0,
        ..MultiplyParams::default()
    });
    let err = p.validate().unwrap_err();
    assert!(err.to_string().contains("count"));

    p.clamp();
    assert!(p.validate().is_ok());
    assert_eq!(p.get("count"), Some(20.0));
    assert_eq!(p.get("opacityDecay"), Some(0.0));

    let spec = EffectKind::Color.spec("hue").unwrap();
    assert_eq!(spec.clamp(f64::NAN), 0.0);
    assert!(!spec.contains(f64::INFINITY));
}

#[test]
fn effect_json_shape() {
    let e = Effect::new(
        "fx1",
        EffectParams::Distortion(DistortionParams {
            wave_type: WaveType::Triangle,
            amplitude: 3.0,
            frequency: 0.5,
            phase: 90.0,
        }),
    );
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(
        v,
        json!({
            "id": "fx1",
            "type": "distortion",
            "enabled": true,
            "parameters": {
                "waveType": "triangle",
                "amplitude": 3.0,
                "frequency": 0.5,
                "phase": 90.0
            }
        })
    );
    let back: Effect = serde_json::from_value(v).unwrap();
    assert_eq!(back, e);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let e: Effect = serde_json::from_value(json!({"id": "a", "type": "outline"})).unwrap();
    assert!(e.enabled);
    assert_eq!(e.params, EffectParams::defaults(EffectKind::Outline));

    let e: Effect = serde_json::from_value(json!({
        "id": "b",
        "type": "multiply",
        "enabled": false,
        "parameters": {"count": 5}
    }))
    .unwrap();
    assert!(!e.enabled);
    assert_eq!(e.params.get("count"), Some(5.0));
    assert_eq!(e.params.get("offsetX"), Some(5.0));
}

#[test]
fn unknown_type_is_rejected() {
    let r: Result<Effect, _> = serde_json::from_value(json!({"id": "a", "type": "blur"}));
    assert!(r.is_err());
}
