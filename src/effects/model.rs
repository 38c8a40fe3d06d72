use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// Declared range of one numeric effect parameter.
///
/// The same range validates user input and bounds animations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParamSpec {
    /// Parameter name as it appears in JSON and animation maps.
    pub name: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// UI increment.
    pub step: f64,
}

impl ParamSpec {
    const fn new(name: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            min,
            max,
            step,
        }
    }

    /// Whether `v` is finite and inside `[min, max]`.
    pub fn contains(&self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    /// `v` forced into `[min, max]`. Non-finite values become `min`.
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_finite() {
            v.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

/// Uniform access to the numeric parameters of one effect kind.
pub trait EffectParamSet {
    /// Declared numeric parameters, in display order.
    const SPECS: &'static [ParamSpec];

    /// Current value of a declared parameter.
    fn get(&self, name: &str) -> Option<f64>;

    /// Overwrite a declared parameter. Returns `false` (and changes nothing) for unknown names.
    fn set(&mut self, name: &str, value: f64) -> bool;

    /// Declaration of `name`, if this kind has it.
    fn spec(name: &str) -> Option<&'static ParamSpec> {
        Self::SPECS.iter().find(|s| s.name == name)
    }

    /// Fail on the first parameter outside its declared range.
    fn validate(&self) -> GlyphfxResult<()> {
        for spec in Self::SPECS {
            let v = self.get(spec.name).unwrap_or(f64::NAN);
            if !spec.contains(v) {
                return Err(GlyphfxError::validation(format!(
                    "parameter '{}' = {v} outside [{}, {}]",
                    spec.name, spec.min, spec.max
                )));
            }
        }
        Ok(())
    }

    /// Force every parameter into its declared range.
    fn clamp(&mut self) {
        for spec in Self::SPECS {
            if let Some(v) = self.get(spec.name) {
                self.set(spec.name, spec.clamp(v));
            }
        }
    }
}

/// The five effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Offset, rotated, fading copies behind each character.
    Multiply,
    /// Arc-length wave displacement.
    Distortion,
    /// Stroke styling behind the fill.
    Outline,
    /// Curve flattening to polylines.
    Subdivide,
    /// HSL recolor.
    Color,
}

impl EffectKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Multiply,
        Self::Distortion,
        Self::Outline,
        Self::Subdivide,
        Self::Color,
    ];

    /// Declared numeric parameters of this kind.
    pub fn specs(self) -> &'static [ParamSpec] {
        match self {
            Self::Multiply => MultiplyParams::SPECS,
            Self::Distortion => DistortionParams::SPECS,
            Self::Outline => OutlineParams::SPECS,
            Self::Subdivide => SubdivideParams::SPECS,
            Self::Color => ColorParams::SPECS,
        }
    }

    /// Declaration of `name` on this kind.
    pub fn spec(self, name: &str) -> Option<&'static ParamSpec> {
        self.specs().iter().find(|s| s.name == name)
    }
}

/// Wave shape used by [`DistortionParams`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveType {
    /// `sin(x)`.
    #[default]
    Sine,
    /// Linear ramp from -1 to 1 over each period.
    Saw,
    /// Symmetric up/down ramp over each period.
    Triangle,
}

/// Stroke join/cap family used by [`OutlineParams`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    /// Round joins and caps.
    #[default]
    Round,
    /// Miter joins and square caps.
    Square,
}

/// Parameters of the Multiply effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiplyParams {
    /// Total copies including the original. Rounded when applied.
    pub count: f64,
    /// Horizontal offset per copy.
    pub offset_x: f64,
    /// Vertical offset per copy.
    pub offset_y: f64,
    /// Rotation per copy, in degrees.
    pub rotation: f64,
    /// Opacity lost per copy, in `[0, 1]`.
    pub opacity_decay: f64,
}

impl Default for MultiplyParams {
    fn default() -> Self {
        Self {
            count: 3.0,
            offset_x: 5.0,
            offset_y: 5.0,
            rotation: 0.0,
            opacity_decay: 0.3,
        }
    }
}

impl EffectParamSet for MultiplyParams {
    const SPECS: &'static [ParamSpec] = &[
        ParamSpec::new("count", 1.0, 20.0, 1.0),
        ParamSpec::new("offsetX", -50.0, 50.0, 1.0),
        ParamSpec::new("offsetY", -50.0, 50.0, 1.0),
        ParamSpec::new("rotation", -180.0, 180.0, 1.0),
        ParamSpec::new("opacityDecay", 0.0, 1.0, 0.05),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        Some(match name {
            "count" => self.count,
            "offsetX" => self.offset_x,
            "offsetY" => self.offset_y,
            "rotation" => self.rotation,
            "opacityDecay" => self.opacity_decay,
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "count" => &mut self.count,
            "offsetX" => &mut self.offset_x,
            "offsetY" => &mut self.offset_y,
            "rotation" => &mut self.rotation,
            "opacityDecay" => &mut self.opacity_decay,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Parameters of the Distortion effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistortionParams {
    /// Wave shape.
    pub wave_type: WaveType,
    /// Peak displacement along the normal.
    pub amplitude: f64,
    /// Radians of wave phase per unit of arc length.
    pub frequency: f64,
    /// Phase offset in degrees.
    pub phase: f64,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            wave_type: WaveType::Sine,
            amplitude: 5.0,
            frequency: 0.1,
            phase: 0.0,
        }
    }
}

impl EffectParamSet for DistortionParams {
    const SPECS: &'static [ParamSpec] = &[
        ParamSpec::new("amplitude", 0.0, 50.0, 0.5),
        ParamSpec::new("frequency", 0.0, 1.0, 0.01),
        ParamSpec::new("phase", 0.0, 360.0, 1.0),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        Some(match name {
            "amplitude" => self.amplitude,
            "frequency" => self.frequency,
            "phase" => self.phase,
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "amplitude" => &mut self.amplitude,
            "frequency" => &mut self.frequency,
            "phase" => &mut self.phase,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Parameters of the Outline effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlineParams {
    /// Stroke width.
    pub thickness: f64,
    /// Join/cap family.
    pub style: OutlineStyle,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            style: OutlineStyle::Round,
        }
    }
}

impl EffectParamSet for OutlineParams {
    const SPECS: &'static [ParamSpec] = &[ParamSpec::new("thickness", 0.0, 20.0, 0.5)];

    fn get(&self, name: &str) -> Option<f64> {
        (name == "thickness").then_some(self.thickness)
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        if name != "thickness" {
            return false;
        }
        self.thickness = value;
        true
    }
}

/// Parameters of the Subdivide effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubdivideParams {
    /// Lines per segment. Rounded when applied.
    pub subdivisions: f64,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self { subdivisions: 4.0 }
    }
}

impl EffectParamSet for SubdivideParams {
    const SPECS: &'static [ParamSpec] = &[ParamSpec::new("subdivisions", 1.0, 16.0, 1.0)];

    fn get(&self, name: &str) -> Option<f64> {
        (name == "subdivisions").then_some(self.subdivisions)
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        if name != "subdivisions" {
            return false;
        }
        self.subdivisions = value;
        true
    }
}

/// Parameters of the Color effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorParams {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation in percent.
    pub saturation: f64,
    /// Lightness in percent.
    pub lightness: f64,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            hue: 200.0,
            saturation: 80.0,
            lightness: 50.0,
        }
    }
}

impl EffectParamSet for ColorParams {
    const SPECS: &'static [ParamSpec] = &[
        ParamSpec::new("hue", 0.0, 360.0, 1.0),
        ParamSpec::new("saturation", 0.0, 100.0, 1.0),
        ParamSpec::new("lightness", 0.0, 100.0, 1.0),
    ];

    fn get(&self, name: &str) -> Option<f64> {
        Some(match name {
            "hue" => self.hue,
            "saturation" => self.saturation,
            "lightness" => self.lightness,
            _ => return None,
        })
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "hue" => &mut self.hue,
            "saturation" => &mut self.saturation,
            "lightness" => &mut self.lightness,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Kind-specific parameter record.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum EffectParams {
    /// See [`MultiplyParams`].
    Multiply(MultiplyParams),
    /// See [`DistortionParams`].
    Distortion(DistortionParams),
    /// See [`OutlineParams`].
    Outline(OutlineParams),
    /// See [`SubdivideParams`].
    Subdivide(SubdivideParams),
    /// See [`ColorParams`].
    Color(ColorParams),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            EffectParams::Multiply($p) => $body,
            EffectParams::Distortion($p) => $body,
            EffectParams::Outline($p) => $body,
            EffectParams::Subdivide($p) => $body,
            EffectParams::Color($p) => $body,
        }
    };
}

impl EffectParams {
    /// Default parameters for `kind`.
    pub fn defaults(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Multiply => Self::Multiply(MultiplyParams::default()),
            EffectKind::Distortion => Self::Distortion(DistortionParams::default()),
            EffectKind::Outline => Self::Outline(OutlineParams::default()),
            EffectKind::Subdivide => Self::Subdivide(SubdivideParams::default()),
            EffectKind::Color => Self::Color(ColorParams::default()),
        }
    }

    /// Kind of this record.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Multiply(_) => EffectKind::Multiply,
            Self::Distortion(_) => EffectKind::Distortion,
            Self::Outline(_) => EffectKind::Outline,
            Self::Subdivide(_) => EffectKind::Subdivide,
            Self::Color(_) => EffectKind::Color,
        }
    }

    /// See [`EffectParamSet::get`].
    pub fn get(&self, name: &str) -> Option<f64> {
        dispatch!(self, p => p.get(name))
    }

    /// See [`EffectParamSet::set`].
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        dispatch!(self, p => p.set(name, value))
    }

    /// See [`EffectParamSet::validate`].
    pub fn validate(&self) -> GlyphfxResult<()> {
        dispatch!(self, p => p.validate())
    }

    /// See [`EffectParamSet::clamp`].
    pub fn clamp(&mut self) {
        dispatch!(self, p => p.clamp())
    }

    fn from_json(kind: EffectKind, value: serde_json::Value) -> serde_json::Result<Self> {
        if value.is_null() {
            return Ok(Self::defaults(kind));
        }
        Ok(match kind {
            EffectKind::Multiply => Self::Multiply(serde_json::from_value(value)?),
            EffectKind::Distortion => Self::Distortion(serde_json::from_value(value)?),
            EffectKind::Outline => Self::Outline(serde_json::from_value(value)?),
            EffectKind::Subdivide => Self::Subdivide(serde_json::from_value(value)?),
            EffectKind::Color => Self::Color(serde_json::from_value(value)?),
        })
    }
}

/// One entry of the effect stack.
///
/// JSON form: `{"id", "type", "enabled", "parameters"}` with a lowercase `type`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "EffectDef")]
pub struct Effect {
    /// Stable identifier, the key of the animation map.
    pub id: String,
    /// Disabled effects are skipped by the pipeline.
    pub enabled: bool,
    /// Kind and parameters.
    pub params: EffectParams,
}

impl Effect {
    /// Enabled effect with the given parameters.
    pub fn new(id: impl Into<String>, params: EffectParams) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            params,
        }
    }

    /// Enabled effect of `kind` with default parameters.
    pub fn with_defaults(id: impl Into<String>, kind: EffectKind) -> Self {
        Self::new(id, EffectParams::defaults(kind))
    }

    /// Kind of this effect.
    pub fn kind(&self) -> EffectKind {
        self.params.kind()
    }
}

#[derive(serde::Serialize)]
struct EffectRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: EffectKind,
    enabled: bool,
    parameters: &'a EffectParams,
}

impl serde::Serialize for Effect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EffectRef {
            id: &self.id,
            kind: self.kind(),
            enabled: self.enabled,
            parameters: &self.params,
        }
        .serialize(serializer)
    }
}

#[derive(serde::Deserialize)]
struct EffectDef {
    id: String,
    #[serde(rename = "type")]
    kind: EffectKind,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    parameters: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl TryFrom<EffectDef> for Effect {
    type Error = serde_json::Error;

    fn try_from(def: EffectDef) -> Result<Self, Self::Error> {
        Ok(Self {
            params: EffectParams::from_json(def.kind, def.parameters)?,
            id: def.id,
            enabled: def.enabled,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/model.rs"]
mod tests;
