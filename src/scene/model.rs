use crate::foundation::core::{Affine, Rect};
use crate::path::command::PathCommand;
use crate::path::convert::bounds;

/// Fill or stroke paint: nothing, or a CSS color string.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Paint {
    /// `none`.
    #[default]
    None,
    /// Any CSS color (`red`, `#ff0000`, `hsl(0, 100%, 50%)`).
    Color(String),
}

impl Paint {
    /// Paint with a CSS color string.
    pub fn color(c: impl Into<String>) -> Self {
        let c = c.into();
        if c.trim().eq_ignore_ascii_case("none") {
            Self::None
        } else {
            Self::Color(c)
        }
    }

    /// Whether the paint draws anything.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The color string, if any.
    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Color(c) => Some(c),
        }
    }
}

impl From<String> for Paint {
    fn from(s: String) -> Self {
        Self::color(s)
    }
}

impl From<Paint> for String {
    fn from(p: Paint) -> Self {
        p.to_string()
    }
}

impl std::fmt::Display for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Color(c) => f.write_str(c),
        }
    }
}

/// Stroke corner style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corners.
    #[default]
    Miter,
    /// Rounded corners.
    Round,
    /// Cut corners.
    Bevel,
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat, flush with the endpoint.
    #[default]
    Butt,
    /// Half-disc.
    Round,
    /// Flat, extended by half the width.
    Square,
}

/// Whether stroke or fill is painted first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintOrder {
    /// Fill, then stroke on top.
    #[default]
    FillStroke,
    /// Stroke, then fill on top (stroke renders behind).
    StrokeFill,
}

/// Presentation attributes of one outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Interior paint.
    pub fill: Paint,
    /// Stroke paint.
    pub stroke: Paint,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Corner style.
    pub line_join: LineJoin,
    /// End style.
    pub line_cap: LineCap,
    /// Stroke/fill ordering.
    pub paint_order: PaintOrder,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::None,
            stroke_width: 1.0,
            line_join: LineJoin::default(),
            line_cap: LineCap::default(),
            paint_order: PaintOrder::default(),
        }
    }
}

impl Style {
    /// Solid fill, no stroke.
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Paint::color(color),
            ..Self::default()
        }
    }

    /// Hairline stroke, no fill.
    pub fn wireframe(color: impl Into<String>) -> Self {
        Self {
            stroke: Paint::color(color),
            stroke_width: 1.0,
            ..Self::default()
        }
    }

    /// Half the stroke width when a stroke is painted, zero otherwise.
    pub fn stroke_extent(&self) -> f64 {
        if self.stroke.is_none() || !self.stroke_width.is_finite() {
            0.0
        } else {
            self.stroke_width.max(0.0) / 2.0
        }
    }
}

/// A single path with its styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outline {
    /// Geometry in scene units.
    pub commands: Vec<PathCommand>,
    /// Presentation.
    pub style: Style,
}

impl Outline {
    /// Outline with the given geometry and style.
    pub fn new(commands: Vec<PathCommand>, style: Style) -> Self {
        Self { commands, style }
    }

    /// Bounds under `affine`, grown by half the stroke width.
    pub fn painted_bounds(&self, affine: Affine) -> Option<Rect> {
        let r = bounds(&self.commands, affine)?;
        let e = self.style.stroke_extent();
        Some(r.inflate(e, e))
    }
}

/// One painted copy of a character's outlines.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Outlines painted in order.
    pub outlines: Vec<Outline>,
    /// Placement applied to every outline.
    pub transform: Affine,
    /// Group opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Layer {
    /// Untransformed, fully opaque layer.
    pub fn new(outlines: Vec<Outline>) -> Self {
        Self {
            outlines,
            transform: Affine::IDENTITY,
            opacity: 1.0,
        }
    }
}

/// Everything drawn for one input character. `layers[0]` paints first (back-most).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharGroup {
    /// Source character.
    pub ch: char,
    /// Painted copies, back to front.
    pub layers: Vec<Layer>,
}

impl CharGroup {
    /// Group holding a single untransformed layer.
    pub fn new(ch: char, outlines: Vec<Outline>) -> Self {
        Self {
            ch,
            layers: vec![Layer::new(outlines)],
        }
    }

    /// Union of the painted bounds of every outline in every layer.
    ///
    /// Outlines without finite bounds do not contribute.
    pub fn bounds(&self) -> Option<Rect> {
        union_all(self.layers.iter().flat_map(|layer| {
            layer
                .outlines
                .iter()
                .filter_map(move |o| o.painted_bounds(layer.transform))
        }))
    }
}

/// A fully styled set of character outlines.
///
/// Scenes are values: effect stages take one by reference and return a new one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Characters in input order.
    pub groups: Vec<CharGroup>,
    /// Color used where an effect needs a paint and the outline has none.
    pub foreground: String,
}

impl Scene {
    /// Empty scene.
    pub fn new(foreground: impl Into<String>) -> Self {
        Self {
            groups: Vec::new(),
            foreground: foreground.into(),
        }
    }

    /// Union of every group's painted bounds.
    pub fn bounds(&self) -> Option<Rect> {
        union_all(self.groups.iter().filter_map(CharGroup::bounds))
    }

    /// Copy of the scene with `f` applied to every outline.
    pub fn map_outlines(&self, mut f: impl FnMut(&Outline) -> Outline) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .map(|g| CharGroup {
                    ch: g.ch,
                    layers: g
                        .layers
                        .iter()
                        .map(|l| Layer {
                            outlines: l.outlines.iter().map(&mut f).collect(),
                            transform: l.transform,
                            opacity: l.opacity,
                        })
                        .collect(),
                })
                .collect(),
            foreground: self.foreground.clone(),
        }
    }

    /// Number of outlines across all groups and layers.
    pub fn outline_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.layers)
            .map(|l| l.outlines.len())
            .sum()
    }
}

fn union_all(rects: impl Iterator<Item = Rect>) -> Option<Rect> {
    rects.reduce(|a, b| a.union(b))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
