use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::animation::anim::{EffectAnimations, retain_declared};
use crate::effects::model::Effect;
use crate::export::pipeline::ExportOpts;
use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::render::frame::RenderOpts;

/// A complete project: what to draw, with which font, and how to export it.
///
/// ```json
/// {
///   "text": "Hi",
///   "font": "fonts/Inter.ttf",
///   "fontSize": 72,
///   "effects": [{ "id": "c", "type": "color", "parameters": { "hue": 120 } }],
///   "animations": { "c": { "hue": { "enabled": true, "min": 0, "max": 360 } } },
///   "export": { "width": 400, "height": 200, "fps": 15, "duration": 2 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Text to lay out.
    pub text: String,
    /// Font file, relative paths resolve against the project file's directory.
    pub font: Option<PathBuf>,
    /// Draw hairline outlines instead of filled glyphs.
    pub wireframe: bool,
    /// Em size in scene units.
    pub font_size: f64,
    /// Viewport padding in scene units.
    pub padding: f64,
    /// Effect stack, applied in order.
    pub effects: Vec<Effect>,
    /// Parameter animations keyed by effect id.
    pub animations: EffectAnimations,
    /// Export settings.
    pub export: ExportOpts,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let render = RenderOpts::default();
        Self {
            text: String::new(),
            font: None,
            wireframe: false,
            font_size: render.font_size,
            padding: render.padding,
            effects: Vec::new(),
            animations: EffectAnimations::new(),
            export: ExportOpts::default(),
        }
    }
}

impl ProjectConfig {
    /// Read a project file. A relative `font` is resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("failed to open project '{}'", path.display()))?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(font) = cfg.font.take() {
            cfg.font = Some(match path.parent() {
                Some(dir) if font.is_relative() => dir.join(font),
                _ => font,
            });
        }
        Ok(cfg)
    }

    /// Parse a project from JSON.
    ///
    /// Effect parameters are clamped into their declared ranges and animations of
    /// undeclared parameters are dropped.
    pub fn from_reader(reader: impl Read) -> GlyphfxResult<Self> {
        let mut cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| GlyphfxError::serde(format!("invalid project JSON: {e}")))?;
        cfg.normalize()?;
        Ok(cfg)
    }

    fn normalize(&mut self) -> GlyphfxResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(GlyphfxError::validation("fontSize must be finite and > 0"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(GlyphfxError::validation("padding must be finite and >= 0"));
        }
        for (i, e) in self.effects.iter().enumerate() {
            if self.effects[..i].iter().any(|prev| prev.id == e.id) {
                return Err(GlyphfxError::validation(format!(
                    "duplicate effect id '{}'",
                    e.id
                )));
            }
        }
        for e in &mut self.effects {
            e.params.clamp();
        }
        let dropped = retain_declared(&mut self.animations, &self.effects);
        if dropped > 0 {
            tracing::warn!(dropped, "ignoring animations of undeclared parameters");
        }
        Ok(())
    }

    /// Layout options for single-frame rendering.
    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            font_size: self.font_size,
            padding: self.padding,
            foreground: self.export.foreground.clone(),
        }
    }

    /// Export settings with the project's layout filled in.
    pub fn export_opts(&self) -> ExportOpts {
        ExportOpts {
            font_size: self.font_size,
            padding: self.padding,
            ..self.export.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/project.rs"]
mod tests;
