use std::path::Path;

use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::glyph::provider::{GlyphOutline, GlyphOutlineProvider};
use crate::path::command::PathCommand;

/// TrueType/OpenType font read with `ttf-parser`.
///
/// Holds the font bytes and re-parses the face table directory per lookup.
#[derive(Clone, Debug)]
pub struct TtfOutlineProvider {
    data: Vec<u8>,
    units_per_em: f64,
}

impl TtfOutlineProvider {
    /// Load a font file.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphfxResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            GlyphfxError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(data)
    }

    /// Use in-memory font data (face index 0).
    pub fn from_bytes(data: Vec<u8>) -> GlyphfxResult<Self> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| GlyphfxError::font(format!("failed to parse font: {e}")))?;
        let units_per_em = f64::from(face.units_per_em());
        Ok(Self { data, units_per_em })
    }

    fn face(&self) -> GlyphfxResult<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0)
            .map_err(|e| GlyphfxError::font(format!("failed to parse font: {e}")))
    }
}

impl GlyphOutlineProvider for TtfOutlineProvider {
    fn units_per_em(&self) -> f64 {
        self.units_per_em
    }

    fn glyph(&self, ch: char) -> GlyphfxResult<Option<GlyphOutline>> {
        let face = self.face()?;
        let Some(id) = face.glyph_index(ch) else {
            return Ok(None);
        };
        let mut builder = CommandBuilder::default();
        // Blank glyphs have no outline but still advance.
        let _ = face.outline_glyph(id, &mut builder);
        let advance = face
            .glyph_hor_advance(id)
            .map(f64::from)
            .unwrap_or(self.units_per_em / 2.0);
        Ok(Some(GlyphOutline {
            commands: builder.commands,
            advance,
            units_per_em: self.units_per_em,
        }))
    }
}

/// Collects `ttf-parser` outline callbacks as absolute path commands in design units.
#[derive(Debug, Default)]
pub(crate) struct CommandBuilder {
    pub(crate) commands: Vec<PathCommand>,
}

impl ttf_parser::OutlineBuilder for CommandBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands
            .push(PathCommand::move_to(f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands
            .push(PathCommand::line_to(f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::quad_to(
            f64::from(x1),
            f64::from(y1),
            f64::from(x),
            f64::from(y),
        ));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::curve_to(
            f64::from(x1),
            f64::from(y1),
            f64::from(x2),
            f64::from(y2),
            f64::from(x),
            f64::from(y),
        ));
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::close());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/ttf.rs"]
mod tests;
