use std::collections::HashMap;

use crate::foundation::error::GlyphfxResult;
use crate::path::command::PathCommand;

/// Outline of one character in font design units (y-up, origin on the baseline).
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphOutline {
    /// Outline commands. Empty for blank glyphs such as space.
    pub commands: Vec<PathCommand>,
    /// Horizontal advance.
    pub advance: f64,
    /// Design units per em of the source font.
    pub units_per_em: f64,
}

/// Source of per-character outlines.
pub trait GlyphOutlineProvider {
    /// Design units per em, used to scale outlines to the requested font size.
    fn units_per_em(&self) -> f64;

    /// Outline for `ch`, `Ok(None)` when the font has no glyph for it.
    ///
    /// Errors mean the font itself is unusable.
    fn glyph(&self, ch: char) -> GlyphfxResult<Option<GlyphOutline>>;
}

/// Provider backed by a fixed character table. Characters outside the table have no glyph.
#[derive(Clone, Debug, Default)]
pub struct MemoryOutlineProvider {
    units_per_em: f64,
    glyphs: HashMap<char, GlyphOutline>,
}

impl MemoryOutlineProvider {
    /// Empty table for a font with `units_per_em` design units.
    pub fn new(units_per_em: f64) -> Self {
        Self {
            units_per_em,
            glyphs: HashMap::new(),
        }
    }

    /// Register (or replace) the outline of `ch`.
    pub fn insert(&mut self, ch: char, commands: Vec<PathCommand>, advance: f64) -> &mut Self {
        self.glyphs.insert(
            ch,
            GlyphOutline {
                commands,
                advance,
                units_per_em: self.units_per_em,
            },
        );
        self
    }
}

impl GlyphOutlineProvider for MemoryOutlineProvider {
    fn units_per_em(&self) -> f64 {
        self.units_per_em
    }

    fn glyph(&self, ch: char) -> GlyphfxResult<Option<GlyphOutline>> {
        Ok(self.glyphs.get(&ch).cloned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/provider.rs"]
mod tests;
