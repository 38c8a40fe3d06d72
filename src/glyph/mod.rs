//! Glyph outline acquisition.

/// Outline provider trait and an in-memory implementation.
pub mod provider;
/// TrueType/OpenType outline provider.
pub mod ttf;
