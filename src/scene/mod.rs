//! Styled per-character outline scenes.

/// CSS color parsing and formatting.
pub mod color;
/// Scene, group, layer and outline types.
pub mod model;
