//! Project files describing text, font, effect stack, animations and export settings.

/// JSON project files.
pub mod project;
