//! Frame construction, rasterization and SVG output.

/// CPU rasterization.
pub mod cpu;
/// Text layout, effect application and viewport fitting.
pub mod frame;
/// SVG document output.
pub mod svg;
