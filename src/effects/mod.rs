//! Effect stages: pure `Scene -> Scene` transforms applied in list order.

/// HSL recoloring.
pub mod color;
/// Wave displacement along path normals.
pub mod distortion;
/// Effect kinds, parameter records and their declared ranges.
pub mod model;
/// Offset, rotated, fading copies.
pub mod multiply;
/// Stroke styling.
pub mod outline;
/// Ordered application of an effect list.
pub mod pipeline;
/// Polyline subdivision of every outline.
pub mod subdivide;
