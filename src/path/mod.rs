//! Path command model, curve sampling and polyline subdivision.

/// Path commands, parsing and serialization.
pub mod command;
/// Absolutizing, transforming and bounding command lists.
pub mod convert;
/// Point and tangent evaluation of segments.
pub mod sample;
/// Curve flattening into line segments.
pub mod subdivide;
