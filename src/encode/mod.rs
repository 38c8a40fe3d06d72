//! Palette quantization and animation encoding.

/// Looping GIF output.
pub mod gif;
/// RGBA to indexed palette conversion.
pub mod quantize;
/// Sink abstraction for indexed animation frames.
pub mod sink;
