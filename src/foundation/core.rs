pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

use crate::foundation::error::{GlyphfxError, GlyphfxResult};

/// Output raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Both sides must fit the GIF logical screen (`u16`).
    pub fn new(width: u32, height: u32) -> GlyphfxResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphfxError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(GlyphfxError::validation(format!(
                "canvas {width}x{height} exceeds {max}x{max}",
                max = u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Scene-space rectangle the renderer maps onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, always > 0.
    pub width: f64,
    /// Height, always > 0.
    pub height: f64,
}

impl Viewport {
    /// Viewport used when nothing in the scene has a finite bound.
    pub const DEFAULT: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Build a viewport from a rect grown by `padding` on every side.
    ///
    /// Returns `None` for non-finite or empty rects.
    pub fn from_rect(rect: Rect, padding: f64) -> Option<Self> {
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let r = rect.inflate(padding, padding);
        if !r.is_finite() || r.width() <= 0.0 || r.height() <= 0.0 {
            return None;
        }
        Some(Self {
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        })
    }

    /// The viewport as a kurbo rect.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Affine mapping this viewport into a `width x height` canvas, preserving aspect ratio and
    /// centering the content (`xMidYMid meet`).
    pub fn fit_affine(self, width: f64, height: f64) -> Affine {
        let s = (width / self.width).min(height / self.height);
        let tx = (width - self.width * s) / 2.0 - self.x * s;
        let ty = (height - self.height * s) / 2.0 - self.y * s;
        Affine::new([s, 0.0, 0.0, s, tx, ty])
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
