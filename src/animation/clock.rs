use std::time::Instant;

use crate::animation::anim::{EffectAnimations, any_enabled};
use crate::foundation::core::{Affine, Vec2};

/// Live-preview clock.
///
/// The host calls [`PlaybackClock::tick`] once per display refresh. While at least one animation
/// is enabled the clock reports seconds since it was anchored; when none is, it returns `None`
/// and the host stops scheduling ticks.
#[derive(Clone, Debug, Default)]
pub struct PlaybackClock {
    anchor: Option<Instant>,
}

impl PlaybackClock {
    /// Idle clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed seconds for this refresh, or `None` when nothing is animated.
    ///
    /// The anchor is set on the first tick after an idle period, so playback restarts from 0.
    pub fn tick(&mut self, now: Instant, animations: &EffectAnimations) -> Option<f64> {
        if !any_enabled(animations) {
            if self.anchor.take().is_some() {
                tracing::debug!("playback stopped");
            }
            return None;
        }
        let anchor = *self.anchor.get_or_insert_with(|| {
            tracing::debug!("playback started");
            now
        });
        Some(now.saturating_duration_since(anchor).as_secs_f64())
    }

    /// Whether the clock is currently anchored.
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Viewer-only zoom and pan, plus the preview clock. Never affects exported frames.
#[derive(Clone, Debug)]
pub struct ViewState {
    /// Scale factor around the canvas center.
    pub zoom: f64,
    /// Offset in canvas pixels, applied after zoom.
    pub pan: Vec2,
    /// Preview clock.
    pub clock: PlaybackClock,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            clock: PlaybackClock::new(),
        }
    }
}

impl ViewState {
    /// Smallest allowed zoom.
    pub const MIN_ZOOM: f64 = 0.1;
    /// Largest allowed zoom.
    pub const MAX_ZOOM: f64 = 10.0;

    /// Multiply the zoom by `factor`, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        }
    }

    /// Shift the view by `delta` canvas pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.pan += delta;
        }
    }

    /// Back to zoom 1 and no pan. The clock is left alone.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
    }

    /// Canvas-space transform for a `width x height` canvas: zoom about the center, then pan.
    pub fn affine(&self, width: f64, height: f64) -> Affine {
        let center = Vec2::new(width / 2.0, height / 2.0);
        Affine::translate(center + self.pan) * Affine::scale(self.zoom) * Affine::translate(-center)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
