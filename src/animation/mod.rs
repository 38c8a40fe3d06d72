//! Time-driven parameter animation.

/// Animation configs and per-frame parameter resolution.
pub mod anim;
/// Playback clock and interactive view state.
pub mod clock;
/// Easing curves.
pub mod ease;
