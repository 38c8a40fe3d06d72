//! Glyphfx turns text into per-glyph vector outlines, runs them through a stack of path
//! effects, animates effect parameters over time and exports the result as a looping GIF.
//!
//! - Lay text out with a [`GlyphOutlineProvider`] and apply an effect list with
//!   [`render_frame`]
//! - Rasterize a [`Frame`] with [`rasterize`] or write it as SVG with [`Frame::to_svg`]
//! - Sample animated parameters per frame and encode with [`export_animation`] or
//!   [`ExportJob::run`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Parameter animation over time.
pub mod animation;
/// Project files.
pub mod config;
/// Scene-to-scene path effects.
pub mod effects;
/// Palette quantization and GIF encoding.
pub mod encode;
/// Animated export.
pub mod export;
/// Glyph outline providers.
pub mod glyph;
/// Path command model.
pub mod path;
/// Saved state.
pub mod persist;
/// Frames, rasterization and SVG.
pub mod render;
/// Styled outline scenes.
pub mod scene;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{GlyphfxError, GlyphfxResult};

pub use crate::animation::anim::{AnimationConfig, EffectAnimations, resolve_effects};
pub use crate::config::project::ProjectConfig;
pub use crate::effects::model::{Effect, EffectKind, EffectParams};
pub use crate::effects::pipeline::apply_effects;
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{AnimationSink, InMemorySink};
pub use crate::export::pipeline::{
    ExportHost, ExportJob, ExportOpts, ExportSlot, NoopHost, export_animation,
};
pub use crate::glyph::provider::{GlyphOutline, GlyphOutlineProvider, MemoryOutlineProvider};
pub use crate::glyph::ttf::TtfOutlineProvider;
pub use crate::render::cpu::{FrameRGBA, rasterize};
pub use crate::render::frame::{Frame, RenderOpts, render_frame};
pub use crate::scene::model::Scene;
