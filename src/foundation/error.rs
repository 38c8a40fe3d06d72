/// Crate-wide result alias.
pub type GlyphfxResult<T> = Result<T, GlyphfxError>;

/// Errors surfaced to callers.
///
/// Malformed path text, degenerate tangents and degenerate bounding boxes are recovered locally
/// and never reach this type. Only unrecoverable conditions (missing font, failed export,
/// invalid configuration) do.
#[derive(thiserror::Error, Debug)]
pub enum GlyphfxError {
    /// Invalid configuration or input that cannot be degraded to a safe default.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font resource could not be loaded or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Palette quantization or animation encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The host asked the export loop to stop at a yield point.
    #[error("export cancelled after {frames_done} of {frames_total} frames")]
    Cancelled {
        /// Frames fully pushed to the sink before cancellation.
        frames_done: u64,
        /// Frames the export was going to produce.
        frames_total: u64,
    },

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphfxError {
    /// Build a [`GlyphfxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphfxError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`GlyphfxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlyphfxError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GlyphfxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
