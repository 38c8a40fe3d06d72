//! Frame sampling and animated export.

/// Export job, host callbacks and the single-export slot.
pub mod pipeline;
