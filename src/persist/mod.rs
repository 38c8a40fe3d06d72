//! Saved effect stacks, animations and presets.

/// Key-value stores and typed persistence on top of them.
pub mod store;
