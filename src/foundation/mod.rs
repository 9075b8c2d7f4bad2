//! Shared primitives used by every stage of the pipeline.

/// Core value types (premultiplied color, clip geometry re-exports).
pub mod core;
/// Crate-wide error and result types.
pub mod error;
