//! The layer rule engine: depth table plus the two-phase layer builder.

/// Named depth constants for every base and virtual slot.
pub mod depth;
/// Phase A category pass and the Phase B virtual-layer table.
pub mod engine;

pub use engine::build_render_layers;
