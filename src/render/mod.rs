//! CPU rasterization: pixel blending, the canvas surface, and the compositor
//! that ties the rule engine and image cache together.

/// Premultiplied pixel blend primitives.
pub mod composite;
/// The compositor entry point and its options.
pub mod compositor;
/// The premultiplied RGBA8 canvas.
pub mod surface;

pub use compositor::{Compositor, RenderOptions};
pub use surface::Surface;
