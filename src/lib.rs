//! Deterministic rule-based compositing for trait-layer avatar artwork.
//!
//! Given one selected asset per body-part category, `traitmix` produces a
//! single correctly layered raster even when trait combinations occlude each
//! other in content-dependent ways:
//!
//! 1. [`classify`] turns each selected source path into a closed per-category
//!    kind via case-insensitive substring matching, once per pass.
//! 2. [`rules`] applies per-category override rules, then a fixed ordered
//!    table of virtual-layer rules, and returns the depth-sorted layer list.
//! 3. [`render`] resolves every layer image through the memoizing
//!    [`ImageCache`] (parallel fan-out) and draws them in order onto a
//!    premultiplied RGBA8 [`Surface`].
//! 4. [`export`] encodes the surface to PNG, JPEG or lossless WebP, with
//!    data-URL and download-name helpers.
//!
//! Design constraints: no unsafe code, deterministic output for a given
//! selection, all I/O behind the injected [`ImageLoader`], premultiplied
//! alpha end to end until encode.

#![forbid(unsafe_code)]

pub mod assets;
pub mod classify;
pub mod export;
pub mod foundation;
pub mod model;
pub mod render;
pub mod rules;

pub use assets::{
    FsImageLoader, ImageCache, ImageLoader, LayerImage, decode_image, normalize_source,
};
pub use export::{
    ExportFormat, ExportOptions, ExportSize, ExportedImage, encode_surface, export_image,
    render_data_url, suggested_file_name,
};
pub use foundation::core::Rgba8Premul;
pub use foundation::error::{TraitmixError, TraitmixResult};
pub use model::{Category, ClipRegion, RenderLayer, SelectedLayers};
pub use render::{Compositor, RenderOptions, Surface};
pub use rules::{build_render_layers, depth};
