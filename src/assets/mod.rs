//! Layer asset loading: byte access, decode, and the memoizing image cache.

/// The image cache, loader trait, and source path normalization.
pub mod cache;
/// Bitmap decoding into premultiplied RGBA8.
pub mod decode;

pub use cache::{FsImageLoader, ImageCache, ImageLoader, normalize_source};
pub use decode::{LayerImage, decode_image};
