use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::TraitmixResult;

/// A decoded trait layer, premultiplied and ready to blit.
///
/// The pixel buffer is shared behind an `Arc` so the cache and every render
/// holding the image stay cheap to clone.
#[derive(Clone, Debug)]
pub struct LayerImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode any format the `image` crate recognizes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> TraitmixResult<LayerImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(LayerImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
