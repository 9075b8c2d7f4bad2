use std::borrow::Cow;

use image::imageops;

use crate::{
    assets::decode::LayerImage,
    foundation::error::{TraitmixError, TraitmixResult},
    model::ClipRegion,
    render::composite,
};

/// Premultiplied RGBA8 canvas the compositor draws into.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    /// Row-major premultiplied RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent canvas. Zero-sized surfaces are rejected.
    pub fn new(width: u32, height: u32) -> TraitmixResult<Self> {
        if width == 0 || height == 0 {
            return Err(TraitmixError::validation(
                "surface dimensions must be non-zero",
            ));
        }
        let len = width as usize * height as usize * 4;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Blit one layer over the canvas, scaled to cover it fully, honoring
    /// the layer's clip columns.
    pub fn draw_layer(&mut self, image: &LayerImage, clip: ClipRegion) -> TraitmixResult<()> {
        let scaled = scale_to_canvas(image, self.width, self.height)?;
        let (x0, x1) = clip_columns(clip, self.width);
        if x0 >= x1 {
            return Ok(());
        }

        let row_bytes = self.width as usize * 4;
        let seg = x0 as usize * 4..x1 as usize * 4;
        for (dst_row, src_row) in self
            .data
            .chunks_exact_mut(row_bytes)
            .zip(scaled.chunks_exact(row_bytes))
        {
            composite::over_in_place(&mut dst_row[seg.clone()], &src_row[seg.clone()], 1.0)?;
        }
        Ok(())
    }

    /// Copy out as straight-alpha RGBA8 for encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        composite::unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

fn scale_to_canvas(image: &LayerImage, width: u32, height: u32) -> TraitmixResult<Cow<'_, [u8]>> {
    if image.width == width && image.height == height {
        return Ok(Cow::Borrowed(image.rgba8_premul.as_slice()));
    }

    let src = image::RgbaImage::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_ref().clone(),
    )
    .ok_or_else(|| TraitmixError::render("layer pixel buffer does not match its dimensions"))?;
    let resized = imageops::resize(&src, width, height, imageops::FilterType::Triangle);
    Ok(Cow::Owned(resized.into_raw()))
}

fn clip_columns(clip: ClipRegion, size: u32) -> (u32, u32) {
    let rect = clip.to_rect(size);
    let x0 = (rect.x0.max(0.0).floor() as u32).min(size);
    let x1 = (rect.x1.min(f64::from(size)).ceil() as u32).min(size);
    (x0, x1)
}
