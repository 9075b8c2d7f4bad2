//! Sized, encoded outputs: size presets, PNG/JPEG/WebP encoding, inline
//! data URLs and suggested download names.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ExtendedColorType;

use crate::{
    foundation::{
        core::Rgba8Premul,
        error::{TraitmixError, TraitmixResult},
    },
    model::{Category, SelectedLayers},
    render::{Compositor, RenderOptions, Surface, composite},
};

/// Named output sizes. `Custom` carries the caller's pixel side unchecked; a
/// zero surfaces as the render validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSize {
    Preview,
    Thumb,
    Full,
    Custom(u32),
}

impl ExportSize {
    /// Pixel side of the square output.
    pub fn px(self) -> u32 {
        match self {
            ExportSize::Preview => 480,
            ExportSize::Thumb => 160,
            ExportSize::Full => 2400,
            ExportSize::Custom(px) => px,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Png,
    Jpeg,
    #[serde(rename = "webp")]
    WebP,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }
}

/// Options for [`export_image`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    pub size: ExportSize,
    pub format: ExportFormat,
    /// JPEG quality in `0.0..=1.0`; the lossless formats ignore it.
    pub quality: f32,
    pub include_background: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            size: ExportSize::Full,
            format: ExportFormat::Png,
            quality: 0.92,
            include_background: true,
        }
    }
}

/// Encoded output plus the metadata a download needs.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub suggested_name: String,
}

/// Render a selection at the requested size and encode it.
#[tracing::instrument(skip(compositor, selection))]
pub fn export_image(
    compositor: &Compositor,
    selection: &SelectedLayers,
    options: &ExportOptions,
) -> TraitmixResult<ExportedImage> {
    let render_options = RenderOptions {
        size: options.size.px(),
        include_background: options.include_background,
    };
    let surface = compositor.render(selection, &render_options)?;
    let bytes = encode_surface(&surface, options.format, options.quality)?;
    Ok(ExportedImage {
        bytes,
        mime: options.format.mime(),
        suggested_name: suggested_file_name(selection, options.format),
    })
}

/// Encode an already rendered surface. PNG and WebP keep straight alpha;
/// JPEG flattens over opaque white first.
pub fn encode_surface(
    surface: &Surface,
    format: ExportFormat,
    quality: f32,
) -> TraitmixResult<Vec<u8>> {
    match format {
        ExportFormat::Png => encode_png(surface),
        ExportFormat::Jpeg => encode_jpeg(surface, quality),
        ExportFormat::WebP => encode_webp(surface),
    }
}

/// Inline `data:` URL preview of a render, sized and encoded per options.
pub fn render_data_url(
    compositor: &Compositor,
    selection: &SelectedLayers,
    options: &ExportOptions,
) -> TraitmixResult<String> {
    let exported = export_image(compositor, selection, options)?;
    Ok(format!(
        "data:{};base64,{}",
        exported.mime,
        BASE64.encode(&exported.bytes)
    ))
}

/// Download name derived from the base selection's file stem.
pub fn suggested_file_name(selection: &SelectedLayers, format: ExportFormat) -> String {
    let stem = selection.get(Category::Base).and_then(|source| {
        let file = source.rsplit(['/', '\\']).next()?;
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
        (!stem.is_empty()).then(|| stem.to_string())
    });
    match stem {
        Some(stem) => format!("avatar_{stem}.{}", format.extension()),
        None => format!("avatar.{}", format.extension()),
    }
}

fn encode_png(surface: &Surface) -> TraitmixResult<Vec<u8>> {
    let rgba =
        image::RgbaImage::from_raw(surface.width, surface.height, surface.to_straight_rgba())
            .ok_or_else(|| TraitmixError::encode("surface buffer does not match its dimensions"))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| TraitmixError::encode(format!("encode png: {e}")))?;
    Ok(bytes)
}

fn encode_jpeg(surface: &Surface, quality: f32) -> TraitmixResult<Vec<u8>> {
    let rgb = flatten_over(surface, Rgba8Premul::WHITE);
    let img = image::RgbImage::from_raw(surface.width, surface.height, rgb)
        .ok_or_else(|| TraitmixError::encode("surface buffer does not match its dimensions"))?;

    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
        Cursor::new(&mut bytes),
        jpeg_quality(quality),
    );
    encoder
        .encode_image(&img)
        .map_err(|e| TraitmixError::encode(format!("encode jpeg: {e}")))?;
    Ok(bytes)
}

fn encode_webp(surface: &Surface) -> TraitmixResult<Vec<u8>> {
    let straight = surface.to_straight_rgba();
    let mut bytes = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(Cursor::new(&mut bytes))
        .encode(
            &straight,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| TraitmixError::encode(format!("encode webp: {e}")))?;
    Ok(bytes)
}

/// Flatten premultiplied pixels over an opaque background, yielding RGB8.
fn flatten_over(surface: &Surface, background: Rgba8Premul) -> Vec<u8> {
    let bg = [background.r, background.g, background.b, background.a];
    let mut rgb = Vec::with_capacity(surface.width as usize * surface.height as usize * 3);
    for px in surface.data.chunks_exact(4) {
        let out = composite::over(bg, [px[0], px[1], px[2], px[3]], 1.0);
        rgb.extend_from_slice(&out[..3]);
    }
    rgb
}

/// Map the public `0.0..=1.0` quality to the JPEG encoder's `1..=100`.
fn jpeg_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as i32).clamp(1, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_quality_maps_to_the_encoder_scale() {
        assert_eq!(jpeg_quality(0.92), 92);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(7.0), 100);
        assert_eq!(jpeg_quality(-1.0), 1);
    }

    #[test]
    fn suggested_names_derive_from_the_base_stem() {
        let mut selection = SelectedLayers::default();
        selection.set(Category::Base, "traits/base/wojak_classic.png");
        assert_eq!(
            suggested_file_name(&selection, ExportFormat::Png),
            "avatar_wojak_classic.png"
        );
        assert_eq!(
            suggested_file_name(&selection, ExportFormat::Jpeg),
            "avatar_wojak_classic.jpg"
        );
    }

    #[test]
    fn suggested_names_fall_back_without_a_base() {
        let selection = SelectedLayers::default();
        assert_eq!(
            suggested_file_name(&selection, ExportFormat::WebP),
            "avatar.webp"
        );
    }

    #[test]
    fn size_presets_are_stable() {
        assert_eq!(ExportSize::Preview.px(), 480);
        assert_eq!(ExportSize::Thumb.px(), 160);
        assert_eq!(ExportSize::Full.px(), 2400);
        assert_eq!(ExportSize::Custom(64).px(), 64);
    }

    #[test]
    fn flatten_over_white_keeps_opaque_pixels() {
        let mut surface = Surface::new(1, 1).unwrap();
        surface.data.copy_from_slice(&[10, 20, 30, 255]);
        assert_eq!(flatten_over(&surface, Rgba8Premul::WHITE), vec![10, 20, 30]);
    }
}
