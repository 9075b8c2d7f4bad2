use std::io::Cursor;

use traitmix::{
    Category, Compositor, ImageCache, RenderOptions, SelectedLayers, Surface, TraitmixError,
};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "traitmix_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(dir: &std::path::Path, name: &str, width: u32, height: u32, px: [u8; 4]) {
    let raw = px.repeat(width as usize * height as usize);
    let img = image::RgbaImage::from_raw(width, height, raw).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join(name), &buf).unwrap();
}

fn assert_solid(surface: &Surface, px: [u8; 4]) {
    for chunk in surface.data.chunks_exact(4) {
        assert_eq!(chunk, px);
    }
}

#[test]
fn background_toggle_loads_but_does_not_paint() {
    let tmp = temp_dir("render_bg_toggle");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp, "bg.png", 1, 1, [255, 0, 0, 255]);
    write_png(&tmp, "base.png", 1, 1, [0, 0, 0, 0]);

    let mut sel = SelectedLayers::default();
    sel.set(Category::Background, "bg.png");
    sel.set(Category::Base, "base.png");

    let compositor = Compositor::new(ImageCache::with_root(&tmp));

    let without = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 2,
                include_background: false,
            },
        )
        .unwrap();
    assert_solid(&without, [0, 0, 0, 0]);
    // Resolved even though unpainted, so the next toggle is a cache hit.
    assert_eq!(compositor.cache().decode_count("bg.png"), 1);

    let with = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 2,
                include_background: true,
            },
        )
        .unwrap();
    assert_solid(&with, [255, 0, 0, 255]);
    assert_eq!(compositor.cache().decode_count("bg.png"), 1);
    assert_ne!(without.data, with.data);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_layer_is_dropped_not_fatal() {
    let tmp = temp_dir("render_missing_layer");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp, "base.png", 2, 2, [0, 255, 0, 255]);

    let mut sel = SelectedLayers::default();
    sel.set(Category::Base, "base.png");
    sel.set(Category::Eyes, "missing.png");

    let compositor = Compositor::new(ImageCache::with_root(&tmp));
    let surface = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 2,
                include_background: true,
            },
        )
        .unwrap();

    assert_solid(&surface, [0, 255, 0, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn clipped_accessory_draws_right_half_only() {
    let tmp = temp_dir("render_clip");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp, "base.png", 1, 1, [0, 0, 0, 0]);
    write_png(&tmp, "turtle_goggles.png", 1, 1, [0, 0, 255, 255]);
    write_png(&tmp, "knight_helm.png", 1, 1, [0, 0, 0, 0]);

    let mut sel = SelectedLayers::default();
    sel.set(Category::Base, "base.png");
    sel.set(Category::Eyes, "turtle_goggles.png");
    sel.set(Category::Head, "knight_helm.png");

    let compositor = Compositor::new(ImageCache::with_root(&tmp));
    let surface = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 4,
                include_background: true,
            },
        )
        .unwrap();

    // The goggles sit beside the helmet: left columns stay empty, right
    // columns carry the accessory.
    for row in surface.data.chunks_exact(4 * 4) {
        assert_eq!(&row[0..8], &[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&row[8..16], &[0, 0, 255, 255, 0, 0, 255, 255]);
    }

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn layers_draw_back_to_front() {
    let tmp = temp_dir("render_depth_order");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp, "bg.png", 2, 2, [255, 0, 0, 255]);
    write_png(&tmp, "base.png", 2, 2, [0, 255, 0, 255]);
    write_png(&tmp, "hat.png", 2, 2, [0, 0, 255, 255]);

    let mut sel = SelectedLayers::default();
    sel.set(Category::Background, "bg.png");
    sel.set(Category::Base, "base.png");
    sel.set(Category::Head, "hat.png");

    let compositor = Compositor::new(ImageCache::with_root(&tmp));
    let surface = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 2,
                include_background: true,
            },
        )
        .unwrap();

    // The head is the closest opaque layer, so it wins every pixel.
    assert_solid(&surface, [0, 0, 255, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn zero_size_render_is_fatal() {
    let compositor = Compositor::new(ImageCache::with_root("."));
    let mut sel = SelectedLayers::default();
    sel.set(Category::Base, "base.png");

    let err = compositor
        .render(
            &sel,
            &RenderOptions {
                size: 0,
                include_background: true,
            },
        )
        .unwrap_err();
    assert!(matches!(err, TraitmixError::Validation(_)));
}

#[test]
fn repeated_renders_are_identical() {
    let tmp = temp_dir("render_repeat");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp, "base.png", 1, 1, [40, 80, 120, 200]);
    write_png(&tmp, "mask.png", 1, 1, [10, 20, 30, 90]);

    let mut sel = SelectedLayers::default();
    sel.set(Category::Base, "base.png");
    sel.set(Category::Mask, "mask.png");

    let compositor = Compositor::new(ImageCache::with_root(&tmp));
    let options = RenderOptions {
        size: 3,
        include_background: true,
    };
    let a = compositor.render(&sel, &options).unwrap();
    let b = compositor.render(&sel, &options).unwrap();
    assert_eq!(a, b);

    std::fs::remove_dir_all(&tmp).ok();
}
