use std::{io::Cursor, path::PathBuf};

use traitmix::{
    Category, Compositor, ExportFormat, ExportOptions, ExportSize, ImageCache, SelectedLayers,
    export_image,
};

fn write_png(dir: &std::path::Path, name: &str, px: [u8; 4]) -> anyhow::Result<()> {
    let img = image::RgbaImage::from_raw(1, 1, px.to_vec())
        .ok_or_else(|| anyhow::anyhow!("fixture buffer mismatch"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    std::fs::write(dir.join(name), &buf)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let dir = PathBuf::from("target").join("compose_preview");
    std::fs::create_dir_all(&dir)?;

    // Tiny stand-in art; real trait sheets are full-resolution squares.
    write_png(&dir, "bg_blue.png", [40, 80, 200, 255])?;
    write_png(&dir, "wojak_classic.png", [240, 200, 160, 255])?;
    write_png(&dir, "astronaut_white.png", [230, 230, 230, 255])?;
    write_png(&dir, "bandana_red.png", [200, 30, 30, 255])?;
    write_png(&dir, "laser_eyes.png", [255, 0, 0, 180])?;
    write_png(&dir, "knight_dark.png", [60, 60, 70, 255])?;
    write_png(&dir, "knight_dark_masked.png", [50, 50, 60, 255])?;

    let mut selection = SelectedLayers::default();
    selection.set(Category::Background, "bg_blue.png");
    selection.set(Category::Base, "wojak_classic.png");
    selection.set(Category::Clothes, "astronaut_white.png");
    selection.set(Category::Mask, "bandana_red.png");
    selection.set(Category::Eyes, "laser_eyes.png");
    selection.set(Category::Head, "knight_dark.png");

    for layer in traitmix::build_render_layers(&selection) {
        println!("{:>6.2}  {:<12}  {}", layer.depth, format!("{:?}", layer.origin), layer.source);
    }

    let compositor = Compositor::new(ImageCache::with_root(&dir));
    let exported = export_image(
        &compositor,
        &selection,
        &ExportOptions {
            size: ExportSize::Preview,
            format: ExportFormat::Png,
            quality: 0.92,
            include_background: true,
        },
    )?;

    let out = dir.join(&exported.suggested_name);
    std::fs::write(&out, &exported.bytes)?;
    println!("wrote {} ({} bytes)", out.display(), exported.bytes.len());
    Ok(())
}
