use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "traitmix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a selection to a PNG file.
    Compose(ComposeArgs),
    /// Render and encode a selection for download (PNG/JPEG/WebP).
    Export(ExportArgs),
    /// Print the resolved layer list as JSON without rendering.
    Layers(LayersArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input selection JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root directory (defaults to the selection file's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Square output side in pixels.
    #[arg(long, default_value_t = 480)]
    size: u32,

    /// Leave the background layer out of the composite.
    #[arg(long)]
    no_background: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input selection JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root directory (defaults to the selection file's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output file path (defaults to the suggested download name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Named size preset.
    #[arg(long, value_enum, default_value_t = SizePreset::Full)]
    preset: SizePreset,

    /// Custom square side in pixels; overrides the preset.
    #[arg(long)]
    size: Option<u32>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// JPEG quality in 0..=1.
    #[arg(long, default_value_t = 0.92)]
    quality: f32,

    /// Leave the background layer out of the composite.
    #[arg(long)]
    no_background: bool,

    /// Print the SHA-256 of the encoded bytes.
    #[arg(long)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Input selection JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SizePreset {
    Preview,
    Thumb,
    Full,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
    Webp,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Export(args) => cmd_export(args),
        Command::Layers(args) => cmd_layers(args),
    }
}

fn read_selection_json(path: &Path) -> anyhow::Result<traitmix::SelectedLayers> {
    let f = File::open(path).with_context(|| format!("open selection '{}'", path.display()))?;
    let r = BufReader::new(f);
    let selection: traitmix::SelectedLayers =
        serde_json::from_reader(r).with_context(|| "parse selection JSON")?;
    Ok(selection)
}

fn assets_root(assets: Option<&Path>, in_path: &Path) -> PathBuf {
    match assets {
        Some(root) => root.to_path_buf(),
        None => in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    }
}

fn export_size(preset: SizePreset, custom: Option<u32>) -> traitmix::ExportSize {
    if let Some(px) = custom {
        return traitmix::ExportSize::Custom(px);
    }
    match preset {
        SizePreset::Preview => traitmix::ExportSize::Preview,
        SizePreset::Thumb => traitmix::ExportSize::Thumb,
        SizePreset::Full => traitmix::ExportSize::Full,
    }
}

fn export_format(choice: FormatChoice) -> traitmix::ExportFormat {
    match choice {
        FormatChoice::Png => traitmix::ExportFormat::Png,
        FormatChoice::Jpeg => traitmix::ExportFormat::Jpeg,
        FormatChoice::Webp => traitmix::ExportFormat::WebP,
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let selection = read_selection_json(&args.in_path)?;
    if !selection.has_required_selections() {
        eprintln!("warning: no base layer selected; output may be empty");
    }

    let root = assets_root(args.assets.as_deref(), &args.in_path);
    let compositor = traitmix::Compositor::new(traitmix::ImageCache::with_root(root));
    let options = traitmix::RenderOptions {
        size: args.size,
        include_background: !args.no_background,
    };
    let surface = compositor.render(&selection, &options)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &surface.to_straight_rgba(),
        surface.width,
        surface.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let selection = read_selection_json(&args.in_path)?;
    if !selection.has_required_selections() {
        eprintln!("warning: no base layer selected; output may be empty");
    }

    let root = assets_root(args.assets.as_deref(), &args.in_path);
    let compositor = traitmix::Compositor::new(traitmix::ImageCache::with_root(root));
    let options = traitmix::ExportOptions {
        size: export_size(args.preset, args.size),
        format: export_format(args.format),
        quality: args.quality,
        include_background: !args.no_background,
    };
    let exported = traitmix::export_image(&compositor, &selection, &options)?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&exported.suggested_name));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &exported.bytes)
        .with_context(|| format!("write {} '{}'", exported.mime, out.display()))?;

    if args.digest {
        eprintln!("sha256 {}", sha256_hex(&exported.bytes));
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_layers(args: LayersArgs) -> anyhow::Result<()> {
    let selection = read_selection_json(&args.in_path)?;
    let layers = traitmix::build_render_layers(&selection);
    println!("{}", serde_json::to_string_pretty(&layers)?);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
