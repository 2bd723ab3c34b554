use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snapbunny", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite the photo strip and write SnapBunny.jpg.
    Compose(ComposeArgs),
    /// Build the animated loop and write SnapBunny.gif.
    Gif(GifArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root for frame overlays and fonts (defaults to the session's
    /// directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write a lossless PNG preview next to the JPEG.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Print the QR share link for the strip.
    #[arg(long, default_value_t = false)]
    share: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root for frame overlays and fonts (defaults to the session's
    /// directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Gif(args) => cmd_gif(args),
    }
}

struct LoadedSession {
    sources: snapbunny::SourceSet,
    state: snapbunny::CompositionState,
    assets: snapbunny::AssetStore,
    descriptor: snapbunny::LayoutDescriptor,
}

fn load_session(in_path: &Path, assets_root: Option<PathBuf>) -> anyhow::Result<LoadedSession> {
    let session = snapbunny::Session::from_path(in_path)?;
    let assets_root = assets_root.unwrap_or_else(|| {
        in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });

    let date_label = chrono::Local::now().format("%m/%d/%Y").to_string();
    Ok(LoadedSession {
        sources: session.source_set(),
        state: session.initial_state(date_label),
        assets: snapbunny::AssetStore::new(assets_root),
        descriptor: session.descriptor()?,
    })
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut loaded = load_session(&args.in_path, args.assets_root)?;

    let mut pipeline = snapbunny::CompositionPipeline::new(&loaded.descriptor)?;
    pipeline.render_cycle(&loaded.state, &mut loaded.sources, &mut loaded.assets)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let out = args.out_dir.join(snapbunny::STILL_FILENAME);
    let jpeg = snapbunny::still_jpeg(pipeline.surface())?;
    std::fs::write(&out, jpeg).with_context(|| format!("write jpeg '{}'", out.display()))?;

    if let Some(preview) = &args.preview {
        let surface = pipeline.surface();
        image::save_buffer_with_format(
            preview,
            surface.data(),
            surface.width(),
            surface.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", preview.display()))?;
    }

    if args.share {
        println!("{}", snapbunny::qr_share_url(snapbunny::SHARE_PAGE_URL));
    }

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let mut loaded = load_session(&args.in_path, args.assets_root)?;

    let mut export = snapbunny::AnimatedExportPipeline::new()?;
    let mut status =
        export.ensure_started(&mut loaded.sources, &loaded.state, &mut loaded.assets);
    loop {
        match status {
            snapbunny::ExportStatus::NoSources => {
                anyhow::bail!("session has no source images; nothing to encode")
            }
            snapbunny::ExportStatus::Failed(err) => anyhow::bail!("gif encode failed: {err}"),
            snapbunny::ExportStatus::Ready => break,
            snapbunny::ExportStatus::Generating => {
                std::thread::sleep(std::time::Duration::from_millis(50));
                status = export.status();
            }
        }
    }

    let artifact = export
        .artifact()
        .context("export reported ready without an artifact")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out = args.out_dir.join(snapbunny::ANIMATED_FILENAME);
    std::fs::write(&out, artifact).with_context(|| format!("write gif '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
