use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "glyphfx", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write a single frame as an SVG document.
    Svg(SvgArgs),
    /// Export the animation as a looping GIF.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Project JSON. Other source flags override its fields.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Text to render.
    #[arg(long)]
    text: Option<String>,

    /// TrueType/OpenType font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Draw hairline outlines instead of filled glyphs.
    #[arg(long)]
    wireframe: bool,

    /// Em size in scene units.
    #[arg(long)]
    font_size: Option<f64>,
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    size: SizeArgs,

    /// Animation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    size: SizeArgs,

    /// Animation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    size: SizeArgs,

    /// Frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Animation length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_project(source: &SourceArgs, size: &SizeArgs) -> anyhow::Result<glyphfx::ProjectConfig> {
    let mut cfg = match &source.project {
        Some(path) => glyphfx::ProjectConfig::from_path(path)
            .with_context(|| format!("load project '{}'", path.display()))?,
        None => glyphfx::ProjectConfig::default(),
    };
    if let Some(text) = &source.text {
        cfg.text = text.clone();
    }
    if let Some(font) = &source.font {
        cfg.font = Some(font.clone());
    }
    if source.wireframe {
        cfg.wireframe = true;
    }
    if let Some(font_size) = source.font_size {
        cfg.font_size = font_size;
    }
    if let Some(width) = size.width {
        cfg.export.width = width;
    }
    if let Some(height) = size.height {
        cfg.export.height = height;
    }
    Ok(cfg)
}

fn load_font(cfg: &glyphfx::ProjectConfig) -> anyhow::Result<glyphfx::TtfOutlineProvider> {
    let path = cfg
        .font
        .as_deref()
        .context("no font given (use --font or set \"font\" in the project)")?;
    glyphfx::TtfOutlineProvider::from_path(path)
        .with_context(|| format!("load font '{}'", path.display()))
}

fn render_at(
    cfg: &glyphfx::ProjectConfig,
    provider: &glyphfx::TtfOutlineProvider,
    time: f64,
) -> anyhow::Result<glyphfx::Frame> {
    let effects = glyphfx::resolve_effects(&cfg.effects, &cfg.animations, time);
    let frame = glyphfx::render_frame(
        &cfg.text,
        provider,
        cfg.wireframe,
        &effects,
        &cfg.render_opts(),
    )?;
    Ok(frame)
}

fn background(cfg: &glyphfx::ProjectConfig) -> anyhow::Result<glyphfx::Rgba8> {
    cfg.export
        .background_rgba()
        .with_context(|| format!("invalid background color '{}'", cfg.export.background))
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_project(&args.source, &args.size)?;
    let provider = load_font(&cfg)?;
    let frame = render_at(&cfg, &provider, args.time)?;
    let canvas = glyphfx::Canvas::new(cfg.export.width, cfg.export.height)?;
    let pixels = glyphfx::rasterize(&frame, canvas, background(&cfg)?)?;

    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &pixels.data,
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let cfg = load_project(&args.source, &args.size)?;
    let provider = load_font(&cfg)?;
    let frame = render_at(&cfg, &provider, args.time)?;
    let canvas = glyphfx::Canvas::new(cfg.export.width, cfg.export.height)?;
    let doc = frame.to_svg_sized(canvas, background(&cfg)?);

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, doc)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Reports progress to stderr in 10% steps.
struct StderrProgress {
    last_decile: u32,
}

impl glyphfx::ExportHost for StderrProgress {
    fn progress(&mut self, fraction: f64) {
        let decile = (fraction * 10.0).floor() as u32;
        if decile > self.last_decile {
            self.last_decile = decile;
            eprintln!("export {:>3}%", decile * 10);
        }
    }

    fn yield_now(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut cfg = load_project(&args.source, &args.size)?;
    if let Some(fps) = args.fps {
        cfg.export.fps = fps;
    }
    if let Some(duration) = args.duration {
        cfg.export.duration_secs = duration;
    }
    let provider = load_font(&cfg)?;

    let mut host = StderrProgress { last_decile: 0 };
    let bytes = glyphfx::export_animation(
        &cfg.text,
        &provider,
        cfg.wireframe,
        &cfg.effects,
        &cfg.animations,
        &cfg.export_opts(),
        &mut host,
    )?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), bytes.len());
    Ok(())
}
