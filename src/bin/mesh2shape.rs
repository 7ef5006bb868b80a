use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use mesh2shape::{
    Canvas, CompositionInfo, Fps, HostDefaults, PreviewOpts, RecordingHost, import::read_mesh_text,
};

#[derive(Parser, Debug)]
#[command(name = "mesh2shape", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a mesh and print its normalized form as JSON.
    Check(CheckArgs),
    /// Author a mesh into an in-memory composition and dump the result.
    Import(ImportArgs),
    /// Rasterize one keyframe as a PNG.
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct RateArgs {
    /// Composition frame rate numerator.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Composition frame rate denominator.
    #[arg(long, default_value_t = 1)]
    fps_den: u32,
}

impl RateArgs {
    fn frame_duration(self) -> anyhow::Result<f64> {
        Ok(Fps::new(self.fps, self.fps_den)?.frame_duration_secs())
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct CanvasArgs {
    /// Composition width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Composition height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

impl CanvasArgs {
    fn canvas(self) -> anyhow::Result<Canvas> {
        Ok(Canvas::new(self.width, self.height)?)
    }
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input mesh JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input mesh JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,

    #[command(flatten)]
    rate: RateArgs,

    /// Initial composition duration in seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Dump the authoring call log instead of the resulting document.
    #[arg(long)]
    ops: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input mesh JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Keyframe index (0-based).
    #[arg(long, default_value_t = 0)]
    keyframe: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,

    #[command(flatten)]
    rate: RateArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Import(args) => cmd_import(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_mesh(path: &Path, rate: RateArgs) -> anyhow::Result<mesh2shape::Mesh> {
    let text = read_mesh_text(path)?;
    let mesh = mesh2shape::normalize_str(
        &text,
        HostDefaults {
            min_frame_duration: rate.frame_duration()?,
        },
    )
    .with_context(|| format!("invalid mesh '{}'", path.display()))?;
    Ok(mesh)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let mesh = read_mesh(&args.in_path, args.rate)?;
    write_json(None, &mesh)?;
    eprintln!(
        "ok: '{}' ({} keyframes, {} polygons)",
        mesh.name(),
        mesh.keyframe_count(),
        mesh.polygon_count()
    );
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }
    let mut host = RecordingHost::new(CompositionInfo {
        canvas: args.canvas.canvas()?,
        duration: args.duration,
        frame_duration: args.rate.frame_duration()?,
    });

    let summary = mesh2shape::import_mesh_path(&args.in_path, &mut host)
        .with_context(|| format!("import '{}'", args.in_path.display()))?;

    if args.ops {
        write_json(args.out.as_deref(), host.ops())?;
    } else {
        write_json(args.out.as_deref(), host.document())?;
    }

    eprintln!(
        "imported '{}' ({} keyframes, {} polygons, {:.3}s)",
        summary.layer_name, summary.keyframe_count, summary.polygon_count, summary.duration
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mesh = read_mesh(&args.in_path, args.rate)?;
    let frame = mesh2shape::render_keyframe(
        &mesh,
        args.canvas.canvas()?,
        args.keyframe,
        &PreviewOpts::default(),
    )?;

    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("serialize JSON output")?;
    json.push('\n');
    match out {
        Some(path) => {
            create_parent_dir(path)?;
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .context("write JSON to stdout")?;
        }
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
