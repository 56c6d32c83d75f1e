use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use epicycles::{Canvas, EpicycleConfig, Outline, RenderThreading, Selection, SelectionPolicy};

#[derive(Parser, Debug)]
#[command(name = "epicycles", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an epicycle animation (GIF, or MP4 with `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the selected components as JSON.
    Spectrum(SpectrumArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input SVG document.
    #[arg(long = "in", conflicts_with = "path_d", required_unless_present = "path_d")]
    in_path: Option<PathBuf>,

    /// Raw SVG path data, e.g. "M0,0 L10,0 L10,10 Z".
    #[arg(long)]
    path_d: Option<String>,

    /// Configuration JSON; command-line values override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the N largest rotating components.
    #[arg(long, conflicts_with = "threshold")]
    count: Option<usize>,

    /// Keep components until this share of total magnitude is reached.
    #[arg(long)]
    threshold: Option<f64>,

    /// Arc-length spacing of sampled points.
    #[arg(long)]
    rate: Option<f64>,

    /// Samples per segment used for length estimation.
    #[arg(long)]
    base_samples: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output path; the extension selects the format (.gif or .mp4).
    #[arg(long)]
    out: PathBuf,

    /// Number of frames in the sweep.
    #[arg(long)]
    frames: Option<u32>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Canvas width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Render frames on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to rayon's choice).
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct SpectrumArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(serde::Serialize)]
struct SpectrumReport<'a> {
    points: usize,
    selected: usize,
    #[serde(flatten)]
    selection: &'a Selection,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Spectrum(args) => cmd_spectrum(args),
    }
}

fn load_outlines(src: &SourceArgs) -> anyhow::Result<Vec<Outline>> {
    if let Some(path) = &src.in_path {
        return epicycles::load_svg_file(path)
            .with_context(|| format!("load svg '{}'", path.display()));
    }
    let d = src
        .path_d
        .as_deref()
        .context("one of --in or --path-d is required")?;
    Ok(epicycles::parse_path_data(d)?)
}

fn load_config(src: &SourceArgs) -> anyhow::Result<EpicycleConfig> {
    let mut cfg = match &src.config {
        Some(path) => EpicycleConfig::from_json_file(path)?,
        None => EpicycleConfig::default(),
    };
    if let Some(count) = src.count {
        cfg.selection = SelectionPolicy::TopN { count };
    }
    if let Some(threshold) = src.threshold {
        cfg.selection = SelectionPolicy::CumulativeEnergy { threshold };
    }
    if let Some(rate) = src.rate {
        cfg.rate = rate;
    }
    if let Some(base) = src.base_samples {
        cfg.base_sample_count = base;
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.source)?;
    if let Some(frames) = args.frames {
        cfg.time_sweep.frame_count = frames;
    }
    if let Some(fps) = args.fps {
        cfg.frames_per_second = fps;
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        cfg.style.canvas = Canvas { width, height };
    }
    cfg.validate()?;

    let outlines = load_outlines(&args.source)?;
    let model = epicycles::build_from_outlines(&outlines, &cfg)?;
    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        ..RenderThreading::default()
    };
    let stats = epicycles::render_to_file(&model, &cfg, &threading, &args.out)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    println!(
        "wrote {} ({} frames, {} components)",
        args.out.display(),
        stats.frames,
        stats.components
    );
    Ok(())
}

fn cmd_spectrum(args: SpectrumArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    cfg.validate()?;

    let outlines = load_outlines(&args.source)?;
    let model = epicycles::build_from_outlines(&outlines, &cfg)?;
    let report = SpectrumReport {
        points: model.points.len(),
        selected: model.selection.len(),
        selection: &model.selection,
    };
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report).context("write spectrum JSON")?;
    println!();
    Ok(())
}
