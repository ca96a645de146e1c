use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flightpath", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an animation document as pretty JSON.
    Export(ExportArgs),
    /// Check an animation document against the schema.
    Validate(ValidateArgs),
    /// Print the interpolated pose, sprite transform and heading at one time.
    Sample(SampleArgs),
    /// Play an animation in real time until it stops at the end.
    Play(PlayArgs),
    /// Render an SVG preview of the canvas at one time.
    Preview(PreviewArgs),
    /// Print route geometry.
    Route(RouteArgs),
}

#[derive(Args, Debug, Clone)]
struct CanvasArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Waypoints JSON (array). Defaults to the built-in route.
    #[arg(long)]
    waypoints: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input document to re-export. Defaults to a fresh single-keyframe animation.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output JSON path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Override the frame rate.
    #[arg(long)]
    fps: Option<f64>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time position (0..=100).
    #[arg(long)]
    time: f64,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback speed: 0.25, 0.5, 1 or 2.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Tick interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time position (0..=100).
    #[arg(long)]
    time: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct RouteArgs {
    #[command(flatten)]
    canvas: CanvasArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Play(args) => cmd_play(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Route(args) => cmd_route(args),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut session = flightpath::EditorSession::default();
    if let Some(path) = &args.in_path {
        let doc = load_document(path)?;
        session.load_document(&doc)?;
    }
    if let Some(secs) = args.duration {
        session.set_duration(secs)?;
    }
    if let Some(fps) = args.fps {
        session.set_fps(fps)?;
    }

    let json = session.export_json()?;
    match &args.out {
        Some(out) => {
            write_output(out, &json)?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let store = doc.to_store()?;
    println!(
        "ok: {} keyframes, {}s at {} fps",
        store.len(),
        doc.duration,
        doc.fps
    );
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let store = doc.to_store()?;
    let curve = build_curve(&args.canvas)?;

    let sample = store.pose_at(args.time);
    let sprite = flightpath::SpriteTransform::from_pose(
        &curve,
        &sample.pose,
        &flightpath::SpriteOpts::default(),
    );
    let heading = flightpath::tangent_at_fraction(
        &curve,
        sample.pose.path_progress,
        &flightpath::HeadingOpts::default(),
    );

    let out = serde_json::json!({
        "sample": sample,
        "sprite": sprite,
        "css": sprite.map(|s| s.css_transform()),
        "headingDeg": heading,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let store = doc.to_store()?;
    let speed = flightpath::PlaybackSpeed::try_from(args.speed)?;
    let opts = flightpath::PlaybackOpts {
        tick: Duration::from_millis(args.tick_ms.max(1)),
        ..flightpath::PlaybackOpts::default()
    };

    let mut driver = flightpath::PlaybackDriver::new(flightpath::Playback::new(speed, &opts), opts);
    let mut next_report = 0.0;
    driver.start(move |time| {
        if time >= next_report {
            let pose = store.pose_at(time).pose;
            tracing::info!(
                time,
                path_progress = pose.path_progress,
                rotation_z = pose.rotation_z,
                "frame"
            );
            next_report = (time / 10.0).floor() * 10.0 + 10.0;
        }
    })?;
    driver.wait();

    let end = driver.snapshot();
    tracing::info!(time = end.time(), %speed, "playback finished");
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let store = doc.to_store()?;
    let viewport = viewport(&args.canvas)?;
    let waypoints = load_route(&args.canvas)?;
    let curve_opts = flightpath::CurveOpts::default();
    let curve = flightpath::PathCurve::build(&waypoints, viewport, &curve_opts);

    let sprite_opts = flightpath::SpriteOpts::default();
    let pose = store.pose_at(args.time).pose;
    let sprite = flightpath::SpriteTransform::from_pose(&curve, &pose, &sprite_opts);
    let svg = flightpath::render_preview_svg(
        &curve,
        &waypoints,
        viewport,
        sprite.as_ref(),
        &sprite_opts,
        pose.path_progress,
    )?;

    write_output(&args.out, &svg)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_route(args: RouteArgs) -> anyhow::Result<()> {
    let waypoints = load_route(&args.canvas)?;
    let curve = flightpath::PathCurve::build(
        &waypoints,
        viewport(&args.canvas)?,
        &flightpath::CurveOpts::default(),
    );

    let markers: Vec<_> = waypoints
        .iter()
        .enumerate()
        .map(|(i, w)| {
            serde_json::json!({
                "id": w.id,
                "name": w.name,
                "progress": flightpath::waypoint_progress(i, waypoints.len()),
            })
        })
        .collect();
    let out = serde_json::json!({
        "length": curve.length(),
        "segments": curve.segments().len(),
        "d": curve.svg_path_data(),
        "markers": markers,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn load_document(path: &Path) -> anyhow::Result<flightpath::AnimationDocument> {
    flightpath::AnimationDocument::from_path(path)
        .with_context(|| format!("load animation document '{}'", path.display()))
}

fn viewport(canvas: &CanvasArgs) -> anyhow::Result<flightpath::Viewport> {
    Ok(flightpath::Viewport::new(canvas.width, canvas.height)?)
}

fn load_route(canvas: &CanvasArgs) -> anyhow::Result<Vec<flightpath::Waypoint>> {
    match &canvas.waypoints {
        Some(path) => flightpath::load_waypoints(path)
            .with_context(|| format!("load waypoints '{}'", path.display())),
        None => Ok(flightpath::default_route()),
    }
}

fn build_curve(canvas: &CanvasArgs) -> anyhow::Result<flightpath::PathCurve> {
    Ok(flightpath::PathCurve::build(
        &load_route(canvas)?,
        viewport(canvas)?,
        &flightpath::CurveOpts::default(),
    ))
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}
