use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use morphclock::{
    CallbackKind, ClockAnimator, ClockLayout, ClockRenderer, ClockTime, CpuSurface, Font,
    FrameScheduler, ManualClock, ManualScheduler, MeasureSettings, Options, Paints, RealtimeScheduler,
    Size, SystemClock, TimeSource, font_by_name, measure_full_day, params_to_paints, parse_query,
    restore_options, run_realtime,
};

#[derive(Parser, Debug)]
#[command(name = "morphclock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one instant as a PNG.
    Frame(FrameArgs),
    /// Simulate the tick loop with a manual clock, writing one PNG per tick.
    Sequence(SequenceArgs),
    /// Compare the native-size estimate with an exact full-day measurement.
    Measure(MeasureArgs),
    /// Run the clock against the system time, rewriting a PNG on every tick.
    Live(LiveArgs),
}

#[derive(Args, Debug)]
struct ClockArgs {
    /// Options JSON file; missing fields take their defaults.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Settings query string (e.g. `format=HH_MM_24&layout=Horizontal`), applied over --options.
    #[arg(long)]
    settings: Option<String>,

    /// Glyph family: form or debug.
    #[arg(long, default_value = "form")]
    font: String,

    /// Available width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Available height in pixels; 0 scales to the width alone.
    #[arg(long, default_value_t = 0)]
    height: u32,

    /// Outline every glyph rectangle under the glyphs.
    #[arg(long)]
    boundaries: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Time of day `HH:MM:SS[.mmm]`; defaults to now.
    #[arg(long)]
    time: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Start time `HH:MM:SS[.mmm]`.
    #[arg(long, default_value = "09:59:59.000")]
    start: String,

    /// Simulated duration in seconds.
    #[arg(long, default_value_t = 2)]
    seconds: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct MeasureArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Animation-time step within each second's transition.
    #[arg(long, default_value_t = 10)]
    step_millis: u32,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct LiveArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// How long to run, in seconds.
    #[arg(long, default_value_t = 5)]
    seconds: u64,

    /// Display refresh rate while a transition is in flight.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output PNG path, rewritten after every tick.
    #[arg(long)]
    out: PathBuf,
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
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Measure(args) => cmd_measure(args),
        Command::Live(args) => cmd_live(args),
    }
}

/// Everything the subcommands need to build a clock.
struct ClockSetup {
    font: Arc<dyn Font>,
    options: Options,
    paints: Paints,
    boundaries: bool,
    available: Size,
}

impl ClockSetup {
    fn from_args(args: &ClockArgs) -> anyhow::Result<Self> {
        let font = font_by_name(&args.font)?;
        let base = match &args.options {
            Some(path) => Options::from_path(path)?,
            None => Options::default(),
        };
        let (options, paints) = match &args.settings {
            Some(query) => {
                let params = parse_query(query);
                (
                    restore_options(&base, &params),
                    params_to_paints(&Paints::default(), &params),
                )
            }
            None => (base, Paints::default()),
        };
        options.validate()?;
        Ok(Self {
            font,
            options,
            paints,
            boundaries: args.boundaries,
            available: Size::new(f64::from(args.width), f64::from(args.height)),
        })
    }

    /// Layout scaled to the available size, failing when nothing would be drawn.
    fn layout(&self) -> anyhow::Result<ClockLayout> {
        let mut layout = ClockLayout::new(Arc::clone(&self.font), self.options.clone())?;
        let measured = layout.set_available_size(self.available);
        if !layout.is_drawable() {
            anyhow::bail!(
                "nothing to draw at {} (measured {measured})",
                self.available
            );
        }
        Ok(layout)
    }

    /// Primary glyph renderer last, boundary overlay (if any) drawn first.
    fn renderers(&self) -> Vec<ClockRenderer> {
        let mut renderers = Vec::new();
        if self.boundaries {
            renderers.push(ClockRenderer::boundaries());
        }
        renderers.push(ClockRenderer::new(self.paints.clone()));
        renderers
    }

    fn surface(&self, layout: &ClockLayout) -> anyhow::Result<CpuSurface> {
        let measured = layout.measured_size();
        Ok(CpuSurface::new(
            measured.width as u32,
            measured.height as u32,
            None,
        )?)
    }

    fn animator<S: FrameScheduler>(
        &self,
        time: Box<dyn TimeSource>,
        scheduler: S,
    ) -> anyhow::Result<ClockAnimator<CpuSurface, S>> {
        let layout = self.layout()?;
        Ok(ClockAnimator::new(layout, self.renderers(), time, scheduler)?)
    }
}

fn parse_time(s: &str) -> anyhow::Result<ClockTime> {
    s.parse::<ClockTime>()
        .with_context(|| format!("parse time '{s}'"))
}

fn write_frame(surface: &mut CpuSurface, path: &Path) -> anyhow::Result<()> {
    let frame = surface.finish()?;
    frame
        .save_png(path)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let setup = ClockSetup::from_args(&args.clock)?;
    let time = match &args.time {
        Some(s) => parse_time(s)?,
        None => SystemClock::from_env().now(),
    };

    let mut animator = setup.animator(Box::new(ManualClock::new(time)), ManualScheduler::new())?;
    let surface = setup.surface(animator.layout())?;
    animator.attach(surface)?;
    let mut surface = animator
        .detach()
        .context("animator released no surface")?;
    write_frame(&mut surface, &args.out)?;

    eprintln!("wrote {} ({time})", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be >= 1");
    }
    let setup = ClockSetup::from_args(&args.clock)?;
    let start = parse_time(&args.start)?;
    let frame_millis = i64::from((1_000 / args.fps).max(1));
    let end_millis = i64::from(args.seconds) * 1_000;

    let clock = ManualClock::new(start);
    let mut animator = setup.animator(Box::new(clock.clone()), ManualScheduler::new())?;
    let surface = setup.surface(animator.layout())?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let frame_path = |n: u64| args.out_dir.join(format!("frame_{n:05}.png"));
    let mut written = 0u64;
    animator.attach(surface)?;
    if let Some(surface) = animator.surface_mut() {
        write_frame(surface, &frame_path(written))?;
        written += 1;
    }

    let mut elapsed = 0i64;
    while let Some(next) = animator.scheduler_mut().take_next() {
        let step = match next.kind {
            CallbackKind::AnimationFrame => frame_millis,
            CallbackKind::Timeout => next.delay.as_millis() as i64,
        };
        if elapsed + step > end_millis {
            break;
        }
        elapsed += step;
        clock.advance_millis(step);

        let ticked = animator.dispatch(next)?.is_some();
        if ticked
            && next.kind == CallbackKind::AnimationFrame
            && let Some(surface) = animator.surface_mut()
        {
            write_frame(surface, &frame_path(written))?;
            written += 1;
        }
    }

    let scheduler = animator.scheduler();
    eprintln!(
        "wrote {written} frames to {} ({} frame requests, {} timeouts)",
        args.out_dir.display(),
        scheduler.frames_requested(),
        scheduler.timeouts_requested()
    );
    Ok(())
}

fn cmd_measure(args: MeasureArgs) -> anyhow::Result<()> {
    let setup = ClockSetup::from_args(&args.clock)?;
    let options = &setup.options;
    let estimate = setup
        .font
        .measure(options.format, options.layout, options.spacing_px);
    let settings = MeasureSettings {
        step_millis: args.step_millis,
        threads: args.threads,
    };
    let exact = measure_full_day(&setup.font, options, settings)?;

    println!("font      {}", setup.font.name());
    println!("format    {}", options.format);
    println!("layout    {}", options.layout);
    println!("estimate  {estimate}");
    println!("exact     {}", exact.size());
    println!(
        "widest    {}",
        exact.widest.as_deref().unwrap_or("-")
    );
    Ok(())
}

fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be >= 1");
    }
    let setup = ClockSetup::from_args(&args.clock)?;
    let scheduler = RealtimeScheduler::new(Duration::from_secs(1) / args.fps);
    let mut animator = setup.animator(Box::new(SystemClock::from_env()), scheduler)?;
    let surface = setup.surface(animator.layout())?;
    animator.attach(surface)?;

    let out = args.out.clone();
    let stats = run_realtime(
        &mut animator,
        Duration::from_secs(args.seconds),
        |surface, _| {
            let frame = surface.finish()?;
            frame.save_png(&out)
        },
    )?;

    eprintln!(
        "{} ticks, {} idle waits; last frame in {}",
        stats.ticks,
        stats.timeouts,
        args.out.display()
    );
    Ok(())
}
