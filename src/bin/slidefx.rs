use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use slidefx::foundation::core::duration_from_secs;

#[derive(Parser, Debug)]
#[command(name = "slidefx", version)]
struct Cli {
    /// Log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a deck and compile every effect descriptor in it.
    Validate(ValidateArgs),
    /// Drive a headless carousel session and print its timeline as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Comma-separated steps: next, previous, goto:N, hover, leave, move:X:Y, wait.
    #[arg(long, value_delimiter = ',', default_value = "next")]
    steps: Vec<Step>,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Viewport as WIDTHxHEIGHT.
    #[arg(long, default_value = "1280x720")]
    viewport: String,

    /// Load textures from the deck's directory before simulating.
    #[arg(long)]
    load: bool,
}

#[derive(Clone, Debug)]
enum Step {
    Next,
    Previous,
    GoTo(usize),
    Hover,
    Leave,
    Move(f64, f64),
    Wait,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let step = match parts.as_slice() {
            ["next"] => Step::Next,
            ["previous" | "prev"] => Step::Previous,
            ["goto", n] => Step::GoTo(n.parse().map_err(|_| format!("bad slide index '{n}'"))?),
            ["hover"] => Step::Hover,
            ["leave"] => Step::Leave,
            ["move", x, y] => Step::Move(
                x.parse().map_err(|_| format!("bad x '{x}'"))?,
                y.parse().map_err(|_| format!("bad y '{y}'"))?,
            ),
            ["wait"] => Step::Wait,
            _ => return Err(format!("unknown step '{s}'")),
        };
        Ok(step)
    }
}

impl Step {
    fn label(&self) -> String {
        match self {
            Step::Next => "next".into(),
            Step::Previous => "previous".into(),
            Step::GoTo(n) => format!("goto:{n}"),
            Step::Hover => "hover".into(),
            Step::Leave => "leave".into(),
            Step::Move(x, y) => format!("move:{x}:{y}"),
            Step::Wait => "wait".into(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_deck_json(path: &Path) -> anyhow::Result<slidefx::SlideDeck> {
    let f = File::open(path).with_context(|| format!("open deck '{}'", path.display()))?;
    let deck = slidefx::SlideDeck::from_reader(BufReader::new(f))
        .with_context(|| format!("load deck '{}'", path.display()))?;
    Ok(deck)
}

fn parse_viewport(s: &str) -> anyhow::Result<slidefx::Size> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("viewport '{s}' must look like WIDTHxHEIGHT"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("viewport width '{w}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("viewport height '{h}'"))?;
    Ok(slidefx::Size::new(w, h))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let deck = read_deck_json(&args.in_path)?;
    let mut resources = slidefx::ResourceCache::new();

    let mut failures = 0usize;
    let stacks = [("image", &deck.image_effects), ("caption", &deck.caption_effects)];
    for (stack, descriptors) in stacks {
        for (i, d) in descriptors.iter().enumerate() {
            if !d.enabled {
                eprintln!("  {stack}[{i}] {}: disabled", d.kind);
                continue;
            }
            match slidefx::create_effect(d, &mut resources) {
                Ok(fx) => eprintln!("  {stack}[{i}] {}: ok (magnitude {:.3})", fx.kind(), fx.magnitude()),
                Err(e) => {
                    failures += 1;
                    eprintln!("  {stack}[{i}] {}: {e}", d.kind);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} effect descriptor(s) failed to compile");
    }
    eprintln!(
        "ok: {} slides, {} descriptors",
        deck.slides.len(),
        deck.image_effects.len() + deck.caption_effects.len()
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0");
    }
    let deck = read_deck_json(&args.in_path)?;
    let viewport = parse_viewport(&args.viewport)?;
    let settle_for =
        duration_from_secs(deck.config.transition_duration) + Duration::from_millis(100);

    let mut carousel = slidefx::Carousel::new(deck, viewport)?;
    if args.load {
        let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
        let loader = slidefx::FsTextureLoader::new(root);
        let report = pollster::block_on(carousel.ready(&loader));
        for (path, err) in &report.failed {
            eprintln!("texture '{path}' unavailable: {err}");
        }
    }

    // Timestamps come from the frame counter so rounding never accumulates across frames.
    let frame_time = |n: u64| duration_from_secs(n as f64 / args.fps);
    let mut frame_no = 0u64;
    let mut now = Duration::ZERO;
    let mut timeline = Vec::with_capacity(args.steps.len());

    for step in &args.steps {
        let accepted = match *step {
            Step::Next => carousel.next(now),
            Step::Previous => carousel.previous(now),
            Step::GoTo(n) => carousel.go_to(n, now),
            Step::Hover => {
                carousel.on_pointer_enter(now);
                true
            }
            Step::Leave => {
                carousel.on_pointer_leave(now);
                true
            }
            Step::Move(x, y) => {
                carousel.pointer_move(now, slidefx::Point::new(x, y));
                true
            }
            Step::Wait => true,
        };
        let started = now;

        let mut frames = 0u64;
        let mut processed = 0u64;
        while now < started + settle_for {
            frame_no += 1;
            now = frame_time(frame_no);
            frames += 1;
            if carousel.tick(now).processed {
                processed += 1;
            }
        }

        let opacity: Vec<f64> = (0..carousel.len())
            .filter_map(|i| carousel.transitions().slide(i))
            .map(|s| carousel.scene().opacity(s.image).unwrap_or(0.0))
            .collect();
        let background = carousel.coupling().background().strength();
        timeline.push(serde_json::json!({
            "step": step.label(),
            "accepted": accepted,
            "at_ms": started.as_millis() as u64,
            "frames": frames,
            "processed_frames": processed,
            "current_index": carousel.current_index(),
            "slide_opacity": opacity,
            "background_strength": background,
        }));
    }

    carousel.dispose();
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}
