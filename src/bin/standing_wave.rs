//! Standing Wave Animation
//!
//! Two counter-propagating waves of equal amplitude,
//!
//!   y₁ = A·sin(kx − ωt),   y₂ = A·sin(kx + ωt),   y₁ + y₂ = 2A·sin(kx)·cos(ωt)
//!
//! animated frame by frame into an animated GIF.

use clap::Parser;
use tracing::error;

use classical_sims::cli::{banner, init_logging, CommonArgs};
use classical_sims::export::export_series;
use classical_sims::render::GifSink;
use classical_sims::waves::{FrameCollector, StandingWaveAnimation};
use classical_sims::SimError;

#[derive(Parser, Debug)]
#[command(name = "standing_wave")]
#[command(about = "Animated standing wave from two counter-propagating waves")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Amplitude A
    #[arg(long)]
    amplitude: Option<f64>,

    /// Angular frequency ω (rad/s)
    #[arg(long)]
    omega: Option<f64>,

    /// Wavenumber k (rad/m)
    #[arg(long)]
    k: Option<f64>,

    /// Number of frames
    #[arg(long)]
    frames: Option<usize>,

    /// Delay between frames (ms)
    #[arg(long)]
    interval_ms: Option<u32>,

    /// GIF frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// GIF frame height in pixels
    #[arg(long, default_value = "360")]
    height: u32,
}

fn run(args: Args) -> Result<(), SimError> {
    let settings = args.common.load_config()?;
    let mut params = settings.standing_wave.wave;
    let mut schedule = settings.standing_wave.animation.clone();
    if let Some(a) = args.amplitude {
        params.amplitude = a;
    }
    if let Some(omega) = args.omega {
        params.omega = omega;
    }
    if let Some(k) = args.k {
        params.k = k;
    }
    if let Some(frames) = args.frames {
        schedule.frames = frames;
    }
    if let Some(interval) = args.interval_ms {
        schedule.interval_ms = interval;
    }

    println!("Parameters:");
    println!("  A = {}, ω = {:.4} rad/s, k = {:.4} rad/m", params.amplitude, params.omega, params.k);
    println!(
        "  {} frames, Δt = {} s, {} ms per frame\n",
        schedule.frames, schedule.time_step, schedule.interval_ms
    );

    let animation = StandingWaveAnimation::new(params, schedule)?;
    let out_dir = settings.output.dir.as_path();

    let mut sink = GifSink::new(
        out_dir.join("standing_wave.gif"),
        args.width,
        args.height,
        animation.config().interval_ms,
    );
    animation.run(&mut sink)?;
    println!("Frames written: {}", sink.frames_written());

    if settings.output.export_json {
        let mut frames = FrameCollector::default();
        animation.run(&mut frames)?;
        export_series(out_dir, "standing_wave", &frames.frames)?;
    }

    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    banner("Standing Wave Animation", "Superposition of counter-propagating waves");

    if let Err(e) = run(args) {
        error!(kind = e.kind(), "{e}");
        std::process::exit(1);
    }
}
