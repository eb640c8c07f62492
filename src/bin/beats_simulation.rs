//! Beat Frequency Simulation
//!
//! Superposes two sinusoids of nearby frequency, renders the component and
//! combined waves, then runs the frequency-difference and amplitude-ratio
//! sweeps side by side.
//!
//! ```bash
//! cargo run --release --bin beats_simulation -- --f1 440 --f2 446 --export-json
//! ```

use clap::Parser;
use std::path::Path;
use tracing::{error, info};

use classical_sims::cli::{banner, init_logging, CommonArgs};
use classical_sims::export::export_series;
use classical_sims::render::{Chart, Figure, Series, BLUE, GREEN, RED};
use classical_sims::waves::{
    amplitude_ratio_sweep, frequency_difference_sweep, simulate_beat_frequency, BeatConfig,
    BeatResult, SweepEntry, AMPLITUDE_RATIOS, FREQUENCY_DIFFS,
};
use classical_sims::{zip_points, SimError};

#[derive(Parser, Debug)]
#[command(name = "beats_simulation")]
#[command(about = "Superposition of two sinusoids and the resulting beats")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Frequency of wave 1 (Hz)
    #[arg(long)]
    f1: Option<f64>,

    /// Frequency of wave 2 (Hz)
    #[arg(long)]
    f2: Option<f64>,

    /// Amplitude of wave 1
    #[arg(long)]
    a1: Option<f64>,

    /// Amplitude of wave 2
    #[arg(long)]
    a2: Option<f64>,

    /// Number of time samples
    #[arg(long)]
    num_points: Option<usize>,

    /// Skip the three-panel figure
    #[arg(long)]
    no_plot: bool,

    /// Skip the parameter sweeps
    #[arg(long)]
    no_sweeps: bool,
}

fn save_result_figure(result: &BeatResult, config: &BeatConfig, path: &Path) -> Result<(), SimError> {
    let mut fig = Figure::new(3, 1).panel_size(900, 260);
    fig.push(
        Chart::new(format!("Wave 1: {} Hz", config.f1))
            .labels("Time (s)", "Amplitude")
            .with_series(Series::new("wave 1", zip_points(&result.t, &result.wave1), BLUE)),
    );
    fig.push(
        Chart::new(format!("Wave 2: {} Hz", config.f2))
            .labels("Time (s)", "Amplitude")
            .with_series(Series::new("wave 2", zip_points(&result.t, &result.wave2), GREEN)),
    );
    fig.push(
        Chart::new(format!("Superposition: beat frequency {} Hz", result.beat_frequency))
            .labels("Time (s)", "Amplitude")
            .with_series(Series::new("superposed", zip_points(&result.t, &result.superposed), RED)),
    );
    fig.save(path)
}

fn save_sweep_figure(entries: &[SweepEntry], path: &Path) -> Result<(), SimError> {
    let mut fig = Figure::new(2, 2).panel_size(600, 320);
    for entry in entries {
        info!(title = %entry.title(), beat_frequency = entry.result.beat_frequency, "sweep panel");
        fig.push(
            Chart::new(entry.title())
                .labels("Time (s)", "Amplitude")
                .with_series(Series::new("superposed", zip_points(&entry.result.t, &entry.result.superposed), RED)),
        );
    }
    fig.save(path)
}

fn run(args: Args) -> Result<(), SimError> {
    let settings = args.common.load_config()?;
    let mut config = settings.beats.clone();
    if let Some(f1) = args.f1 {
        config.f1 = f1;
    }
    if let Some(f2) = args.f2 {
        config.f2 = f2;
    }
    if let Some(a1) = args.a1 {
        config.a1 = a1;
    }
    if let Some(a2) = args.a2 {
        config.a2 = a2;
    }
    if let Some(n) = args.num_points {
        config.num_points = n;
    }
    if args.no_plot {
        config.show_plot = false;
    }

    let out_dir = settings.output.dir.as_path();

    println!("Parameters:");
    println!("  f₁ = {} Hz, A₁ = {}", config.f1, config.a1);
    println!("  f₂ = {} Hz, A₂ = {}", config.f2, config.a2);
    println!("  t ∈ [{}, {}] s, {} samples\n", config.t_start, config.t_end, config.num_points);

    let result = simulate_beat_frequency(&config)?;
    println!("Beat frequency: |f₁ − f₂| = {} Hz", result.beat_frequency);

    if config.show_plot {
        save_result_figure(&result, &config, &out_dir.join("beats.png"))?;
    }
    if settings.output.export_json {
        export_series(out_dir, "beats", &result)?;
    }

    if !args.no_sweeps {
        println!("\nSweeps:");
        let by_difference = frequency_difference_sweep(config.f1, &FREQUENCY_DIFFS)?;
        let by_amplitude = amplitude_ratio_sweep(&AMPLITUDE_RATIOS)?;

        for entry in by_difference.iter().chain(by_amplitude.iter()) {
            println!("  {:<40} beat = {:>6.2} Hz", entry.title(), entry.result.beat_frequency);
        }

        save_sweep_figure(&by_difference, &out_dir.join("beats_frequency_sweep.png"))?;
        save_sweep_figure(&by_amplitude, &out_dir.join("beats_amplitude_sweep.png"))?;

        if settings.output.export_json {
            export_series(out_dir, "beats_frequency_sweep", &by_difference)?;
            export_series(out_dir, "beats_amplitude_sweep", &by_amplitude)?;
        }
    }

    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    banner("Beat Frequency Simulation", "Superposition of two nearby sinusoids");

    if let Err(e) = run(args) {
        error!(kind = e.kind(), "{e}");
        std::process::exit(1);
    }
}
