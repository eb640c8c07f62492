//! Wien's Displacement Law
//!
//! Solves 5e^{−x} + x − 5 = 0 by Newton iteration from a guess read on
//! stdin, derives b = hc/(k_B·x), and estimates the solar surface
//! temperature from the observed peak at 502 nm. The graphical solution
//! (intersection of y = 5e^{−x} and y = 5 − x) is rendered with the root
//! marked.
//!
//! ```bash
//! echo 5 | cargo run --release --bin wien_displacement
//! ```

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::{error, warn};

use classical_sims::cli::{banner, init_logging, CommonArgs};
use classical_sims::export::export_series;
use classical_sims::render::{Chart, Figure, Marker, Series, BLACK, BLUE, RED};
use classical_sims::thermal::{calculate_temperature, solve_wien_constant, wien_curves, WienCurves, WienSolution};
use classical_sims::{zip_points, SimError};

#[derive(Parser, Debug)]
#[command(name = "wien_displacement")]
#[command(about = "Wien's displacement constant and the solar surface temperature")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Initial guess; skips reading stdin
    #[arg(long)]
    guess: Option<f64>,

    /// Peak wavelength for the temperature estimate (m)
    #[arg(long)]
    wavelength: Option<f64>,
}

#[derive(Serialize)]
struct WienExport<'a> {
    initial_guess: f64,
    solution: &'a WienSolution,
    wavelength: f64,
    temperature: f64,
    curves: &'a WienCurves,
}

/// Read one line from stdin; anything unparsable gives `fallback`
fn read_guess(fallback: f64) -> io::Result<f64> {
    print!("Enter an initial guess for x (default {fallback}): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(match line.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        _ => {
            warn!(input = line.trim(), fallback, "invalid initial guess, using fallback");
            fallback
        }
    })
}

fn run(args: Args) -> Result<(), SimError> {
    let settings = args.common.load_config()?;
    let mut config = settings.wien.clone();
    if let Some(wavelength) = args.wavelength {
        config.wavelength = wavelength;
    }

    let x0 = match args.guess {
        Some(x0) => x0,
        None => read_guess(config.fallback_guess)?,
    };

    let solution = solve_wien_constant(x0, &config.root)?;
    let temperature = calculate_temperature(config.wavelength, solution.constant)?;

    println!();
    println!("Results:");
    println!("  x₀            = {}", x0);
    println!("  root x        = {:.6} ({} iterations)", solution.root, solution.iterations);
    println!("  b = hc/(k_B·x) = {:.6e} m·K", solution.constant);
    println!("  T(λ = {:.0} nm) = {:.2} K", config.wavelength * 1e9, temperature);

    let curves = wien_curves(config.plot_range, config.plot_samples)?;
    let chart = Chart::new("Graphical solution of 5e^(-x) = 5 - x")
        .labels("x", "y")
        .y_range((-2.0, 8.0))
        .with_series(Series::new("5e^(-x)", zip_points(&curves.x, &curves.exponential), BLUE).width(2))
        .with_series(Series::new("5 - x", zip_points(&curves.x, &curves.linear), RED).width(2))
        .with_marker(Marker {
            x: solution.root,
            y: 5.0 - solution.root,
            color: BLACK,
            radius: 5,
        });

    let out_dir = settings.output.dir.as_path();
    let mut fig = Figure::new(1, 1).panel_size(800, 600);
    fig.push(chart);
    fig.save(&out_dir.join("wien_displacement.png"))?;

    if settings.output.export_json {
        export_series(
            out_dir,
            "wien_displacement",
            &WienExport {
                initial_guess: x0,
                solution: &solution,
                wavelength: config.wavelength,
                temperature,
                curves: &curves,
            },
        )?;
    }

    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    banner("Wien's Displacement Law", "Planck maximum and solar surface temperature");

    if let Err(e) = run(args) {
        error!(kind = e.kind(), "{e}");
        std::process::exit(1);
    }
}
