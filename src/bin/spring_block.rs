//! Spring-Mass Block: Explicit Euler vs Adaptive Reference
//!
//! Integrates x'' = −x over one period with both solvers and renders the
//! four comparison views (position, velocity, phase space, energy) in a
//! 2×2 figure. The energy panel makes Euler's monotone drift visible.

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use classical_sims::cli::{banner, init_logging, CommonArgs};
use classical_sims::export::export_series;
use classical_sims::oscillator::{
    solve_ode_adaptive, solve_ode_euler, ComparisonView, ComparisonViews, SolverKind, Trajectory,
};
use classical_sims::render::{Chart, Figure, Series, BLUE, RED};
use classical_sims::SimError;

#[derive(Parser, Debug)]
#[command(name = "spring_block")]
#[command(about = "Spring-mass oscillator: explicit Euler against an adaptive solver")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Euler steps over one period
    #[arg(long)]
    euler_steps: Option<usize>,

    /// Output samples of the adaptive solution
    #[arg(long)]
    adaptive_samples: Option<usize>,

    /// Relative and absolute tolerance of the adaptive solver
    #[arg(long)]
    tolerance: Option<f64>,
}

#[derive(Serialize)]
struct SpringExport<'a> {
    euler: &'a Trajectory,
    reference: &'a Trajectory,
}

fn chart(view: &ComparisonView) -> Chart {
    let mut chart = Chart::new(view.title).labels(view.x_label, view.y_label);
    if let Some(range) = view.y_range {
        chart = chart.y_range(range);
    }
    for series in &view.series {
        let line = match series.solver {
            SolverKind::ExplicitEuler => Series::new(series.solver.label(), series.points.clone(), RED).width(2),
            SolverKind::Adaptive => Series::new(series.solver.label(), series.points.clone(), BLUE).width(2).dashed(),
        };
        chart = chart.with_series(line);
    }
    chart
}

fn report(trajectory: &Trajectory) {
    let last = trajectory.len() - 1;
    let energy = trajectory.energy();
    println!("{}:", trajectory.solver.label());
    println!("  samples        = {}", trajectory.len());
    println!(
        "  x(2π), v(2π)   = {:+.6}, {:+.6}",
        trajectory.position[last], trajectory.velocity[last]
    );
    println!("  E(0) → E(2π)   = {:.6} → {:.6}", energy[0], energy[last]);
    println!("  max |ΔE|/E(0)  = {:.3e}", trajectory.max_relative_energy_error());
    if let Some(stats) = &trajectory.stats {
        println!(
            "  steps          = {} accepted, {} rejected, {} rhs evaluations",
            stats.accepted, stats.rejected, stats.rhs_evals
        );
    }
    println!();
}

fn run(args: Args) -> Result<(), SimError> {
    let settings = args.common.load_config()?;
    let mut config = settings.spring.clone();
    if let Some(n) = args.euler_steps {
        config.euler_steps = n;
    }
    if let Some(n) = args.adaptive_samples {
        config.adaptive_samples = n;
    }
    if let Some(tol) = args.tolerance {
        config.adaptive.rtol = tol;
        config.adaptive.atol = tol;
    }

    println!("System: x'' = −x,  x(0) = 0,  v(0) = 1,  t ∈ [0, 2π]\n");

    let euler = solve_ode_euler(config.euler_steps)?;
    let reference = solve_ode_adaptive(config.adaptive_samples, &config.adaptive)?;

    report(&euler);
    report(&reference);

    let views = ComparisonViews::new(&euler, &reference);
    let mut fig = Figure::new(2, 2).panel_size(600, 450);
    for view in views.panels() {
        fig.push(chart(view));
    }

    let out_dir = settings.output.dir.as_path();
    fig.save(&out_dir.join("spring_block.png"))?;

    if settings.output.export_json {
        export_series(
            out_dir,
            "spring_block",
            &SpringExport {
                euler: &euler,
                reference: &reference,
            },
        )?;
    }

    info!(
        euler_drift = euler.max_relative_energy_error(),
        reference_drift = reference.max_relative_energy_error(),
        "energy comparison"
    );
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    banner("Spring-Mass Block", "Explicit Euler vs adaptive RK45/Radau");

    if let Err(e) = run(args) {
        error!(kind = e.kind(), "{e}");
        std::process::exit(1);
    }
}
