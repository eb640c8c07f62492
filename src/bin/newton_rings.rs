//! Newton's Rings
//!
//! Interference pattern of monochromatic light reflected from the air gap
//! between a plano-convex lens and a flat plate, rendered as a grayscale
//! image on the fixed intensity scale [0, 4].

use clap::Parser;
use tracing::{error, info};

use classical_sims::cli::{banner, init_logging, CommonArgs};
use classical_sims::export::export_series;
use classical_sims::optics::{dark_ring_radius, simulate_newton_rings, ApertureHandling, INTENSITY_RANGE};
use classical_sims::render::save_heatmap;
use classical_sims::SimError;

#[derive(Parser, Debug)]
#[command(name = "newton_rings")]
#[command(about = "Newton's rings interference pattern")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Wavelength (m)
    #[arg(long)]
    wavelength: Option<f64>,

    /// Lens curvature radius (m)
    #[arg(long)]
    lens_radius: Option<f64>,

    /// Half width of the imaged region (m)
    #[arg(long)]
    half_width: Option<f64>,

    /// Samples per axis
    #[arg(long)]
    resolution: Option<usize>,

    /// Clamp points outside the lens aperture instead of failing
    #[arg(long)]
    clamp_aperture: bool,
}

fn run(args: Args) -> Result<(), SimError> {
    let settings = args.common.load_config()?;
    let mut config = settings.newton_rings.clone();
    if let Some(wavelength) = args.wavelength {
        config.wavelength = wavelength;
    }
    if let Some(radius) = args.lens_radius {
        config.lens_radius = radius;
    }
    if let Some(half_width) = args.half_width {
        config.half_width = half_width;
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if args.clamp_aperture {
        config.aperture = ApertureHandling::Clamp;
    }

    println!("Parameters:");
    println!("  λ = {:.1} nm", config.wavelength * 1e9);
    println!("  R = {} m", config.lens_radius);
    println!("  region = ±{} mm, {}×{} samples\n", config.half_width * 1e3, config.resolution, config.resolution);

    let field = simulate_newton_rings(&config)?;

    println!("Dark ring radii (r_m = √(mλR)):");
    for order in 1..=5 {
        let r = dark_ring_radius(order, config.wavelength, config.lens_radius);
        println!("  m = {}: {:.4} mm", order, r * 1e3);
    }

    let out_dir = settings.output.dir.as_path();
    save_heatmap(&field.intensity, INTENSITY_RANGE, &out_dir.join("newton_rings.png"))?;

    if settings.output.export_json {
        export_series(out_dir, "newton_rings", &field)?;
    }

    let (x_min, x_max, y_min, y_max) = field.extent();
    info!(x_min, x_max, y_min, y_max, "image extent (m)");
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    banner("Newton's Rings", "Thin-film interference under a plano-convex lens");

    if let Err(e) = run(args) {
        error!(kind = e.kind(), "{e}");
        std::process::exit(1);
    }
}
