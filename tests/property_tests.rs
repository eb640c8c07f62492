//! Property-based tests for the simulations
//!
//! - Equal-frequency beats collapse to a single sinusoid of doubled amplitude
//! - Explicit Euler energy grows monotonically on the oscillator
//! - The standing wave factorizes as 2A·sin(kx)·cos(ωt)
//! - Newton's-ring intensity is periodic in the gap thickness with period λ/2
//! - Wien temperature times wavelength recovers the constant

use std::f64::consts::PI;

use classical_sims::linspace;
use classical_sims::optics::intensity_from_thickness;
use classical_sims::oscillator::{solve_ode_adaptive, solve_ode_euler};
use classical_sims::thermal::calculate_temperature;
use classical_sims::waves::{
    simulate_beat_frequency, AnimationConfig, BeatConfig, StandingWaveAnimation, StandingWaveParams,
};
use classical_sims::AdaptiveOptions;
use proptest::prelude::*;

// =============================================================================
// Beats
// =============================================================================

proptest! {
    #[test]
    fn equal_frequencies_give_no_beat(
        f in 1.0f64..1000.0,
        amplitude in 0.1f64..10.0,
        num_points in 2usize..500,
    ) {
        let config = BeatConfig {
            f1: f,
            f2: f,
            a1: amplitude,
            a2: amplitude,
            num_points,
            ..BeatConfig::default()
        };
        let result = simulate_beat_frequency(&config).unwrap();

        prop_assert_eq!(result.beat_frequency, 0.0);
        for (&t, &y) in result.t.iter().zip(result.superposed.iter()) {
            let expected = 2.0 * amplitude * (2.0 * PI * f * t).sin();
            prop_assert!(
                (y - expected).abs() <= 1e-12 * amplitude,
                "t={}, got {}, expected {}", t, y, expected
            );
        }
    }

    #[test]
    fn beat_frequency_is_symmetric(f1 in 1.0f64..1000.0, f2 in 1.0f64..1000.0) {
        let a = simulate_beat_frequency(&BeatConfig { num_points: 4, ..BeatConfig::with_frequencies(f1, f2) }).unwrap();
        let b = simulate_beat_frequency(&BeatConfig { num_points: 4, ..BeatConfig::with_frequencies(f2, f1) }).unwrap();
        prop_assert_eq!(a.beat_frequency, b.beat_frequency);
        prop_assert!(a.beat_frequency >= 0.0);
    }
}

// =============================================================================
// Spring-mass energy
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn euler_energy_increases_every_step(step_num in 10usize..2000) {
        let energy = solve_ode_euler(step_num).unwrap().energy();
        prop_assert_eq!(energy.len(), step_num + 1);
        for i in 1..energy.len() {
            prop_assert!(
                energy[i] > energy[i - 1],
                "N={}: E[{}]={} <= E[{}]={}", step_num, i, energy[i], i - 1, energy[i - 1]
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn adaptive_reference_holds_energy(samples in 10usize..400) {
        let tr = solve_ode_adaptive(samples, &AdaptiveOptions::default()).unwrap();
        prop_assert_eq!(tr.len(), samples + 1);
        prop_assert!(tr.max_relative_energy_error() < 1e-6);
    }
}

// =============================================================================
// Standing waves
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn first_frame_is_pure_spatial_profile(
        amplitude in 0.1f64..5.0,
        omega in 0.1f64..20.0,
        k in 0.1f64..5.0,
    ) {
        let params = StandingWaveParams { amplitude, omega, k };
        let config = AnimationConfig { samples: 200, ..AnimationConfig::default() };
        let animation = StandingWaveAnimation::new(params, config).unwrap();
        let state = animation.frame(0);

        for (&x, &y) in state.x.iter().zip(state.standing.iter()) {
            let expected = 2.0 * amplitude * (k * x).sin();
            prop_assert!((y - expected).abs() <= 1e-12 * amplitude);
        }
    }

    #[test]
    fn standing_wave_factorizes(frame in 0usize..200, amplitude in 0.1f64..5.0) {
        let params = StandingWaveParams { amplitude, ..StandingWaveParams::default() };
        let config = AnimationConfig { samples: 100, ..AnimationConfig::default() };
        let animation = StandingWaveAnimation::new(params, config).unwrap();
        let state = animation.frame(frame);

        for (&x, &y) in state.x.iter().zip(state.standing.iter()) {
            let expected = 2.0 * amplitude * (params.k * x).sin() * (params.omega * state.time).cos();
            prop_assert!((y - expected).abs() <= 1e-9 * amplitude, "x={}, t={}", x, state.time);
        }
    }
}

// =============================================================================
// Newton's rings
// =============================================================================

proptest! {
    #[test]
    fn intensity_periodic_in_half_wavelength(
        d in 0.0f64..2e-6,
        wavelength in 400e-9f64..700e-9,
    ) {
        let a = intensity_from_thickness(d, wavelength);
        let b = intensity_from_thickness(d + wavelength / 2.0, wavelength);
        prop_assert!((a - b).abs() < 1e-9, "I(d)={}, I(d+λ/2)={}", a, b);
        prop_assert!((0.0..=4.0).contains(&a));
    }
}

// =============================================================================
// Wien's law and sampling
// =============================================================================

proptest! {
    #[test]
    fn temperature_times_wavelength_is_constant(
        wavelength in 1e-8f64..1e-4,
        constant in 1e-4f64..1e-2,
    ) {
        let t = calculate_temperature(wavelength, constant).unwrap();
        prop_assert!((t * wavelength - constant).abs() <= 1e-12 * constant);
    }

    #[test]
    fn linspace_hits_both_endpoints(start in -100.0f64..100.0, span in 0.0f64..100.0, n in 2usize..1000) {
        let end = start + span;
        let grid = linspace(start, end, n).unwrap();
        prop_assert_eq!(grid.len(), n);
        prop_assert_eq!(grid[0], start);
        prop_assert_eq!(grid[n - 1], end);
    }
}
