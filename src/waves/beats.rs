//! Beat Frequency: Superposition of Two Sinusoids
//!
//! Two waves of nearby frequency
//!
//!   y(t) = A₁·sin(2πf₁t) + A₂·sin(2πf₂t)
//!
//! produce a slow amplitude modulation at the beat frequency |f₁ − f₂|.
//!
//! ## Parameter Sweeps
//!
//! The sweep helpers hold every parameter fixed except one and re-run the
//! simulation for a small candidate set, so the resulting waveforms can be
//! laid out side by side.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{ensure_finite, Result};
use crate::sampling::linspace;

/// Frequency differences (Hz) for the frequency sweep
pub const FREQUENCY_DIFFS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// A₂ values (with A₁ = 1) for the amplitude sweep
pub const AMPLITUDE_RATIOS: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

/// Beat simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatConfig {
    /// Frequency of wave 1 (Hz)
    pub f1: f64,
    /// Frequency of wave 2 (Hz)
    pub f2: f64,
    /// Amplitude of wave 1
    pub a1: f64,
    /// Amplitude of wave 2
    pub a2: f64,
    /// Interval start (s)
    pub t_start: f64,
    /// Interval end (s)
    pub t_end: f64,
    /// Sample count
    pub num_points: usize,
    /// Render the three-panel figure after simulating
    pub show_plot: bool,
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            f1: 440.0,
            f2: 444.0,
            a1: 1.0,
            a2: 1.0,
            t_start: 0.0,
            t_end: 1.0,
            num_points: 5000,
            show_plot: true,
        }
    }
}

impl BeatConfig {
    /// Defaults with the two frequencies replaced
    pub fn with_frequencies(f1: f64, f2: f64) -> Self {
        Self {
            f1,
            f2,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("f1", self.f1)?;
        ensure_finite("f2", self.f2)?;
        ensure_finite("a1", self.a1)?;
        ensure_finite("a2", self.a2)?;
        Ok(())
    }
}

/// Output of one beat simulation
#[derive(Debug, Clone, Serialize)]
pub struct BeatResult {
    /// Uniform time samples
    pub t: Array1<f64>,
    /// A₁·sin(2πf₁t)
    pub wave1: Array1<f64>,
    /// A₂·sin(2πf₂t)
    pub wave2: Array1<f64>,
    /// wave1 + wave2
    pub superposed: Array1<f64>,
    /// |f₁ − f₂|
    pub beat_frequency: f64,
}

/// Sample A·sin(2πft) on a time grid
pub fn sinusoid(t: &Array1<f64>, frequency: f64, amplitude: f64) -> Array1<f64> {
    t.mapv(|ti| amplitude * (2.0 * PI * frequency * ti).sin())
}

/// Superpose two sinusoids and report the beat frequency
pub fn simulate_beat_frequency(config: &BeatConfig) -> Result<BeatResult> {
    config.validate()?;

    let t = linspace(config.t_start, config.t_end, config.num_points)?;
    let wave1 = sinusoid(&t, config.f1, config.a1);
    let wave2 = sinusoid(&t, config.f2, config.a2);
    let superposed = &wave1 + &wave2;
    let beat_frequency = (config.f1 - config.f2).abs();

    debug!(
        f1 = config.f1,
        f2 = config.f2,
        samples = t.len(),
        beat_frequency,
        "beat simulation complete"
    );

    Ok(BeatResult {
        t,
        wave1,
        wave2,
        superposed,
        beat_frequency,
    })
}

/// Which parameter a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepParameter {
    FrequencyDifference,
    AmplitudeRatio,
}

impl SweepParameter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrequencyDifference => "Frequency diff",
            Self::AmplitudeRatio => "Amplitude ratio",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::FrequencyDifference => " Hz",
            Self::AmplitudeRatio => "",
        }
    }
}

/// One run of a parameter sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    pub parameter: SweepParameter,
    pub value: f64,
    pub result: BeatResult,
}

impl SweepEntry {
    /// Panel title, e.g. "Frequency diff = 5 Hz"
    pub fn title(&self) -> String {
        format!("{} = {}{}", self.parameter.label(), self.value, self.parameter.unit())
    }
}

/// Vary f₂ = base + diff while holding everything else at defaults
pub fn frequency_difference_sweep(base_frequency: f64, diffs: &[f64]) -> Result<Vec<SweepEntry>> {
    diffs
        .iter()
        .map(|&diff| {
            let config = BeatConfig {
                f1: base_frequency,
                f2: base_frequency + diff,
                show_plot: false,
                ..BeatConfig::default()
            };
            Ok(SweepEntry {
                parameter: SweepParameter::FrequencyDifference,
                value: diff,
                result: simulate_beat_frequency(&config)?,
            })
        })
        .collect()
}

/// Vary A₂ while holding everything else at defaults
pub fn amplitude_ratio_sweep(ratios: &[f64]) -> Result<Vec<SweepEntry>> {
    ratios
        .iter()
        .map(|&ratio| {
            let config = BeatConfig {
                a2: ratio,
                show_plot: false,
                ..BeatConfig::default()
            };
            Ok(SweepEntry {
                parameter: SweepParameter::AmplitudeRatio,
                value: ratio,
                result: simulate_beat_frequency(&config)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_default_beat_frequency() {
        let result = simulate_beat_frequency(&BeatConfig::with_frequencies(440.0, 444.0)).unwrap();
        assert_eq!(result.beat_frequency, 4.0);
        assert_eq!(result.t.len(), 5000);
        assert_eq!(result.superposed.len(), 5000);
    }

    #[test]
    fn test_equal_frequencies_double_amplitude() {
        let config = BeatConfig {
            f1: 440.0,
            f2: 440.0,
            a1: 0.7,
            a2: 0.7,
            num_points: 1000,
            ..BeatConfig::default()
        };
        let result = simulate_beat_frequency(&config).unwrap();
        assert_eq!(result.beat_frequency, 0.0);

        for (&t, &y) in result.t.iter().zip(result.superposed.iter()) {
            let expected = 2.0 * 0.7 * (2.0 * PI * 440.0 * t).sin();
            assert!((y - expected).abs() < 1e-12, "t = {}: {} vs {}", t, y, expected);
        }
    }

    #[test]
    fn test_zero_points_rejected() {
        let config = BeatConfig {
            num_points: 0,
            ..BeatConfig::default()
        };
        assert!(matches!(
            simulate_beat_frequency(&config),
            Err(SimError::InvalidArgument { parameter: "num_points", .. })
        ));
    }

    #[test]
    fn test_frequency_sweep() {
        let sweep = frequency_difference_sweep(440.0, &FREQUENCY_DIFFS).unwrap();
        assert_eq!(sweep.len(), 4);
        for (entry, diff) in sweep.iter().zip(FREQUENCY_DIFFS) {
            assert_eq!(entry.result.beat_frequency, diff);
        }
        assert_eq!(sweep[2].title(), "Frequency diff = 5 Hz");
    }

    #[test]
    fn test_amplitude_sweep_scales_second_wave() {
        let sweep = amplitude_ratio_sweep(&AMPLITUDE_RATIOS).unwrap();
        for entry in &sweep {
            let peak = entry.result.wave2.iter().cloned().fold(0.0, f64::max);
            assert!(peak <= entry.value + 1e-12);
            assert!(peak > 0.99 * entry.value, "peak {} for ratio {}", peak, entry.value);
            assert_eq!(entry.result.beat_frequency, 4.0);
        }
    }
}
