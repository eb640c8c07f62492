//! Run configuration
//!
//! One TOML file can carry settings for every simulation; each binary reads
//! only its own section. Missing sections and fields fall back to defaults,
//! so an empty file is a valid configuration.
//!
//! ```toml
//! [output]
//! dir = "results"
//! export_json = true
//!
//! [beats]
//! f1 = 440.0
//! f2 = 446.0
//!
//! [spring]
//! euler_steps = 200
//!
//! [spring.adaptive]
//! rtol = 1e-10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::optics::NewtonRingsConfig;
use crate::oscillator::SpringConfig;
use crate::thermal::{RootOptions, DEFAULT_INITIAL_GUESS, SOLAR_PEAK_WAVELENGTH};
use crate::waves::{AnimationConfig, BeatConfig, StandingWaveParams};

/// Where results go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Also write the plotted series as JSON
    pub export_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            export_json: false,
        }
    }
}

/// Wien solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WienConfig {
    /// Guess used when stdin gives nothing usable
    pub fallback_guess: f64,
    /// Peak wavelength for the temperature estimate (m)
    pub wavelength: f64,
    /// x-range of the graphical-solution chart
    pub plot_range: (f64, f64),
    pub plot_samples: usize,
    pub root: RootOptions,
}

impl Default for WienConfig {
    fn default() -> Self {
        Self {
            fallback_guess: DEFAULT_INITIAL_GUESS,
            wavelength: SOLAR_PEAK_WAVELENGTH,
            plot_range: (-1.0, 7.0),
            plot_samples: 400,
            root: RootOptions::default(),
        }
    }
}

/// Standing-wave parameters and frame schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingWaveConfig {
    pub wave: StandingWaveParams,
    pub animation: AnimationConfig,
}

/// Settings for all simulations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub output: OutputConfig,
    pub beats: BeatConfig,
    pub newton_rings: NewtonRingsConfig,
    pub spring: SpringConfig,
    pub standing_wave: StandingWaveConfig,
    pub wien: WienConfig,
}

impl SimConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::optics::ApertureHandling;

    #[test]
    fn test_empty_file_is_default() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config.beats.f1, 440.0);
        assert_eq!(config.newton_rings.resolution, 1000);
        assert_eq!(config.spring.euler_steps, 100);
        assert_eq!(config.standing_wave.animation.frames, 200);
        assert_eq!(config.wien.fallback_guess, 5.0);
        assert_eq!(config.output.dir, PathBuf::from("results"));
    }

    #[test]
    fn test_partial_sections() {
        let text = r#"
            [beats]
            f2 = 450.0
            num_points = 100

            [newton_rings]
            aperture = "clamp"

            [spring.adaptive]
            rtol = 1e-10

            [standing_wave.wave]
            amplitude = 0.5
        "#;
        let config = SimConfig::from_toml_str(text).unwrap();
        assert_eq!(config.beats.f1, 440.0);
        assert_eq!(config.beats.f2, 450.0);
        assert_eq!(config.beats.num_points, 100);
        assert_eq!(config.newton_rings.aperture, ApertureHandling::Clamp);
        assert_eq!(config.spring.adaptive.rtol, 1e-10);
        assert_eq!(config.spring.adaptive.atol, 1.49012e-8);
        assert_eq!(config.standing_wave.wave.amplitude, 0.5);
    }

    #[test]
    fn test_malformed_toml() {
        let err = SimConfig::from_toml_str("[beats\nf1 = ").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.toml");
        std::fs::write(&path, "[output]\nexport_json = true\n").unwrap();
        let config = SimConfig::load_or_default(Some(&path)).unwrap();
        assert!(config.output.export_json);
        assert!(matches!(
            SimConfig::load(&dir.path().join("missing.toml")),
            Err(SimError::Io(_))
        ));
    }
}
