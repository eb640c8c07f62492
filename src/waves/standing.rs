//! Standing Waves: Superposition of Counter-Propagating Sinusoids
//!
//! A forward wave and a backward wave of equal amplitude
//!
//!   y₊(x, t) = A·sin(kx − ωt)
//!   y₋(x, t) = A·sin(kx + ωt)
//!
//! sum to the standing wave 2A·sin(kx)·cos(ωt).
//!
//! ## Animation Model
//!
//! ```text
//! AnimationState::init(x) ──► sink.begin(&state)
//!        │
//!        ▼  for i in 0..frames (strictly increasing)
//! advance(&state, params, i, dt) ──► sink.draw(&state)
//!        │
//!        ▼
//!   sink.finish()
//! ```
//!
//! The frame update is a pure function of the previous state and the frame
//! index; the only thing carried between frames is the spatial grid.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{ensure_count, ensure_finite, ensure_positive, Result};
use crate::sampling::linspace;

/// Instantaneous displacement A·sin(kx − ωt)
pub fn sine_wave_zero_phi(x: &Array1<f64>, t: f64, amplitude: f64, omega: f64, k: f64) -> Array1<f64> {
    x.mapv(|xi| amplitude * (k * xi - omega * t).sin())
}

/// Wave parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingWaveParams {
    /// Amplitude A (m)
    pub amplitude: f64,
    /// Angular frequency ω (rad/s)
    pub omega: f64,
    /// Wavenumber k (rad/m)
    pub k: f64,
}

impl Default for StandingWaveParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            omega: 2.0 * PI,
            k: PI / 2.0,
        }
    }
}

/// Animation driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of frames to produce
    pub frames: usize,
    /// Delay between frames (ms)
    pub interval_ms: u32,
    /// Simulated time per frame (s)
    pub time_step: f64,
    /// Spatial domain start (m)
    pub x_min: f64,
    /// Spatial domain end (m)
    pub x_max: f64,
    /// Spatial sample count
    pub samples: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 200,
            interval_ms: 50,
            time_step: 0.05,
            x_min: 0.0,
            x_max: 10.0,
            samples: 1000,
        }
    }
}

/// Series shown in one frame
#[derive(Debug, Clone, Serialize)]
pub struct AnimationState {
    /// Spatial grid (fixed for the whole animation)
    pub x: Array1<f64>,
    /// Forward wave (+ω)
    pub forward: Array1<f64>,
    /// Backward wave (−ω)
    pub backward: Array1<f64>,
    /// forward + backward
    pub standing: Array1<f64>,
    /// Frame the series belong to; `None` before the first draw
    pub frame: Option<usize>,
    /// Simulated time of `frame`
    pub time: f64,
}

impl AnimationState {
    /// Cleared state: all three series empty
    pub fn init(x: Array1<f64>) -> Self {
        Self {
            x,
            forward: Array1::zeros(0),
            backward: Array1::zeros(0),
            standing: Array1::zeros(0),
            frame: None,
            time: 0.0,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.forward.is_empty() && self.backward.is_empty() && self.standing.is_empty()
    }
}

/// Compute frame `index` from the previous state
///
/// Only the spatial grid is read from `state`; the series are rebuilt from
/// t = time_step · index.
pub fn advance(state: &AnimationState, params: &StandingWaveParams, index: usize, time_step: f64) -> AnimationState {
    let t = time_step * index as f64;
    let forward = sine_wave_zero_phi(&state.x, t, params.amplitude, params.omega, params.k);
    let backward = sine_wave_zero_phi(&state.x, t, params.amplitude, -params.omega, params.k);
    let standing = &forward + &backward;

    AnimationState {
        x: state.x.clone(),
        forward,
        backward,
        standing,
        frame: Some(index),
        time: t,
    }
}

/// Rendering target for animation frames
pub trait FrameSink {
    /// Called once with the cleared state before any frame
    fn begin(&mut self, _state: &AnimationState) -> Result<()> {
        Ok(())
    }

    /// Called once per frame, in increasing frame order
    fn draw(&mut self, state: &AnimationState) -> Result<()>;

    /// Called after the last frame
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that keeps every frame in memory
#[derive(Debug, Default)]
pub struct FrameCollector {
    pub initial: Option<AnimationState>,
    pub frames: Vec<AnimationState>,
    pub finished: bool,
}

impl FrameSink for FrameCollector {
    fn begin(&mut self, state: &AnimationState) -> Result<()> {
        self.initial = Some(state.clone());
        Ok(())
    }

    fn draw(&mut self, state: &AnimationState) -> Result<()> {
        self.frames.push(state.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Animation driver owning the wave parameters and frame schedule
#[derive(Debug, Clone)]
pub struct StandingWaveAnimation {
    params: StandingWaveParams,
    config: AnimationConfig,
    x: Array1<f64>,
}

impl StandingWaveAnimation {
    pub fn new(params: StandingWaveParams, config: AnimationConfig) -> Result<Self> {
        ensure_finite("amplitude", params.amplitude)?;
        ensure_finite("omega", params.omega)?;
        ensure_finite("k", params.k)?;
        ensure_positive("time_step", config.time_step)?;
        ensure_count("frames", config.frames)?;
        let x = linspace(config.x_min, config.x_max, config.samples)?;

        Ok(Self { params, config, x })
    }

    pub fn params(&self) -> &StandingWaveParams {
        &self.params
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Spatial grid
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Compute a single frame without running the driver
    pub fn frame(&self, index: usize) -> AnimationState {
        advance(
            &AnimationState::init(self.x.clone()),
            &self.params,
            index,
            self.config.time_step,
        )
    }

    /// Feed every frame to `sink` in order
    pub fn run<S: FrameSink>(&self, sink: &mut S) -> Result<()> {
        let mut state = AnimationState::init(self.x.clone());
        sink.begin(&state)?;

        for index in 0..self.config.frames {
            state = advance(&state, &self.params, index, self.config.time_step);
            sink.draw(&state)?;
        }

        debug!(frames = self.config.frames, "standing wave animation complete");
        sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_wave_at_time_zero() {
        let params = StandingWaveParams::default();
        let x = Array1::from(vec![1.0]);
        let state = advance(&AnimationState::init(x), &params, 0, 0.05);

        assert!((state.standing[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sum_matches_closed_form() {
        let params = StandingWaveParams::default();
        let x = linspace(0.0, 10.0, 101).unwrap();
        let state = advance(&AnimationState::init(x.clone()), &params, 7, 0.05);

        let t = 0.35;
        for (i, &xi) in x.iter().enumerate() {
            let expected = 2.0 * params.amplitude * (params.k * xi).sin() * (params.omega * t).cos();
            assert!((state.standing[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_driver_feeds_frames_in_order() {
        let config = AnimationConfig {
            frames: 12,
            samples: 50,
            ..AnimationConfig::default()
        };
        let animation = StandingWaveAnimation::new(StandingWaveParams::default(), config).unwrap();
        let mut sink = FrameCollector::default();
        animation.run(&mut sink).unwrap();

        assert!(sink.initial.as_ref().unwrap().is_cleared());
        assert_eq!(sink.frames.len(), 12);
        assert!(sink.finished);
        for (i, frame) in sink.frames.iter().enumerate() {
            assert_eq!(frame.frame, Some(i));
            assert!((frame.time - 0.05 * i as f64).abs() < 1e-15);
            assert_eq!(frame.standing.len(), 50);
        }
    }

    #[test]
    fn test_frame_independent_of_history() {
        let animation =
            StandingWaveAnimation::new(StandingWaveParams::default(), AnimationConfig::default()).unwrap();
        let mut sink = FrameCollector::default();
        animation.run(&mut sink).unwrap();

        let direct = animation.frame(150);
        assert_eq!(direct.standing, sink.frames[150].standing);
    }

    #[test]
    fn test_rejects_zero_frames() {
        let config = AnimationConfig {
            frames: 0,
            ..AnimationConfig::default()
        };
        assert!(StandingWaveAnimation::new(StandingWaveParams::default(), config).is_err());
    }
}
