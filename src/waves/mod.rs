//! Wave Superposition Module
//!
//! - **Beats**: two co-propagating sinusoids of nearby frequency
//! - **Standing waves**: two counter-propagating sinusoids of equal amplitude

mod beats;
mod standing;

pub use beats::{
    amplitude_ratio_sweep, frequency_difference_sweep, simulate_beat_frequency, sinusoid,
    BeatConfig, BeatResult, SweepEntry, SweepParameter, AMPLITUDE_RATIOS, FREQUENCY_DIFFS,
};
pub use standing::{
    advance, sine_wave_zero_phi, AnimationConfig, AnimationState, FrameCollector, FrameSink,
    StandingWaveAnimation, StandingWaveParams,
};
