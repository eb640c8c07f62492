//! Rendering Module
//!
//! Raster output through the `image` crate:
//!
//! - **chart**: line charts and multi-panel figures (PNG)
//! - **heatmap**: grayscale scalar fields (PNG)
//! - **animation**: standing-wave frames streamed to an animated GIF

mod animation;
mod chart;
mod heatmap;

pub use animation::{standing_wave_chart, GifSink, STANDING_WAVE_X_RANGE, STANDING_WAVE_Y_RANGE};
pub use chart::{Chart, Figure, LineStyle, Marker, Rect, Series, BLACK, BLUE, GRAY, GREEN, RED, WHITE};
pub use heatmap::{render_grayscale, save_heatmap};
