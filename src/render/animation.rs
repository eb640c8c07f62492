//! Animated GIF output for the standing-wave animation

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

use super::chart::{Chart, Series, BLUE, GREEN, RED};
use crate::error::Result;
use crate::sampling::zip_points;
use crate::waves::{AnimationState, FrameSink};

/// Fixed plot window for every frame
pub const STANDING_WAVE_X_RANGE: (f64, f64) = (0.0, 10.0);
pub const STANDING_WAVE_Y_RANGE: (f64, f64) = (-2.5, 2.5);

/// Draw one animation state as a chart
///
/// Forward and backward waves are dashed; the standing wave is solid and
/// thicker. A cleared state gives an empty chart.
pub fn standing_wave_chart(state: &AnimationState) -> Chart {
    let title = match state.frame {
        Some(i) => format!("Standing Wave (frame {i}, t = {:.2} s)", state.time),
        None => "Standing Wave".to_string(),
    };

    Chart::new(title)
        .labels("x", "y")
        .x_range(STANDING_WAVE_X_RANGE)
        .y_range(STANDING_WAVE_Y_RANGE)
        .with_series(Series::new("forward", zip_points(&state.x, &state.forward), BLUE).dashed())
        .with_series(Series::new("backward", zip_points(&state.x, &state.backward), GREEN).dashed())
        .with_series(Series::new("standing", zip_points(&state.x, &state.standing), RED).width(3))
}

/// In-memory GIF stream, readable after the encoder is gone
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Frame sink that encodes frames into an animated GIF
///
/// Frames are encoded into memory; `finish` writes the file.
pub struct GifSink {
    path: PathBuf,
    width: u32,
    height: u32,
    interval_ms: u32,
    buffer: SharedBuffer,
    encoder: Option<GifEncoder<SharedBuffer>>,
    frames_written: usize,
}

impl GifSink {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, interval_ms: u32) -> Self {
        Self {
            path: path.into(),
            width: width.max(32),
            height: height.max(32),
            interval_ms,
            buffer: SharedBuffer::default(),
            encoder: None,
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, _state: &AnimationState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.buffer = SharedBuffer::default();
        // Speed 10 trades palette quality for encode time
        let mut encoder = GifEncoder::new_with_speed(self.buffer.clone(), 10);
        encoder.set_repeat(Repeat::Infinite)?;
        self.encoder = Some(encoder);
        self.frames_written = 0;
        Ok(())
    }

    fn draw(&mut self, state: &AnimationState) -> Result<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(io::Error::other("gif sink used before begin").into());
        };

        let rgb = standing_wave_chart(state).render(self.width, self.height);
        let rgba = DynamicImage::ImageRgb8(rgb).to_rgba8();
        let delay = Delay::from_numer_denom_ms(self.interval_ms, 1);
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;

        self.frames_written += 1;
        debug!(frame = ?state.frame, "gif frame encoded");
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(io::Error::other("gif sink finished before begin").into());
        };
        // Trailer goes into the buffer on drop
        drop(encoder);
        std::fs::write(&self.path, self.buffer.0.borrow().as_slice())?;
        self.buffer = SharedBuffer::default();

        info!(path = %self.path.display(), frames = self.frames_written, "animation saved");
        Ok(())
    }
}
