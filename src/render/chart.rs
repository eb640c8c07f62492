//! Line charts rasterized straight into an RGB buffer
//!
//! Each chart owns its data-space ranges; a `Figure` lays several charts
//! out on a rows × cols grid and writes a single PNG. Titles, axis labels,
//! range ticks and the legend use the 8×8 glyphs of `font8x8`.

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::info;

use crate::error::Result;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GRAY: Rgb<u8> = Rgb([215, 215, 215]);
pub const RED: Rgb<u8> = Rgb([214, 39, 40]);
pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);
pub const GREEN: Rgb<u8> = Rgb([44, 160, 44]);

/// Glyph cell size in pixels
const GLYPH: i64 = 8;

/// Stroke pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// 8 pixels on, 5 off
    Dashed,
}

/// One polyline
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb<u8>,
    pub style: LineStyle,
    pub width: u32,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, color: Rgb<u8>) -> Self {
        Self {
            label: label.into(),
            points,
            color,
            style: LineStyle::Solid,
            width: 1,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }
}

/// Filled dot at a data point
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub color: Rgb<u8>,
    pub radius: i64,
}

/// Pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// A single panel
#[derive(Debug, Clone, Default)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn x_range(mut self, range: (f64, f64)) -> Self {
        self.x_range = Some(range);
        self
    }

    pub fn y_range(mut self, range: (f64, f64)) -> Self {
        self.y_range = Some(range);
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Data ranges: fixed where set, otherwise the data extent plus 5%
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let mut x_ext = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y_ext = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
            x_ext = (x_ext.0.min(x), x_ext.1.max(x));
            y_ext = (y_ext.0.min(y), y_ext.1.max(y));
        }

        let padded = |(lo, hi): (f64, f64)| {
            if !lo.is_finite() {
                return (-1.0, 1.0);
            }
            let span = hi - lo;
            if span <= f64::EPSILON * lo.abs().max(1.0) {
                (lo - 1.0, hi + 1.0)
            } else {
                (lo - 0.05 * span, hi + 0.05 * span)
            }
        };

        (
            self.x_range.unwrap_or_else(|| padded(x_ext)),
            self.y_range.unwrap_or_else(|| padded(y_ext)),
        )
    }

    /// Draw into `area` of `img`
    pub fn draw(&self, img: &mut RgbImage, area: Rect) {
        let margin = 12;
        let ((x0, x1), (y0, y1)) = self.bounds();
        let (x_lo, x_hi) = (format_tick(x0), format_tick(x1));
        let (y_lo, y_hi) = (format_tick(y0), format_tick(y1));

        let title_band = if self.title.is_empty() { 0 } else { GLYPH + 6 };
        let x_label_band = if self.x_label.is_empty() { 0 } else { GLYPH + 2 };
        let y_label_band = if self.y_label.is_empty() { 0 } else { GLYPH + 2 };
        let tick_width = text_width(&y_lo).max(text_width(&y_hi)) + 4;

        let plot = Rect {
            left: area.left + margin + y_label_band + tick_width,
            top: area.top + margin + title_band,
            width: (area.width - 2 * margin - y_label_band - tick_width).max(1),
            height: (area.height - 2 * margin - title_band - GLYPH - 2 - x_label_band).max(1),
        };
        let (right, bottom) = (plot.left + plot.width - 1, plot.top + plot.height - 1);

        let to_pixel = |x: f64, y: f64| -> (i64, i64) {
            let px = plot.left as f64 + (x - x0) / (x1 - x0) * (plot.width - 1) as f64;
            let py = (plot.top + plot.height - 1) as f64 - (y - y0) / (y1 - y0) * (plot.height - 1) as f64;
            (px.round() as i64, py.round() as i64)
        };

        // Grid
        for i in 1..10 {
            let gx = plot.left + i * plot.width / 10;
            let gy = plot.top + i * plot.height / 10;
            draw_line(img, plot, (gx, plot.top), (gx, plot.top + plot.height - 1), GRAY, 1, None);
            draw_line(img, plot, (plot.left, gy), (plot.left + plot.width - 1, gy), GRAY, 1, None);
        }

        // Zero axes when in range
        if y0 < 0.0 && y1 > 0.0 {
            let (_, zy) = to_pixel(x0, 0.0);
            draw_line(img, plot, (plot.left, zy), (plot.left + plot.width - 1, zy), BLACK, 1, None);
        }
        if x0 < 0.0 && x1 > 0.0 {
            let (zx, _) = to_pixel(0.0, y0);
            draw_line(img, plot, (zx, plot.top), (zx, plot.top + plot.height - 1), BLACK, 1, None);
        }

        for series in &self.series {
            let mut dash = match series.style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some(0u32),
            };
            let visible = series.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
            let pixels: Vec<(i64, i64)> = visible.map(|&(x, y)| to_pixel(x, y)).collect();
            for w in pixels.windows(2) {
                draw_line(img, plot, w[0], w[1], series.color, series.width, dash.as_mut());
            }
        }

        for m in &self.markers {
            let (cx, cy) = to_pixel(m.x, m.y);
            for dy in -m.radius..=m.radius {
                for dx in -m.radius..=m.radius {
                    if dx * dx + dy * dy <= m.radius * m.radius {
                        put(img, plot, cx + dx, cy + dy, m.color);
                    }
                }
            }
        }

        // Frame
        let (l, t) = (plot.left, plot.top);
        for (p, q) in [((l, t), (right, t)), ((right, t), (right, bottom)), ((right, bottom), (l, bottom)), ((l, bottom), (l, t))] {
            draw_line(img, plot, p, q, BLACK, 1, None);
        }

        self.draw_legend(img, plot);

        // Text
        if !self.title.is_empty() {
            let x = area.left + (area.width - text_width(&self.title)) / 2;
            draw_text(img, area, (x, area.top + 4), &self.title, BLACK);
        }

        let tick_y = bottom + 3;
        draw_text(img, area, (plot.left, tick_y), &x_lo, BLACK);
        draw_text(img, area, (right + 1 - text_width(&x_hi), tick_y), &x_hi, BLACK);
        draw_text(img, area, (plot.left - 2 - text_width(&y_hi), plot.top), &y_hi, BLACK);
        draw_text(img, area, (plot.left - 2 - text_width(&y_lo), bottom + 1 - GLYPH), &y_lo, BLACK);

        if !self.x_label.is_empty() {
            let x = plot.left + (plot.width - text_width(&self.x_label)) / 2;
            draw_text(img, area, (x, tick_y + GLYPH + 2), &self.x_label, BLACK);
        }
        if !self.y_label.is_empty() {
            // Stacked one glyph per row
            let rows = self.y_label.chars().count() as i64;
            let mut y = plot.top + (plot.height - rows * (GLYPH + 1)) / 2;
            for c in self.y_label.chars() {
                draw_glyph(img, area, (area.left + margin - 4, y), c, BLACK);
                y += GLYPH + 1;
            }
        }
    }

    /// Swatch and label per labelled series, top-right of the plot
    fn draw_legend(&self, img: &mut RgbImage, plot: Rect) {
        let entries: Vec<&Series> = self.series.iter().filter(|s| !s.label.is_empty()).collect();
        let Some(widest) = entries.iter().map(|s| text_width(&s.label)).max() else {
            return;
        };

        let swatch = 16;
        let pitch = GLYPH + 4;
        let width = swatch + 4 + widest + 8;
        let height = entries.len() as i64 * pitch + 4;
        let left = plot.left + plot.width - width - 4;
        let top = plot.top + 4;

        for y in top..top + height {
            for x in left..left + width {
                put(img, plot, x, y, WHITE);
            }
        }

        for (i, series) in entries.iter().enumerate() {
            let row = top + 4 + i as i64 * pitch;
            let mid = row + GLYPH / 2;
            let mut dash = (series.style == LineStyle::Dashed).then_some(0u32);
            draw_line(img, plot, (left + 4, mid), (left + 4 + swatch, mid), series.color, series.width.min(3), dash.as_mut());
            draw_text(img, plot, (left + swatch + 8, row), &series.label, BLACK);
        }
    }

    /// Render this chart alone
    pub fn render(&self, width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, WHITE);
        self.draw(
            &mut img,
            Rect {
                left: 0,
                top: 0,
                width: width as i64,
                height: height as i64,
            },
        );
        img
    }
}

fn put(img: &mut RgbImage, clip: Rect, x: i64, y: i64, color: Rgb<u8>) {
    if clip.contains(x, y) && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn text_width(text: &str) -> i64 {
    text.chars().count() as i64 * GLYPH
}

/// Range end as short text: fixed point, or exponent form for very large
/// or very small magnitudes
fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-2..1e4).contains(&magnitude) {
        return format!("{value:.1e}");
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// One 8×8 glyph with its top-left corner at `at`; unknown characters
/// leave a blank cell
fn draw_glyph(img: &mut RgbImage, clip: Rect, at: (i64, i64), c: char, color: Rgb<u8>) {
    let glyph = BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c)).or_else(|| GREEK_FONTS.get(c));
    let Some(rows) = glyph else {
        return;
    };
    for (dy, bits) in rows.iter().enumerate() {
        for dx in 0..8 {
            // Bit 0 is the leftmost pixel
            if bits & (1 << dx) != 0 {
                put(img, clip, at.0 + dx as i64, at.1 + dy as i64, color);
            }
        }
    }
}

fn draw_text(img: &mut RgbImage, clip: Rect, at: (i64, i64), text: &str, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        draw_glyph(img, clip, (at.0 + i as i64 * GLYPH, at.1), c, color);
    }
}

/// Bresenham line with a square brush; `dash` carries the pattern phase
/// across segments of one polyline
fn draw_line(
    img: &mut RgbImage,
    clip: Rect,
    from: (i64, i64),
    to: (i64, i64),
    color: Rgb<u8>,
    width: u32,
    mut dash: Option<&mut u32>,
) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let half = (width as i64 - 1) / 2;

    loop {
        let on = match dash.as_deref_mut() {
            None => true,
            Some(phase) => {
                let on = *phase % 13 < 8;
                *phase = phase.wrapping_add(1);
                on
            }
        };
        if on {
            for oy in -half..=half + (width as i64 - 1) % 2 {
                for ox in -half..=half + (width as i64 - 1) % 2 {
                    put(img, clip, x + ox, y + oy, color);
                }
            }
        }

        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Charts on a rows × cols grid
#[derive(Debug, Clone)]
pub struct Figure {
    pub rows: u32,
    pub cols: u32,
    pub panel_width: u32,
    pub panel_height: u32,
    pub charts: Vec<Chart>,
}

impl Figure {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            panel_width: 600,
            panel_height: 400,
            charts: Vec::new(),
        }
    }

    pub fn panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width.max(32);
        self.panel_height = height.max(32);
        self
    }

    pub fn push(&mut self, chart: Chart) {
        self.charts.push(chart);
    }

    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.cols * self.panel_width, self.rows * self.panel_height, WHITE);
        let capacity = (self.rows * self.cols) as usize;

        for (i, chart) in self.charts.iter().take(capacity).enumerate() {
            let row = i as u32 / self.cols;
            let col = i as u32 % self.cols;
            chart.draw(
                &mut img,
                Rect {
                    left: (col * self.panel_width) as i64,
                    top: (row * self.panel_height) as i64,
                    width: self.panel_width as i64,
                    height: self.panel_height as i64,
                },
            );
        }

        img
    }

    /// Render and write a PNG
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.render().save(path)?;

        let titles: Vec<&str> = self.charts.iter().map(|c| c.title.as_str()).collect();
        info!(path = %path.display(), panels = ?titles, "figure saved");
        Ok(())
    }
}
