//! Overlaid histogram chart rendered to PNG

use super::canvas::{blend, colors, Canvas};
use super::font::{text_height, text_width};
use super::histogram::Histogram;
use crate::error::Result;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 1;
const LEGEND_SCALE: u32 = 2;

/// Padding around the plotting area
const MARGIN_LEFT: u32 = 100;
const MARGIN_RIGHT: u32 = 40;
const MARGIN_BOTTOM: u32 = 70;
const MARGIN_TOP_BASE: u32 = 24;

/// One data set drawn as translucent bars
#[derive(Debug, Clone)]
pub struct Series {
    pub values: Vec<f64>,
    pub color: Rgb<u8>,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Series {
    pub fn new(values: Vec<f64>, color: Rgb<u8>, alpha: f64) -> Self {
        Self {
            values,
            color,
            alpha,
            label: None,
        }
    }

    /// Show this series in the legend
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Histogram chart builder
#[derive(Debug, Clone)]
pub struct HistogramChart {
    width: u32,
    height: u32,
    bins: usize,
    range: (f64, f64),
    title: Vec<String>,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl HistogramChart {
    /// New chart binning every series over the same range
    pub fn new(range: (f64, f64), bins: usize) -> Self {
        Self {
            width: 1200,
            height: 500,
            bins,
            range,
            title: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Add a title line; lines stack top to bottom
    pub fn title(mut self, line: impl Into<String>) -> Self {
        self.title.push(line.into());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Add a series; later series are drawn on top
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Title lines, top to bottom
    pub fn titles(&self) -> &[String] {
        &self.title
    }

    /// `(x, y)` axis labels
    pub fn axis_labels(&self) -> (&str, &str) {
        (&self.x_label, &self.y_label)
    }

    /// Legend entries in drawing order; unlabelled series are left out
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series.iter().filter_map(|s| s.label.as_deref()).collect()
    }

    pub fn series_list(&self) -> &[Series] {
        &self.series
    }

    /// Binned data, one histogram per series
    pub fn histograms(&self) -> Vec<Histogram> {
        self.series
            .iter()
            .map(|s| Histogram::compute(&s.values, self.bins, self.range))
            .collect()
    }

    /// Render to an image
    pub fn render(&self) -> RgbImage {
        let mut canvas = Canvas::new(self.width, self.height, colors::WHITE);
        let histograms = self.histograms();

        let title_line = text_height(TITLE_SCALE) + 8;
        let margin_top = MARGIN_TOP_BASE + title_line * self.title.len() as u32;
        let area = PlotArea {
            left: MARGIN_LEFT as i64,
            top: margin_top as i64,
            width: self.width.saturating_sub(MARGIN_LEFT + MARGIN_RIGHT).max(1),
            height: self
                .height
                .saturating_sub(margin_top + MARGIN_BOTTOM)
                .max(1),
        };

        let (lo, hi) = histograms
            .first()
            .map(Histogram::range)
            .unwrap_or(self.range);
        let max_count = histograms.iter().map(Histogram::max_count).max().unwrap_or(0);
        let y_ticks = count_ticks(max_count.max(1), 6);
        let y_max = max_count.max(1) as f64 * 1.05;

        // Bars
        for (series, hist) in self.series.iter().zip(&histograms) {
            let edges = hist.edges();
            for (bin, &count) in hist.counts().iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let x0 = area.x(edges[bin], lo, hi);
                let x1 = area.x(edges[bin + 1], lo, hi);
                let y_top = area.y(count as f64, y_max);
                let bar_width = (x1 - x0).max(1) as u32;
                let bar_height = (area.bottom() - y_top).max(1) as u32;
                canvas.blend_rect(x0, y_top, bar_width, bar_height, series.color, series.alpha);
            }
        }

        // Axes and ticks
        canvas.stroke_rect(area.left, area.top, area.width, area.height, colors::BLACK);
        let tick_text = text_height(TICK_SCALE) as i64;

        for tick in nice_ticks(lo, hi, 7) {
            let x = area.x(tick, lo, hi);
            canvas.vertical_line(x, area.bottom(), area.bottom() + 5, colors::BLACK);
            let label = tick_label(tick, lo, hi);
            canvas.draw_text_centered(x, area.bottom() + 9, &label, TICK_SCALE, colors::BLACK);
        }
        for tick in y_ticks {
            let y = area.y(tick as f64, y_max);
            canvas.horizontal_line(y, area.left - 5, area.left, colors::BLACK);
            let label = tick.to_string();
            let label_x = area.left - 9 - text_width(&label, TICK_SCALE) as i64;
            canvas.draw_text(label_x, y - tick_text / 2, &label, TICK_SCALE, colors::BLACK);
        }

        // Titles and labels
        let center_x = area.left + area.width as i64 / 2;
        for (i, line) in self.title.iter().enumerate() {
            let y = 12 + (i as u32 * title_line) as i64;
            canvas.draw_text_centered(center_x, y, line, TITLE_SCALE, colors::BLACK);
        }
        if !self.x_label.is_empty() {
            let y = area.bottom() + 9 + tick_text + 14;
            canvas.draw_text_centered(center_x, y, &self.x_label, LABEL_SCALE, colors::BLACK);
        }
        if !self.y_label.is_empty() {
            let center_y = area.top + area.height as i64 / 2;
            canvas.draw_text_vertical(24, center_y, &self.y_label, LABEL_SCALE, colors::BLACK);
        }

        self.draw_legend(&mut canvas, &area);
        canvas.into_image()
    }

    fn draw_legend(&self, canvas: &mut Canvas, area: &PlotArea) {
        let entries: Vec<(&Series, &str)> = self
            .series
            .iter()
            .filter_map(|s| s.label.as_deref().map(|label| (s, label)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let row = text_height(LEGEND_SCALE) as i64 + 10;
        let swatch = 28_i64;
        let text_w = entries
            .iter()
            .map(|(_, label)| text_width(label, LEGEND_SCALE))
            .max()
            .unwrap_or(0) as i64;
        let box_w = 10 + swatch + 8 + text_w + 10;
        let box_h = 8 + row * entries.len() as i64;
        let box_x = area.left + area.width as i64 - box_w - 10;
        let box_y = area.top + 10;

        canvas.fill_rect(box_x, box_y, box_w as u32, box_h as u32, colors::WHITE);
        canvas.stroke_rect(box_x, box_y, box_w as u32, box_h as u32, colors::LIGHT_GRAY);

        for (i, (series, label)) in entries.iter().enumerate() {
            let y = box_y + 8 + row * i as i64;
            let fill = blend(colors::WHITE, series.color, series.alpha);
            canvas.fill_rect(box_x + 10, y, swatch as u32, text_height(LEGEND_SCALE), fill);
            canvas.draw_text(box_x + 10 + swatch + 8, y, label, LEGEND_SCALE, colors::BLACK);
        }
    }

    /// Render and save as PNG
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.render().save(path)?;
        debug!("Saved histogram to {}", path.display());
        Ok(())
    }
}

/// Pixel geometry of the plotting area
struct PlotArea {
    left: i64,
    top: i64,
    width: u32,
    height: u32,
}

impl PlotArea {
    fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    fn x(&self, value: f64, lo: f64, hi: f64) -> i64 {
        let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
        self.left + (t.clamp(0.0, 1.0) * self.width as f64).round() as i64
    }

    fn y(&self, value: f64, max: f64) -> i64 {
        let t = if max > 0.0 { value / max } else { 0.0 };
        self.bottom() - (t.clamp(0.0, 1.0) * self.height as f64).round() as i64
    }
}

/// Round tick positions covering `[lo, hi]` with roughly `target` ticks
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo || target == 0 {
        return vec![lo];
    }
    let step = nice_step((hi - lo) / target as f64);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Integer tick positions from zero up to `max`
pub fn count_ticks(max: usize, target: usize) -> Vec<usize> {
    let raw = max as f64 / target.max(1) as f64;
    let step = if raw > 0.0 { nice_step(raw).ceil() as usize } else { 1 };
    let step = step.max(1);
    (0..=max / step).map(|k| k * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick label with just enough decimals for the tick spacing
fn tick_label(value: f64, lo: f64, hi: f64) -> String {
    let span = (hi - lo).abs();
    let decimals = if span > 0.0 {
        (1.0 - span.log10().floor()).clamp(0.0, 8.0) as usize
    } else {
        2
    };
    let value = if value.abs() < 1e-12 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}
