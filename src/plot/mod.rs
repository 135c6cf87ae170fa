//! Plot module
//!
//! Histogram rendering straight onto an `RgbImage`:
//! - `histogram`: fixed-range binning
//! - `chart`: layout of bars, axes, titles and legend
//! - `canvas`: blended rectangles, lines and text
//! - `font`: built-in 5x7 bitmap glyphs

mod canvas;
mod chart;
mod font;
mod histogram;

pub use canvas::{blend, colors, Canvas};
pub use chart::{count_ticks, nice_ticks, HistogramChart, Series};
pub use font::{glyph, text_height, text_width};
pub use histogram::Histogram;
