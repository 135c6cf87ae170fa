//! Fixed-range histogram binning

/// Bin counts over `bins` equal-width intervals of `[lo, hi]`
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lo: f64,
    hi: f64,
    counts: Vec<usize>,
}

impl Histogram {
    /// Count values into equal-width bins.
    ///
    /// Bins are half-open except the last, which includes `hi`. Values outside
    /// the range and non-finite values are ignored. A zero-width range is
    /// widened by 0.5 on each side.
    pub fn compute(values: &[f64], bins: usize, range: (f64, f64)) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = if range.0 <= range.1 {
            range
        } else {
            (range.1, range.0)
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = linspace(lo, hi, bins);
        let norm = bins as f64 / (hi - lo);
        let mut counts = vec![0usize; bins];
        for &value in values {
            if !value.is_finite() || value < lo || value > hi {
                continue;
            }
            let mut index = (((value - lo) * norm) as usize).min(bins - 1);
            // Rounding in the scaled position can miss the edge by one bin
            if value < edges[index] {
                index -= 1;
            } else if index + 1 < bins && value >= edges[index + 1] {
                index += 1;
            }
            counts[index] += 1;
        }

        Self { lo, hi, counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// `bins + 1` evenly spaced bin edges
    pub fn edges(&self) -> Vec<f64> {
        linspace(self.lo, self.hi, self.counts.len())
    }

    /// Tallest bin
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of values that fell inside the range
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// `bins + 1` points from `lo` to `hi`, the last one exact
fn linspace(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let step = (hi - lo) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { hi } else { i as f64 * step + lo })
        .collect()
}
