//! Descriptive statistics over series with missing values

use statrs::statistics::Statistics;

/// Drop missing and NaN entries
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .collect()
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.mean())
}

/// Mean of the present values of a series
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    mean(&present(values))
}

/// Sample variance (n - 1 denominator), `None` below two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.variance())
}

/// Sample standard deviation, `None` below two values
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is in percent (0..=100). Matches the default method of NumPy.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(percentile_sorted(&sorted, q))
}

/// Several percentiles of the same data, sorting once
pub fn percentiles(values: &[f64], qs: &[f64]) -> Option<Vec<f64>> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(qs.iter().map(|&q| percentile_sorted(&sorted, q)).collect())
}

fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 100.0) / 100.0;
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_skips_missing() {
        let values = vec![Some(1.0), None, Some(f64::NAN), Some(3.0)];
        assert_eq!(present(&values), vec![1.0, 3.0]);
        assert_relative_eq!(mean_present(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_none());
        assert!(mean_present(&[None, None]).is_none());
    }

    #[test]
    fn test_sample_variance() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(sample_variance(&values).unwrap(), 2.5);
        assert_relative_eq!(sample_std(&values).unwrap(), 2.5_f64.sqrt());
        assert!(sample_variance(&[1.0]).is_none());
    }

    #[test]
    fn test_percentile_linear() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 2.5);
        assert_relative_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&values, 100.0).unwrap(), 4.0);

        // np.percentile(range(1, 101), [1, 99]) == [1.99, 99.01]
        let hundred: Vec<f64> = (1..=100).map(f64::from).collect();
        let clipped = percentiles(&hundred, &[1.0, 99.0]).unwrap();
        assert_relative_eq!(clipped[0], 1.99, epsilon = 1e-12);
        assert_relative_eq!(clipped[1], 99.01, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let values = [5.0, 1.0, 4.0, 2.0, 3.0];
        assert_relative_eq!(percentile(&values, 25.0).unwrap(), 2.0);
        assert!(percentile(&[], 50.0).is_none());
    }
}
