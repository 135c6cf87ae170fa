//! Welch's two-sample t-test

use super::statistics::{mean, sample_variance};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

/// Result of a two-sided Welch t-test
#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    /// t statistic (first sample minus second)
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
    /// Sample sizes
    pub n_a: usize,
    pub n_b: usize,
}

impl TTestResult {
    fn undefined(n_a: usize, n_b: usize) -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: f64::NAN,
            n_a,
            n_b,
        }
    }

    /// Whether the test rejects equal means at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// True when either sample was too small or degenerate
    pub fn is_undefined(&self) -> bool {
        self.statistic.is_nan()
    }
}

impl fmt::Display for TTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.4}, p={:.4}, df={:.1} (n={} vs {})",
            self.statistic, self.p_value, self.df, self.n_a, self.n_b
        )
    }
}

/// Two-sample t-test without assuming equal variances.
///
/// Samples with fewer than two observations, or two constant samples with
/// the same mean, give an undefined (NaN) result. Two constant samples with
/// different means give an infinite statistic and a p-value of zero.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> TTestResult {
    let (n_a, n_b) = (a.len(), b.len());

    let (Some(mean_a), Some(mean_b)) = (mean(a), mean(b)) else {
        return TTestResult::undefined(n_a, n_b);
    };
    let (Some(var_a), Some(var_b)) = (sample_variance(a), sample_variance(b)) else {
        return TTestResult::undefined(n_a, n_b);
    };

    let se_a = var_a / n_a as f64;
    let se_b = var_b / n_b as f64;
    let se2 = se_a + se_b;
    if se2.is_nan() {
        return TTestResult::undefined(n_a, n_b);
    }
    if se2 <= 0.0 {
        // Two constant samples: separated means are infinitely far apart
        if mean_a == mean_b {
            return TTestResult::undefined(n_a, n_b);
        }
        let statistic = if mean_a > mean_b { f64::INFINITY } else { f64::NEG_INFINITY };
        return TTestResult {
            statistic,
            p_value: 0.0,
            df: 1.0,
            n_a,
            n_b,
        };
    }

    let statistic = (mean_a - mean_b) / se2.sqrt();
    let df = se2.powi(2) / (se_a.powi(2) / (n_a - 1) as f64 + se_b.powi(2) / (n_b - 1) as f64);

    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(statistic.abs())).min(1.0),
        Err(_) => f64::NAN,
    };

    TTestResult {
        statistic,
        p_value,
        df,
        n_a,
        n_b,
    }
}
