//! Rolling volatility per ticker

use super::statistics::sample_std;
use crate::data::PriceTable;

/// Default trailing window, in rows
pub const DEFAULT_WINDOW: usize = 5;

/// Trailing sample standard deviation over `window` rows.
///
/// A value is produced only when every entry of the window is present and
/// finite; otherwise, and for the first `window - 1` rows, the result is
/// missing.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|end| {
            if end + 1 < window {
                return None;
            }
            let slice = &values[end + 1 - window..=end];
            let full: Option<Vec<f64>> = slice
                .iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect();
            full.and_then(|w| sample_std(&w))
        })
        .collect()
}

/// Rolling volatility of every row's return, within its ticker in date order
pub fn derive_volatility(
    table: &PriceTable,
    returns: &[Option<f64>],
    window: usize,
) -> Vec<Option<f64>> {
    let mut volatility = vec![None; table.len()];

    for group in table.ticker_groups() {
        let series: Vec<Option<f64>> = group.iter().map(|&row| returns[row]).collect();
        for (&row, value) in group.iter().zip(rolling_std(&series, window)) {
            volatility[row] = value;
        }
    }

    volatility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive_returns;
    use crate::data::TradeDate;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_std_full_windows_only() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0, 7.0]
            .iter()
            .map(|&v| Some(v))
            .collect();
        let vol = rolling_std(&values, 5);

        assert!(vol[..4].iter().all(Option::is_none));
        assert_relative_eq!(vol[4].unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        // [2, 3, 4, 5, 7]: mean 4.2, sum sq dev 14.8
        assert_relative_eq!(vol[5].unwrap(), (14.8_f64 / 4.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_std_missing_breaks_window() {
        let values = vec![
            None,
            Some(0.01),
            Some(0.02),
            Some(-0.01),
            Some(0.0),
            Some(0.03),
        ];
        let vol = rolling_std(&values, 5);
        assert!(vol[4].is_none());
        assert!(vol[5].is_some());
    }

    #[test]
    fn test_rolling_std_short_series() {
        let values = vec![Some(0.1), Some(0.2)];
        assert_eq!(rolling_std(&values, 5), vec![None, None]);
        assert_eq!(rolling_std(&values, 0), vec![None, None]);
    }

    #[test]
    fn test_derive_volatility_first_value_on_sixth_row() {
        let closes = [100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 104.0];
        let rows = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                (
                    TradeDate::from_ymd(2024, 2, i as u32 + 1).unwrap(),
                    "SPY".to_string(),
                    Some(c),
                )
            })
            .collect();
        let table = PriceTable::from_rows(rows);

        let returns = derive_returns(&table);
        let vol = derive_volatility(&table, &returns, DEFAULT_WINDOW);

        assert!(vol[..5].iter().all(Option::is_none));
        assert!(vol[5].is_some());
        assert!(vol[6].is_some());

        let window: Vec<f64> = returns[1..6].iter().map(|r| r.unwrap()).collect();
        assert_relative_eq!(vol[5].unwrap(), sample_std(&window).unwrap(), epsilon = 1e-12);
    }
}
