//! Daily returns per ticker

use crate::data::PriceTable;

/// Percentage change of an ordered price series.
///
/// Missing prices are padded with the last seen price before the change is
/// taken. The first element, and anything before the first known price, has
/// no return.
pub fn pct_change(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(prices.len());
    let mut previous: Option<f64> = None;
    let mut last_seen: Option<f64> = None;

    for price in prices {
        let current = price.or(last_seen);
        let change = match (previous, current) {
            (Some(prev), Some(curr)) => Some(curr / prev - 1.0).filter(|r| !r.is_nan()),
            _ => None,
        };
        returns.push(change);
        previous = current;
        last_seen = current;
    }

    returns
}

/// Daily return of every row, computed within its ticker in date order
pub fn derive_returns(table: &PriceTable) -> Vec<Option<f64>> {
    let closes = table.closes();
    let mut returns = vec![None; table.len()];

    for group in table.ticker_groups() {
        let series: Vec<Option<f64>> = group.iter().map(|&row| closes[row]).collect();
        for (&row, value) in group.iter().zip(pct_change(&series)) {
            returns[row] = value;
        }
    }

    returns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TradeDate;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_change_basic() {
        let returns = pct_change(&[Some(100.0), Some(110.0), Some(99.0)]);
        assert!(returns[0].is_none());
        assert_relative_eq!(returns[1].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns[2].unwrap(), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change_pads_missing() {
        let returns = pct_change(&[Some(100.0), None, Some(120.0)]);
        assert!(returns[0].is_none());
        assert_relative_eq!(returns[1].unwrap(), 0.0);
        assert_relative_eq!(returns[2].unwrap(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change_leading_missing() {
        let returns = pct_change(&[None, None, Some(50.0), Some(55.0)]);
        assert_eq!(&returns[..3], &[None, None, None]);
        assert_relative_eq!(returns[3].unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change_zero_over_zero_is_missing() {
        let returns = pct_change(&[Some(0.0), Some(0.0), Some(1.0)]);
        assert!(returns[1].is_none());
        assert_eq!(returns[2], Some(f64::INFINITY));
    }

    #[test]
    fn test_derive_returns_per_ticker_in_date_order() {
        let day = |d| TradeDate::from_ymd(2024, 1, d).unwrap();
        let table = PriceTable::from_rows(vec![
            (day(3), "AAPL".to_string(), Some(11.0)),
            (day(2), "MSFT".to_string(), Some(200.0)),
            (day(2), "AAPL".to_string(), Some(10.0)),
            (day(3), "MSFT".to_string(), Some(190.0)),
        ]);

        let returns = derive_returns(&table);
        assert_relative_eq!(returns[0].unwrap(), 0.1, epsilon = 1e-12);
        assert!(returns[1].is_none());
        assert!(returns[2].is_none());
        assert_relative_eq!(returns[3].unwrap(), -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_rows_without_ticker_get_no_return() {
        let day = |d| TradeDate::from_ymd(2024, 1, d).unwrap();
        let table = PriceTable::from_rows(vec![
            (day(2), String::new(), Some(10.0)),
            (day(3), String::new(), Some(11.0)),
            (day(2), "AAPL".to_string(), Some(20.0)),
            (day(3), "AAPL".to_string(), Some(22.0)),
        ]);

        let returns = derive_returns(&table);
        assert_eq!(returns[0], None);
        assert_eq!(returns[1], None);
        assert!(returns[2].is_none());
        assert_relative_eq!(returns[3].unwrap(), 0.1, epsilon = 1e-12);
    }
}
