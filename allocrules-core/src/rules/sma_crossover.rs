//! Simple moving average crossover.
//!
//! Long (1.0) while the fast SMA of `price` is above the slow SMA, flat (0.0)
//! otherwise. Rows where either average is still warming up are flat.

use polars::prelude::DataFrame;

use super::RuleError;
use crate::columns::ColumnName;
use crate::indicators::{Indicator, Sma};
use crate::params::{param_usize, Params};
use crate::table::{read_f64, write_f64};

/// Parameters: `fast` and `slow` window lengths (default 0).
///
/// A window of 0 is clamped to 1, so the average degenerates to the price itself.
pub fn sma_crossover_strategy(table: &mut DataFrame, params: &Params) -> Result<(), RuleError> {
    let fast = param_usize(params, "fast", 0).max(1);
    let slow = param_usize(params, "slow", 0).max(1);

    let price = read_f64(table, ColumnName::Price.as_str())?;
    let fast_sma = Sma::new(fast).compute(&price);
    let slow_sma = Sma::new(slow).compute(&price);

    // NaN comparisons are false, so warmup rows fall through to 0.0.
    let allocation = fast_sma
        .iter()
        .zip(&slow_sma)
        .map(|(f, s)| if f > s { 1.0 } else { 0.0 })
        .collect();
    write_f64(table, ColumnName::Allocation.as_str(), allocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params;
    use crate::table::allocation;
    use polars::prelude::*;

    #[test]
    fn crossover_fast_2_slow_3() {
        let mut df = df!("price" => &[1.0, 2.0, 3.0, 2.0, 1.0, 1.0, 4.0]).unwrap();
        sma_crossover_strategy(&mut df, &params(&[("fast", 2.0), ("slow", 3.0)])).unwrap();
        // fast: NaN, 1.5, 2.5, 2.5, 1.5, 1.0, 2.5
        // slow: NaN, NaN, 2.0, 2.33, 2.0, 1.33, 2.0
        assert_eq!(
            allocation(&df).unwrap(),
            vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn zero_windows_clamp_to_single_observation() {
        let mut df = df!("price" => &[3.0, 1.0, 2.0]).unwrap();
        sma_crossover_strategy(&mut df, &Params::new()).unwrap();
        // Both averages equal the price: never strictly above.
        assert_eq!(allocation(&df).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn fast_window_longer_than_series_is_flat() {
        let mut df = df!("price" => &[1.0, 2.0, 3.0]).unwrap();
        sma_crossover_strategy(&mut df, &params(&[("fast", 5.0), ("slow", 1.0)])).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn writes_allocation_column() {
        let mut df = df!("price" => &[1.0, 2.0, 3.0, 4.0]).unwrap();
        sma_crossover_strategy(&mut df, &params(&[("fast", 1.0), ("slow", 2.0)])).unwrap();
        assert!(df.column("allocation").is_ok());
        assert!(df.column("position").is_err());
        assert_eq!(allocation(&df).unwrap(), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_price_fails() {
        let mut df = df!("close" => &[1.0]).unwrap();
        let err = sma_crossover_strategy(&mut df, &Params::new()).unwrap_err();
        assert!(matches!(err, RuleError::MissingColumn(ref c) if c == "price"));
    }
}
