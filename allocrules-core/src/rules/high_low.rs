//! High/low spread allocation.

use polars::prelude::DataFrame;

use super::RuleError;
use crate::columns::ColumnName;
use crate::params::{param, Params};
use crate::table::{read_f64, write_f64};

/// allocation = (high - low) * scale + constant, row by row.
///
/// Parameters: `scale` (default 1.0), `constant` (default 0.0).
/// Requires the `high` and `low` columns.
pub fn high_low_difference(table: &mut DataFrame, params: &Params) -> Result<(), RuleError> {
    let scale = param(params, "scale", 1.0);
    let constant = param(params, "constant", 0.0);

    let high = read_f64(table, ColumnName::High.as_str())?;
    let low = read_f64(table, ColumnName::Low.as_str())?;

    let allocation = high
        .iter()
        .zip(&low)
        .map(|(h, l)| (h - l) * scale + constant)
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
    fn scaled_spread_plus_constant() {
        let mut df = df!("high" => &[2.0, 4.0], "low" => &[1.0, 1.0]).unwrap();
        high_low_difference(&mut df, &params(&[("scale", 2.0), ("constant", 1.0)])).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![3.0, 7.0]);
    }

    #[test]
    fn defaults_are_raw_spread() {
        let mut df = df!("high" => &[10.0, 12.5], "low" => &[9.0, 10.0]).unwrap();
        high_low_difference(&mut df, &Params::new()).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![1.0, 2.5]);
    }

    #[test]
    fn missing_low_column_fails() {
        let mut df = df!("high" => &[2.0, 4.0]).unwrap();
        let err = high_low_difference(&mut df, &Params::new()).unwrap_err();
        assert!(matches!(err, RuleError::MissingColumn(ref c) if c == "low"));
        assert!(df.column("allocation").is_err());
    }
}
