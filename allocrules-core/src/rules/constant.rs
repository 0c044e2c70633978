//! Constant allocations.

use polars::prelude::DataFrame;

use super::RuleError;
use crate::columns::ColumnName;
use crate::params::{param, Params};
use crate::table::fill_constant;

/// Allocates 50% of the strategy budget to the asset and 50% to cash.
pub fn fifty_fifty(table: &mut DataFrame, _params: &Params) -> Result<(), RuleError> {
    fill_constant(table, ColumnName::Allocation.as_str(), 0.5)
}

/// Allocates 100% of the strategy budget to the asset for the whole period.
pub fn buy_and_hold(table: &mut DataFrame, _params: &Params) -> Result<(), RuleError> {
    fill_constant(table, ColumnName::Allocation.as_str(), 1.0)
}

/// Constant allocation of `fixed_allocation_size` (default 1.0).
pub fn constant_allocation_size(table: &mut DataFrame, params: &Params) -> Result<(), RuleError> {
    let size = param(params, "fixed_allocation_size", 1.0);
    fill_constant(table, ColumnName::Allocation.as_str(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params;
    use crate::table::allocation;
    use polars::prelude::*;

    fn prices() -> DataFrame {
        df!("price" => &[100.0, 101.0, 99.5, 102.0]).unwrap()
    }

    #[test]
    fn fifty_fifty_sets_half() {
        let mut df = prices();
        fifty_fifty(&mut df, &Params::new()).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![0.5; 4]);
    }

    #[test]
    fn buy_and_hold_sets_one() {
        let mut df = prices();
        buy_and_hold(&mut df, &Params::new()).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn constant_size_defaults_to_one() {
        let mut df = prices();
        constant_allocation_size(&mut df, &Params::new()).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn constant_size_uses_parameter() {
        let mut df = prices();
        constant_allocation_size(&mut df, &params(&[("fixed_allocation_size", -0.3)])).unwrap();
        assert_eq!(allocation(&df).unwrap(), vec![-0.3; 4]);
    }

    #[test]
    fn overwrites_existing_allocation_and_keeps_other_columns() {
        let mut df = df!("price" => &[1.0, 2.0], "allocation" => &[0.9, 0.1]).unwrap();
        fifty_fifty(&mut df, &Params::new()).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(allocation(&df).unwrap(), vec![0.5, 0.5]);
        let price = df.column("price").unwrap().f64().unwrap();
        assert_eq!(price.get(1), Some(2.0));
    }
}
