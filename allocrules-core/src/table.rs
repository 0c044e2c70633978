//! Table access helpers over polars `DataFrame`.
//!
//! Rules and pipeline stages work on plain `Vec<f64>` series: columns are read
//! out as `f64` (nulls become NaN) and written back whole, replacing any
//! existing column of the same name.

use polars::prelude::*;

use crate::columns::ColumnName;
use crate::rules::RuleError;

/// Fail with `MissingColumn` for the first name not present in `table`.
pub fn require_columns<S: AsRef<str>>(table: &DataFrame, columns: &[S]) -> Result<(), RuleError> {
    for name in columns {
        let name = name.as_ref();
        if table.column(name).is_err() {
            return Err(RuleError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Read a numeric column as `f64` values. Integer columns are cast; nulls become NaN.
pub fn read_f64(table: &DataFrame, name: &str) -> Result<Vec<f64>, RuleError> {
    let column = table
        .column(name)
        .map_err(|_| RuleError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Add or overwrite column `name` with `values`.
pub fn write_f64(table: &mut DataFrame, name: &str, values: Vec<f64>) -> Result<(), RuleError> {
    table.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Add or overwrite column `name` with `value` repeated for every row.
pub fn fill_constant(table: &mut DataFrame, name: &str, value: f64) -> Result<(), RuleError> {
    let height = table.height();
    write_f64(table, name, vec![value; height])
}

/// Copy of `table` where column `to` holds the values of column `from`.
pub fn alias_column(table: &DataFrame, from: &str, to: &str) -> Result<DataFrame, RuleError> {
    let values = read_f64(table, from)?;
    let mut view = table.clone();
    write_f64(&mut view, to, values)?;
    Ok(view)
}

/// Read the allocation column.
pub fn allocation(table: &DataFrame) -> Result<Vec<f64>, RuleError> {
    read_f64(table, ColumnName::Allocation.as_str())
}
