//! Adapts a catalog signal into a table transform.

use std::fmt;
use std::sync::Arc;

use polars::prelude::DataFrame;

use super::SignalFunction;
use crate::columns::ColumnName;
use crate::params::Params;
use crate::rules::RuleError;
use crate::table::{alias_column, write_f64};
use crate::transform::TableTransform;

/// Stateless stage computing a signal into the `signal` column.
///
/// Signals read prices from `price`; with a different `price_column` the
/// signal sees that column under the `price` name.
#[derive(Clone)]
pub struct SignalTransformer {
    class: Arc<dyn SignalFunction>,
    signal_name: String,
    params: Params,
    price_column: String,
}

impl SignalTransformer {
    pub fn with_price_column(mut self, price_column: impl Into<String>) -> Self {
        self.price_column = price_column.into();
        self
    }
}

impl fmt::Debug for SignalTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalTransformer")
            .field("signal_name", &self.signal_name)
            .field("params", &self.params)
            .field("price_column", &self.price_column)
            .finish_non_exhaustive()
    }
}

impl TableTransform for SignalTransformer {
    fn name(&self) -> &str {
        &self.signal_name
    }

    fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError> {
        let price = ColumnName::Price.as_str();
        let values = if self.price_column == price {
            self.class.compute(table, &self.params)?
        } else {
            let view = alias_column(table, &self.price_column, price)?;
            self.class.compute(&view, &self.params)?
        };
        write_f64(table, ColumnName::Signal.as_str(), values)
    }
}

/// Wrap `class` as a stage tagged with `signal_name`, computing with `params`.
pub fn ta_adaptor(
    class: Arc<dyn SignalFunction>,
    signal_name: impl Into<String>,
    params: Params,
) -> SignalTransformer {
    SignalTransformer {
        class,
        signal_name: signal_name.into(),
        params,
        price_column: ColumnName::Price.as_str().to_string(),
    }
}
