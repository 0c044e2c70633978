//! Canonical column names shared by rules, signals, and pipeline stages.
//!
//! Every stage reads and writes columns by these names, so a table produced by
//! one stage can be fed straight into the next.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known column names in an allocation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnName {
    /// Mid price of the traded market.
    Price,
    /// Fraction of the portfolio invested in the market.
    Allocation,
    /// Raw technical signal value.
    Signal,
    /// Predicted next-period relative price change.
    ForecastPriceChange,
    High,
    Low,
}

impl ColumnName {
    pub const ALL: [ColumnName; 6] = [
        ColumnName::Price,
        ColumnName::Allocation,
        ColumnName::Signal,
        ColumnName::ForecastPriceChange,
        ColumnName::High,
        ColumnName::Low,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnName::Price => "price",
            ColumnName::Allocation => "allocation",
            ColumnName::Signal => "signal",
            ColumnName::ForecastPriceChange => "forecast_price_change",
            ColumnName::High => "high",
            ColumnName::Low => "low",
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ColumnName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
