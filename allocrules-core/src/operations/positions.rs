//! Position sizing from a price-change forecast.
//!
//! allocation = forecast_price_change * kelly_fraction / volatility^2.
//! Rows without a forecast hold no position.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::columns::ColumnName;
use crate::rules::RuleError;
use crate::table::{read_f64, write_f64};
use crate::transform::TableTransform;

/// Kelly-style sizing with a fixed volatility assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionsFromPricePrediction {
    pub volatility: f64,
    pub kelly_fraction: f64,
}

impl Default for PositionsFromPricePrediction {
    fn default() -> Self {
        Self {
            volatility: 0.1,
            kelly_fraction: 1.0,
        }
    }
}

impl PositionsFromPricePrediction {
    pub fn new(volatility: f64, kelly_fraction: f64) -> Self {
        Self {
            volatility,
            kelly_fraction,
        }
    }

    pub fn size(&self, forecast: f64) -> f64 {
        if forecast.is_finite() {
            forecast * self.kelly_fraction / (self.volatility * self.volatility)
        } else {
            0.0
        }
    }
}

impl TableTransform for PositionsFromPricePrediction {
    fn name(&self) -> &str {
        "positions_from_price_prediction"
    }

    fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError> {
        let forecast = read_f64(table, ColumnName::ForecastPriceChange.as_str())?;
        let allocation = forecast.iter().map(|f| self.size(*f)).collect();
        write_f64(table, ColumnName::Allocation.as_str(), allocation)
    }
}
