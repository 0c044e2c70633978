//! Regression of next-period price changes on a signal.
//!
//! Target: r[t] = price[t+1] / price[t] - 1, the relative change from row t to
//! row t+1. Feature: signal[t]. Fit is ordinary least squares over rows where
//! both are finite, so the warmup rows of the signal and the last row (which
//! has no next price) are excluded.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::columns::ColumnName;
use crate::rules::RuleError;
use crate::table::{read_f64, write_f64};
use crate::transform::TableTransform;

/// Minimum number of usable (signal, next change) pairs for a fit.
pub const MIN_OBSERVATIONS: usize = 2;

/// Fitted line: forecast = intercept + slope * signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    pub observations: usize,
}

impl LinearFit {
    /// OLS fit of `y` on `x`, skipping pairs with a non-finite member.
    ///
    /// A feature with zero variance gets slope 0 and intercept mean(y).
    pub fn ordinary_least_squares(x: &[f64], y: &[f64]) -> Result<Self, RuleError> {
        let pairs: Vec<(f64, f64)> = x
            .iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .collect();

        let n = pairs.len();
        if n < MIN_OBSERVATIONS {
            return Err(RuleError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                available: n,
            });
        }

        let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
        let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;
        let sxx: f64 = pairs.iter().map(|(a, _)| (a - mean_x) * (a - mean_x)).sum();
        let sxy: f64 = pairs.iter().map(|(a, b)| (a - mean_x) * (b - mean_y)).sum();

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        Ok(Self {
            intercept: mean_y - slope * mean_x,
            slope,
            observations: n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Next-period relative price changes; the last row (and any row with a zero
/// or missing price) is NaN.
pub fn next_period_changes(price: &[f64]) -> Vec<f64> {
    let mut changes = vec![f64::NAN; price.len()];
    for i in 0..price.len().saturating_sub(1) {
        if price[i] != 0.0 {
            changes[i] = price[i + 1] / price[i] - 1.0;
        }
    }
    changes
}

/// Predicts the next-period price change from the `signal` column.
#[derive(Debug, Clone)]
pub struct PricePredictionFromSignalRegression {
    market_to_trade: String,
    fitted: Option<LinearFit>,
}

impl PricePredictionFromSignalRegression {
    pub fn new() -> Self {
        Self::for_market(ColumnName::Price.as_str())
    }

    /// Regress against the price column named `market_to_trade`.
    pub fn for_market(market_to_trade: impl Into<String>) -> Self {
        Self {
            market_to_trade: market_to_trade.into(),
            fitted: None,
        }
    }

    pub fn market_to_trade(&self) -> &str {
        &self.market_to_trade
    }

    pub fn fitted(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }
}

impl Default for PricePredictionFromSignalRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl TableTransform for PricePredictionFromSignalRegression {
    fn name(&self) -> &str {
        "price_prediction_from_signal_regression"
    }

    fn fit(&mut self, table: &DataFrame) -> Result<(), RuleError> {
        let signal = read_f64(table, ColumnName::Signal.as_str())?;
        let price = read_f64(table, &self.market_to_trade)?;
        let fit = LinearFit::ordinary_least_squares(&signal, &next_period_changes(&price))?;
        tracing::debug!(
            intercept = fit.intercept,
            slope = fit.slope,
            observations = fit.observations,
            "fitted signal regression"
        );
        self.fitted = Some(fit);
        Ok(())
    }

    fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError> {
        let fit = self
            .fitted
            .ok_or_else(|| RuleError::NotFitted(self.name().to_string()))?;
        let signal = read_f64(table, ColumnName::Signal.as_str())?;
        let forecast = signal
            .iter()
            .map(|s| if s.is_finite() { fit.predict(*s) } else { f64::NAN })
            .collect();
        write_f64(table, ColumnName::ForecastPriceChange.as_str(), forecast)
    }
}
