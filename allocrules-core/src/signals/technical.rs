//! Built-in technical signals, registered under technical-analysis style ids.
//!
//! | id               | rule name          | parameters            | series            |
//! |------------------|--------------------|-----------------------|-------------------|
//! | SMAIndicator     | sma_indicator      | window=12             | price             |
//! | EMAIndicator     | ema_indicator      | window=12             | price             |
//! | RSIIndicator     | rsi                | window=14             | price             |
//! | ROCIndicator     | roc                | window=12             | price             |
//! | AverageTrueRange | average_true_range | window=14             | high, low, price  |
//! | BollingerBands   | bollinger_pband    | window=20, window_dev=2 | price           |

use std::sync::Arc;

use polars::prelude::DataFrame;

use super::{SignalCatalog, SignalEntry, SignalFunction};
use crate::columns::ColumnName;
use crate::indicators::{Atr, BollingerPercentB, Ema, Indicator, Roc, Rsi, Sma};
use crate::params::{param, param_usize, params, Params};
use crate::rules::RuleError;
use crate::table::read_f64;

/// Which single-series indicator a `PriceIndicatorSignal` runs over `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceIndicator {
    Sma,
    Ema,
    Rsi,
    Roc,
    BollingerPercentB,
}

impl PriceIndicator {
    fn default_window(self) -> usize {
        match self {
            PriceIndicator::Sma | PriceIndicator::Ema | PriceIndicator::Roc => 12,
            PriceIndicator::Rsi => 14,
            PriceIndicator::BollingerPercentB => 20,
        }
    }
}

/// Signal over the `price` column; `window` is clamped to at least 1.
#[derive(Debug, Clone, Copy)]
pub struct PriceIndicatorSignal {
    kind: PriceIndicator,
}

impl PriceIndicatorSignal {
    pub fn new(kind: PriceIndicator) -> Self {
        Self { kind }
    }
}

impl SignalFunction for PriceIndicatorSignal {
    fn compute(&self, table: &DataFrame, params: &Params) -> Result<Vec<f64>, RuleError> {
        let price = read_f64(table, ColumnName::Price.as_str())?;
        let window = param_usize(params, "window", self.kind.default_window()).max(1);
        let indicator: Box<dyn Indicator> = match self.kind {
            PriceIndicator::Sma => Box::new(Sma::new(window)),
            PriceIndicator::Ema => Box::new(Ema::new(window)),
            PriceIndicator::Rsi => Box::new(Rsi::new(window)),
            PriceIndicator::Roc => Box::new(Roc::new(window)),
            PriceIndicator::BollingerPercentB => {
                Box::new(BollingerPercentB::new(window, param(params, "window_dev", 2.0)))
            }
        };
        Ok(indicator.compute(&price))
    }
}

/// ATR over `high`, `low`, and `price` (as close).
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageTrueRangeSignal;

impl SignalFunction for AverageTrueRangeSignal {
    fn compute(&self, table: &DataFrame, params: &Params) -> Result<Vec<f64>, RuleError> {
        let high = read_f64(table, ColumnName::High.as_str())?;
        let low = read_f64(table, ColumnName::Low.as_str())?;
        let close = read_f64(table, ColumnName::Price.as_str())?;
        let window = param_usize(params, "window", 14).max(1);
        Ok(Atr::new(window).compute(&high, &low, &close))
    }
}

impl SignalCatalog {
    /// Catalog of the built-in technical signals.
    pub fn technical() -> Self {
        let mut catalog = SignalCatalog::new();
        let price_signals = [
            ("SMAIndicator", "sma_indicator", PriceIndicator::Sma),
            ("EMAIndicator", "ema_indicator", PriceIndicator::Ema),
            ("RSIIndicator", "rsi", PriceIndicator::Rsi),
            ("ROCIndicator", "roc", PriceIndicator::Roc),
        ];
        for (id, function_names, kind) in price_signals {
            catalog.register(
                id,
                SignalEntry::new(
                    Arc::new(PriceIndicatorSignal::new(kind)),
                    function_names,
                    params(&[("window", kind.default_window() as f64)]),
                    &["price"],
                ),
            );
        }
        catalog.register(
            "AverageTrueRange",
            SignalEntry::new(
                Arc::new(AverageTrueRangeSignal),
                "average_true_range",
                params(&[("window", 14.0)]),
                &["high", "low", "price"],
            ),
        );
        catalog.register(
            "BollingerBands",
            SignalEntry::new(
                Arc::new(PriceIndicatorSignal::new(PriceIndicator::BollingerPercentB)),
                "bollinger_pband",
                params(&[("window", 20.0), ("window_dev", 2.0)]),
                &["price"],
            ),
        );
        catalog
    }
}
