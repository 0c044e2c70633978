//! Indicator math over plain `f64` series.
//!
//! Single-series indicators implement `Indicator`; ATR needs high/low/close and
//! exposes its own `compute`. Every output has the input's length, with the first
//! `lookback()` positions set to `f64::NAN` (warmup). NaN inputs propagate.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod roc;
pub mod rsi;
pub mod sma;

pub use atr::Atr;
pub use bollinger::BollingerPercentB;
pub use ema::Ema;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;

/// A single-input indicator.
///
/// No output value at position t may depend on input from t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading positions that are NaN before the indicator is defined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the whole series.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
