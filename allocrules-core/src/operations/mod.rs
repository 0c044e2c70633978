//! Pipeline stages that turn a signal into an allocation.
//!
//! - `PricePredictionFromSignalRegression`: signal → `forecast_price_change`
//! - `PositionsFromPricePrediction`: `forecast_price_change` → `allocation`

pub mod positions;
pub mod regression;

pub use positions::PositionsFromPricePrediction;
pub use regression::{LinearFit, PricePredictionFromSignalRegression};
