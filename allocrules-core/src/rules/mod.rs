//! Allocation rules — table in, same table out with the allocation column set.
//!
//! Every rule has the `AllocationFn` shape: it reads the columns it needs,
//! writes (adds or overwrites) the `allocation` column in place, and leaves
//! every other column and the row order untouched.

pub mod constant;
pub mod high_low;
pub mod sma_crossover;

use std::sync::Arc;

use polars::prelude::{DataFrame, PolarsError};

use crate::params::Params;

pub use constant::{buy_and_hold, constant_allocation_size, fifty_fifty};
pub use high_low::high_low_difference;
pub use sma_crossover::sma_crossover_strategy;

/// A shareable allocation function: mutates the table, applying `Params` as keyword arguments.
pub type AllocationFn = Arc<dyn Fn(&mut DataFrame, &Params) -> Result<(), RuleError> + Send + Sync>;

/// Errors raised while evaluating rules, signals, and pipeline stages.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unknown allocation rule: {0}")]
    UnknownRule(String),

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    #[error("Unknown parameter '{parameter}' for rule '{rule}'")]
    UnknownParameter { rule: String, parameter: String },

    #[error("Insufficient data for regression: need {needed} usable rows, got {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Transformer '{0}' used before fit")]
    NotFitted(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
