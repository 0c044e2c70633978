//! Table transforms and pipelines.
//!
//! A `TableTransform` is one stage of a fit/transform pipeline: `fit` learns
//! state from a table (most stages are stateless and keep the default no-op),
//! `transform` writes its output columns into the table in place.
//!
//! - `FunctionTransformer`: stateless stage wrapping an `AllocationFn`.
//! - `allocation_transformer`: the transformer factory for allocation functions.
//! - `Pipeline`: ordered stages, each fitted on the previous stage's output.

use std::fmt;

use polars::prelude::DataFrame;

use crate::params::Params;
use crate::rules::{AllocationFn, RuleError};

/// One stage of a table pipeline.
pub trait TableTransform: Send + Sync {
    /// Stage name, used in logs and `NotFitted` errors.
    fn name(&self) -> &str;

    /// Learn any state needed by `transform`.
    fn fit(&mut self, _table: &DataFrame) -> Result<(), RuleError> {
        Ok(())
    }

    /// Apply the stage to `table` in place.
    fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError>;

    fn fit_transform(&mut self, table: &mut DataFrame) -> Result<(), RuleError> {
        self.fit(table)?;
        self.transform(table)
    }
}

/// Stateless stage applying an allocation function with fixed parameters.
pub struct FunctionTransformer {
    name: String,
    function: AllocationFn,
    params: Params,
}

impl FunctionTransformer {
    pub fn new(name: impl Into<String>, function: AllocationFn, params: Params) -> Self {
        Self {
            name: name.into(),
            function,
            params,
        }
    }
}

impl fmt::Debug for FunctionTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTransformer")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl TableTransform for FunctionTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError> {
        (self.function)(table, &self.params)
    }
}

/// Wrap an allocation function as a pipeline stage. Pure pass-through: no
/// parameters are bound, so the function runs with its own defaults.
pub fn allocation_transformer(function: AllocationFn) -> FunctionTransformer {
    FunctionTransformer::new("allocation_function", function, Params::new())
}

/// An ordered chain of transforms.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn TableTransform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage (builder style).
    pub fn stage(mut self, stage: impl TableTransform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Fit and apply every stage in order; each stage sees the previous stage's output.
    pub fn fit_transform(&mut self, table: &mut DataFrame) -> Result<(), RuleError> {
        for stage in &mut self.stages {
            tracing::debug!(stage = stage.name(), rows = table.height(), "fit_transform");
            stage.fit_transform(table)?;
        }
        Ok(())
    }

    /// Apply every (already fitted) stage in order.
    pub fn transform(&self, table: &mut DataFrame) -> Result<(), RuleError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), rows = table.height(), "transform");
            stage.transform(table)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
