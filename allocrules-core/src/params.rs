//! Keyword parameters for allocation rules and signals.
//!
//! Uses `BTreeMap` so parameter listings and serialized configs have a stable order.

use std::collections::BTreeMap;

use crate::rules::RuleError;

/// Named numeric parameters. Window lengths are stored as `f64` and truncated on use.
pub type Params = BTreeMap<String, f64>;

/// Build a `Params` map from `(name, value)` pairs.
pub fn params(pairs: &[(&str, f64)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Extract a named f64 parameter, falling back to `default`.
pub fn param(params: &Params, name: &str, default: f64) -> f64 {
    params.get(name).copied().unwrap_or(default)
}

/// Extract a named usize parameter, falling back to `default`.
///
/// Fractions are truncated and negative values saturate to 0.
pub fn param_usize(params: &Params, name: &str, default: usize) -> usize {
    params
        .get(name)
        .copied()
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Overlay `overrides` on `defaults`.
///
/// Every override must name a declared default, the same way an unexpected
/// keyword argument is refused.
pub fn merge_params(rule: &str, defaults: &Params, overrides: &Params) -> Result<Params, RuleError> {
    let mut merged = defaults.clone();
    for (name, value) in overrides {
        if !defaults.contains_key(name) {
            return Err(RuleError::UnknownParameter {
                rule: rule.to_string(),
                parameter: name.clone(),
            });
        }
        merged.insert(name.clone(), *value);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_falls_back_to_default() {
        let p = params(&[("scale", 2.0)]);
        assert_eq!(param(&p, "scale", 1.0), 2.0);
        assert_eq!(param(&p, "constant", 0.5), 0.5);
    }

    #[test]
    fn param_usize_truncates_and_saturates() {
        let p = params(&[("fast", 3.7), ("slow", -4.0)]);
        assert_eq!(param_usize(&p, "fast", 0), 3);
        assert_eq!(param_usize(&p, "slow", 10), 0);
        assert_eq!(param_usize(&p, "window", 14), 14);
    }

    #[test]
    fn merge_overrides_defaults() {
        let defaults = params(&[("scale", 1.0), ("constant", 0.0)]);
        let merged = merge_params("high_low_difference", &defaults, &params(&[("scale", 3.0)])).unwrap();
        assert_eq!(merged, params(&[("scale", 3.0), ("constant", 0.0)]));
    }

    #[test]
    fn merge_rejects_undeclared_parameter() {
        let defaults = params(&[("scale", 1.0)]);
        let err = merge_params("high_low_difference", &defaults, &params(&[("window", 3.0)]))
            .unwrap_err();
        match err {
            RuleError::UnknownParameter { rule, parameter } => {
                assert_eq!(rule, "high_low_difference");
                assert_eq!(parameter, "window");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
