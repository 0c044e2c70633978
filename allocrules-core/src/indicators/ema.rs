//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1)
//! Seed: EMA[period-1] = SMA of the first `period` values.
//! Lookback: period - 1.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let seed_window = &values[..self.period];
        if seed_window.iter().any(|v| v.is_nan()) {
            return result;
        }
        let seed = seed_window.iter().sum::<f64>() / self.period as f64;
        result[self.period - 1] = seed;

        let alpha = 2.0 / (self.period as f64 + 1.0);
        let mut prev = seed;
        for i in self.period..n {
            // Once tainted, every later value stays NaN.
            if values[i].is_nan() {
                return result;
            }
            let ema = alpha * values[i] + (1.0 - alpha) * prev;
            result[i] = ema;
            prev = ema;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_seed_is_sma() {
        let result = Ema::new(3).compute(&[2.0, 4.0, 6.0, 8.0]);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
        // alpha = 0.5 → 0.5 * 8 + 0.5 * 4 = 6
        assert_approx(result[3], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_series_is_constant() {
        let result = Ema::new(4).compute(&[7.0; 10]);
        for v in &result[3..] {
            assert_approx(*v, 7.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_nan_taints_the_rest() {
        let result = Ema::new(2).compute(&[1.0, 2.0, 3.0, f64::NAN, 5.0]);
        assert!(!result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
    }
}
