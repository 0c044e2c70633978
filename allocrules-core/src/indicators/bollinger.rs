//! Bollinger %B — position of the value inside its Bollinger Bands.
//!
//! middle = SMA(period), upper/lower = middle +/- mult * stddev (population).
//! %B = (x - lower) / (upper - lower); a flat window (zero width) maps to 0.5.
//! Lookback: period - 1.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct BollingerPercentB {
    period: usize,
    multiplier: f64,
    name: String,
}

impl BollingerPercentB {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            name: format!("bollinger_pband_{period}_{multiplier}"),
        }
    }
}

impl Indicator for BollingerPercentB {
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

        for i in (self.period - 1)..n {
            let window = &values[(i + 1 - self.period)..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }

            let mean = window.iter().sum::<f64>() / self.period as f64;
            let variance = window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
                / self.period as f64;
            let width = 2.0 * self.multiplier * variance.sqrt();
            let lower = mean - self.multiplier * variance.sqrt();

            result[i] = if width == 0.0 {
                0.5
            } else {
                (values[i] - lower) / width
            };
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn percent_b_at_mean_is_half() {
        // Window [1, 3, 2]: mean 2, last value 2
        let result = BollingerPercentB::new(3, 2.0).compute(&[1.0, 3.0, 2.0]);
        assert_approx(result[2], 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn percent_b_at_upper_band_is_one() {
        // Window [0, 2]: mean 1, stddev 1; mult 1 → upper band = 2
        let result = BollingerPercentB::new(2, 1.0).compute(&[0.0, 2.0]);
        assert_approx(result[1], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_window_is_half() {
        let result = BollingerPercentB::new(3, 2.0).compute(&[5.0, 5.0, 5.0, 5.0]);
        assert_approx(result[3], 0.5, DEFAULT_EPSILON);
    }
}
