//! Numeric policy: which numbers may be hashed.

use crate::config::NumberConfig;
use crate::errors::HashError;

impl NumberConfig {
    /// Checks that `value` can be hashed and returns it unchanged.
    ///
    /// The precision check is a gate, not a normalization: `1.001` passes
    /// with a precision of `0.001` and is encoded as `1.001`. Integral values
    /// are always accepted, without range checks.
    pub fn check(&self, value: f64) -> Result<f64, HashError> {
        if value.is_nan() {
            return Err(HashError::NotFinite);
        }

        if value.fract() == 0.0 {
            return Ok(value);
        }

        if self.exceeds_precision(value) {
            return Err(HashError::PrecisionExceeded {
                value,
                precision: self.precision,
            });
        }

        let range_error = if value > self.max_num {
            Some(HashError::AboveRange {
                value,
                max: self.max_num,
            })
        } else if value < self.min_num {
            Some(HashError::BelowRange {
                value,
                min: self.min_num,
            })
        } else {
            None
        };

        match range_error {
            Some(err) if self.throw_on_range_error => Err(err),
            Some(err) => {
                tracing::warn!(%err, "accepting number outside configured range");
                Ok(value)
            }
            None => Ok(value),
        }
    }

    fn exceeds_precision(&self, value: f64) -> bool {
        let rounded = (value / self.precision).round() * self.precision;
        (value - rounded).abs() > f64::EPSILON
    }
}
