//! Numeric normalization
//!
//! Different surface implementations disagree in the last bits of the same
//! number (2π is the usual suspect). Recorded numbers are rounded to a fixed
//! precision so identical drawing sequences serialize identically.
//!
//! Only numbers change, and only their magnitude: strings, booleans, null,
//! arrays and objects pass through untouched. Arrays and objects are not
//! walked; a `setLineDash([0.12345])` argument is recorded as given.

use serde_json::{Number, Value};

use crate::config::NUMBER_PRECISION;
use crate::error::{CanteenError, Result};

/// Rounds recorded numbers to `1 / precision`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    precision: u32,
}

impl Normalizer {
    /// `precision` is the rounding factor: 1000 keeps three decimals
    pub fn new(precision: u32) -> Result<Self> {
        if precision == 0 {
            return Err(CanteenError::InvalidPrecision { value: precision });
        }
        Ok(Self { precision })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Round half toward positive infinity: `floor(n * P + 0.5) / P`
    ///
    /// Returns `n` unchanged when scaling would overflow.
    pub fn round(&self, n: f64) -> f64 {
        let factor = f64::from(self.precision);
        let scaled = n * factor;
        if !scaled.is_finite() {
            return n;
        }
        (scaled + 0.5).floor() / factor
    }

    /// Normalize a single value
    pub fn normalize(&self, value: &Value) -> Value {
        match value {
            Value::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) => canonical_number(self.round(f)).unwrap_or_else(|| value.clone()),
                None => value.clone(),
            },
            // Integers are already exact at any precision
            _ => value.clone(),
        }
    }

    /// Normalize each top-level element of an argument list
    pub fn normalize_all(&self, values: &[Value]) -> Vec<Value> {
        values.iter().map(|v| self.normalize(v)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            precision: NUMBER_PRECISION,
        }
    }
}

/// Integral results become JSON integers so `50` and `50.0` record the same
fn canonical_number(n: f64) -> Option<Value> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}
