//! One-dimensional term structures for model parameters.

use serde::{Deserialize, Serialize};

use crate::error::{VolError, VolResult};

/// A piecewise-linear term structure (time in years → value) with flat
/// extrapolation on both sides.
///
/// Used for ATM volatility term structures and expiry-dependent SSVI shape
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolTermCurve {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl VolTermCurve {
    /// Creates a term curve from nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes are empty, mismatched in length, not
    /// strictly increasing in time, or non-finite.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> VolResult<Self> {
        if times.is_empty() || times.len() != values.len() {
            return Err(VolError::invalid_parameter("times", times.len() as f64));
        }
        for (i, &t) in times.iter().enumerate() {
            if !t.is_finite() || t < 0.0 || (i > 0 && t <= times[i - 1]) {
                return Err(VolError::invalid_parameter("times", t));
            }
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VolError::invalid_parameter("values", f64::NAN));
        }
        Ok(Self { times, values })
    }

    /// Creates a single-node constant term curve.
    pub fn constant(value: f64) -> VolResult<Self> {
        Self::new(vec![1.0], vec![value])
    }

    /// Returns the node values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the interpolated value at `t`.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        let n = self.times.len();
        if t <= self.times[0] || n == 1 {
            return self.values[0];
        }
        if t >= self.times[n - 1] {
            return self.values[n - 1];
        }
        let idx = match self
            .times
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap())
        {
            Ok(i) => return self.values[i],
            Err(i) => i - 1,
        };
        let w = (self.times[idx + 1] - t) / (self.times[idx + 1] - self.times[idx]);
        w * self.values[idx] + (1.0 - w) * self.values[idx + 1]
    }
}

/// A model-shape parameter that is either constant or expiry-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SsviShape {
    /// The same value at every expiry.
    Constant(f64),
    /// A term structure of values.
    Term(VolTermCurve),
}

impl SsviShape {
    /// Returns the value at `expiry`.
    #[must_use]
    pub fn value(&self, expiry: f64) -> f64 {
        match self {
            SsviShape::Constant(v) => *v,
            SsviShape::Term(curve) => curve.value(expiry),
        }
    }

    /// Checks every reachable value with `check`, reporting the first
    /// failure under `name`.
    pub(crate) fn validate(
        &self,
        name: &'static str,
        check: impl Fn(f64) -> bool,
    ) -> VolResult<()> {
        let values: &[f64] = match self {
            SsviShape::Constant(v) => std::slice::from_ref(v),
            SsviShape::Term(curve) => curve.values(),
        };
        for &v in values {
            if !check(v) {
                return Err(VolError::invalid_parameter(name, v));
            }
        }
        Ok(())
    }
}
