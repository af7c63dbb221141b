//! Zero-rate compounding conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a stored zero rate converts to a discount factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compounding {
    /// Continuously compounded: `DF(t) = exp(-r t)`.
    Continuous,
    /// Periodically compounded `f` times per year:
    /// `DF(t) = (1 + r/f)^(-f t)`.
    Periodic(u32),
}

impl Compounding {
    /// Returns the discount factor for rate `rate` at time `t`.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => (-rate * t).exp(),
            Compounding::Periodic(f) => {
                let f = f64::from(*f);
                (1.0 + rate / f).powf(-f * t)
            }
        }
    }

    /// Converts a rate in this convention to its continuously-compounded
    /// equivalent.
    #[must_use]
    pub fn to_continuous(&self, rate: f64) -> f64 {
        match self {
            Compounding::Continuous => rate,
            Compounding::Periodic(f) => {
                let f = f64::from(*f);
                f * (1.0 + rate / f).ln()
            }
        }
    }

    /// Derivative of the continuously-compounded equivalent with respect to
    /// the rate in this convention.
    #[must_use]
    pub fn to_continuous_derivative(&self, rate: f64) -> f64 {
        match self {
            Compounding::Continuous => 1.0,
            Compounding::Periodic(f) => {
                let f = f64::from(*f);
                1.0 / (1.0 + rate / f)
            }
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Continuous => write!(f, "continuous"),
            Compounding::Periodic(n) => write!(f, "periodic({}x)", n),
        }
    }
}
