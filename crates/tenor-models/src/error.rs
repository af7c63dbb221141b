//! Error types for volatility and model-parameter operations.

use tenor_curves::error::CurveError;
use thiserror::Error;

/// A specialized Result type for volatility operations.
pub type VolResult<T> = Result<T, VolError>;

/// Error types for volatility and model-parameter operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolError {
    /// Strike outside the domain of the moneyness transform.
    #[error("invalid strike: {strike}")]
    InvalidStrike {
        /// The offending strike.
        strike: f64,
    },

    /// Futures/forward price outside the domain of the moneyness transform.
    #[error("invalid price: {price}")]
    InvalidPrice {
        /// The offending price.
        price: f64,
    },

    /// Non-positive expiry where the formula needs time value.
    #[error("invalid expiry: {expiry}")]
    InvalidExpiry {
        /// The offending expiry.
        expiry: f64,
    },

    /// Model parameter outside its admissible range.
    #[error("invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Invalid value.
        value: f64,
    },

    /// An underlying curve-provider query failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl VolError {
    /// Creates an invalid strike error.
    #[must_use]
    pub fn invalid_strike(strike: f64) -> Self {
        Self::InvalidStrike { strike }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidPrice { price }
    }

    /// Creates an invalid expiry error.
    #[must_use]
    pub fn invalid_expiry(expiry: f64) -> Self {
        Self::InvalidExpiry { expiry }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VolError::invalid_strike(-1.0);
        assert!(format!("{}", err).contains("-1"));

        let err = VolError::invalid_parameter("rho", 1.5);
        assert!(format!("{}", err).contains("rho"));
    }

    #[test]
    fn test_curve_error_conversion() {
        let curve_err = CurveError::curve_not_found("USD");
        let err: VolError = curve_err.clone().into();
        assert_eq!(err, VolError::Curve(curve_err));
    }
}
