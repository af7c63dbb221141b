//! Smile coordinate conventions.
//!
//! Every Black provider stores exactly one transform from the raw query
//! `(delay, strike, price)` to the y-coordinate of its surface; the
//! x-coordinate is always the expiry. The transform is a sum type rather
//! than a family of provider subclasses: one variant, one formula, one
//! domain check.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{VolError, VolResult};

/// The y-coordinate convention of a volatility surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmileConvention {
    /// No smile: the surface is (expiry, delay) and the strike is ignored.
    ExpiryDelay,
    /// Raw strike: requires `strike > 0` and `price > 0`.
    ExpiryStrike,
    /// `ln(strike / price)`: requires both positive (price quotes).
    LogMoneyness,
    /// `ln((1 - strike) / (1 - price))`: requires both below 1
    /// (price-of-100 rate convention for STIR futures).
    LogRateMoneyness,
    /// `price - strike` (no domain restriction).
    SimpleMoneyness,
}

impl SmileConvention {
    /// Returns the surface y-coordinate for a query.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrike`/`InvalidPrice` when the inputs fall outside
    /// the transform's domain.
    pub fn coordinate(&self, delay: f64, strike: f64, price: f64) -> VolResult<f64> {
        match self {
            SmileConvention::ExpiryDelay => Ok(delay),
            SmileConvention::ExpiryStrike => {
                if strike <= 0.0 {
                    return Err(VolError::invalid_strike(strike));
                }
                if price <= 0.0 {
                    return Err(VolError::invalid_price(price));
                }
                Ok(strike)
            }
            SmileConvention::LogMoneyness => {
                if strike <= 0.0 {
                    return Err(VolError::invalid_strike(strike));
                }
                if price <= 0.0 {
                    return Err(VolError::invalid_price(price));
                }
                Ok((strike / price).ln())
            }
            SmileConvention::LogRateMoneyness => {
                if strike >= 1.0 {
                    return Err(VolError::invalid_strike(strike));
                }
                if price >= 1.0 {
                    return Err(VolError::invalid_price(price));
                }
                Ok(((1.0 - strike) / (1.0 - price)).ln())
            }
            SmileConvention::SimpleMoneyness => Ok(price - strike),
        }
    }
}

impl fmt::Display for SmileConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmileConvention::ExpiryDelay => "expiry/delay",
            SmileConvention::ExpiryStrike => "expiry/strike",
            SmileConvention::LogMoneyness => "log-moneyness",
            SmileConvention::LogRateMoneyness => "log-moneyness (rate)",
            SmileConvention::SimpleMoneyness => "simple moneyness",
        };
        write!(f, "{}", name)
    }
}
