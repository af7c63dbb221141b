//! Rate index definitions.
//!
//! An index identifies which forward curve a floating rate projects off.
//! Two families are distinguished at the type level, matching how the
//! multicurve provider stores them:
//!
//! - [`IborIndex`]: term fixings (EURIBOR 3M, legacy LIBOR style) with a
//!   tenor and a day-count factor per period
//! - [`OvernightIndex`]: overnight fixings (SOFR, ESTR, SONIA)
//!
//! Indices are value types with `Eq + Hash` so they can key the forward
//! curve maps directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;

/// Standard tenor periods used in fixed income markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tenor {
    /// 1 month
    M1,
    /// 3 months
    M3,
    /// 6 months
    M6,
    /// 12 months
    M12,
    /// 1 year
    Y1,
    /// Custom tenor in months
    Custom(u32),
}

impl Tenor {
    /// Returns the tenor in months.
    #[must_use]
    pub fn months(&self) -> u32 {
        match self {
            Tenor::M1 => 1,
            Tenor::M3 => 3,
            Tenor::M6 => 6,
            Tenor::M12 | Tenor::Y1 => 12,
            Tenor::Custom(m) => *m,
        }
    }

    /// Returns the tenor in years as a floating-point number.
    #[must_use]
    pub fn years(&self) -> f64 {
        f64::from(self.months()) / 12.0
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Y1 => write!(f, "1Y"),
            other => write!(f, "{}M", other.months()),
        }
    }
}

/// A term rate index (EURIBOR-style fixing with a tenor).
///
/// The index is the key of the Ibor forward-curve map, so identity is the
/// full tuple of conventions: two indices with the same name but different
/// tenors are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborIndex {
    name: String,
    currency: Currency,
    tenor: Tenor,
}

impl IborIndex {
    /// Creates a new Ibor index.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency, tenor: Tenor) -> Self {
        Self {
            name: name.into(),
            currency,
            tenor,
        }
    }

    /// EURIBOR 3M.
    #[must_use]
    pub fn euribor_3m() -> Self {
        Self::new("EURIBOR3M", Currency::Eur, Tenor::M3)
    }

    /// EURIBOR 6M.
    #[must_use]
    pub fn euribor_6m() -> Self {
        Self::new("EURIBOR6M", Currency::Eur, Tenor::M6)
    }

    /// USD term SOFR 3M.
    #[must_use]
    pub fn usd_term_3m() -> Self {
        Self::new("USDTERM3M", Currency::Usd, Tenor::M3)
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the index tenor.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An overnight rate index (SOFR-style daily fixing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OvernightIndex {
    name: String,
    currency: Currency,
}

impl OvernightIndex {
    /// Creates a new overnight index.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
        }
    }

    /// SOFR (USD).
    #[must_use]
    pub fn sofr() -> Self {
        Self::new("SOFR", Currency::Usd)
    }

    /// ESTR (EUR).
    #[must_use]
    pub fn estr() -> Self {
        Self::new("ESTR", Currency::Eur)
    }

    /// SONIA (GBP).
    #[must_use]
    pub fn sonia() -> Self {
        Self::new("SONIA", Currency::Gbp)
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
