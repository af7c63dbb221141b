//! Legal entities and the filters used to key issuer curves.
//!
//! Issuer discounting curves are not keyed by a whole entity but by the
//! *projection* of an entity through a [`LegalEntityFilter`]: a curve stored
//! under `(Key::Sector("GOVT"), Filter::Sector)` serves every entity whose
//! sector is `GOVT`. Lookup therefore applies each stored filter to the
//! queried entity and compares the result with the stored key.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;

/// A legal entity (bond issuer, counterparty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalEntity {
    ticker: String,
    short_name: String,
    sector: String,
    currency: Currency,
}

impl LegalEntity {
    /// Creates a new legal entity.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        short_name: impl Into<String>,
        sector: impl Into<String>,
        currency: Currency,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            short_name: short_name.into(),
            sector: sector.into(),
            currency,
        }
    }

    /// Returns the entity ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the entity short name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the entity sector classification.
    #[must_use]
    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// Returns the entity's currency of issuance.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for LegalEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

/// Selects which attribute of a [`LegalEntity`] identifies its curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalEntityFilter {
    /// Match on the entity short name.
    ShortName,
    /// Match on the entity ticker.
    Ticker,
    /// Match on the sector classification.
    Sector,
    /// Match on the currency of issuance.
    Currency,
}

impl LegalEntityFilter {
    /// Applies the filter to an entity, producing the key it matches under.
    #[must_use]
    pub fn apply(&self, entity: &LegalEntity) -> LegalEntityKey {
        match self {
            LegalEntityFilter::ShortName => LegalEntityKey::Name(entity.short_name.clone()),
            LegalEntityFilter::Ticker => LegalEntityKey::Ticker(entity.ticker.clone()),
            LegalEntityFilter::Sector => LegalEntityKey::Sector(entity.sector.clone()),
            LegalEntityFilter::Currency => LegalEntityKey::Currency(entity.currency),
        }
    }
}

/// The projection of a legal entity through a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalEntityKey {
    /// A short-name key.
    Name(String),
    /// A ticker key.
    Ticker(String),
    /// A sector key.
    Sector(String),
    /// A currency key.
    Currency(Currency),
}

impl fmt::Display for LegalEntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalEntityKey::Name(s) => write!(f, "name:{}", s),
            LegalEntityKey::Ticker(s) => write!(f, "ticker:{}", s),
            LegalEntityKey::Sector(s) => write!(f, "sector:{}", s),
            LegalEntityKey::Currency(c) => write!(f, "currency:{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ust() -> LegalEntity {
        LegalEntity::new("UST", "US TREASURY", "GOVT", Currency::Usd)
    }

    #[test]
    fn test_filter_apply() {
        let entity = ust();
        assert_eq!(
            LegalEntityFilter::ShortName.apply(&entity),
            LegalEntityKey::Name("US TREASURY".to_string())
        );
        assert_eq!(
            LegalEntityFilter::Sector.apply(&entity),
            LegalEntityKey::Sector("GOVT".to_string())
        );
        assert_eq!(
            LegalEntityFilter::Currency.apply(&entity),
            LegalEntityKey::Currency(Currency::Usd)
        );
    }

    #[test]
    fn test_sector_key_matches_across_entities() {
        let bund = LegalEntity::new("DBR", "BUNDESREPUBLIK", "GOVT", Currency::Eur);
        // Same sector key even though the entities differ.
        assert_eq!(
            LegalEntityFilter::Sector.apply(&ust()),
            LegalEntityFilter::Sector.apply(&bund)
        );
        assert_ne!(
            LegalEntityFilter::Currency.apply(&ust()),
            LegalEntityFilter::Currency.apply(&bund)
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            format!("{}", LegalEntityKey::Sector("GOVT".to_string())),
            "sector:GOVT"
        );
    }
}
