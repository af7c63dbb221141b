//! Swap generator metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

use tenor_core::{IborIndex, Tenor};

/// Identifies the swap family a set of model parameters is valid for:
/// floating-leg index plus fixed-leg payment period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapGenerator {
    name: String,
    index: IborIndex,
    fixed_leg_period: Tenor,
}

impl SwapGenerator {
    /// Creates a new generator.
    #[must_use]
    pub fn new(name: impl Into<String>, index: IborIndex, fixed_leg_period: Tenor) -> Self {
        Self {
            name: name.into(),
            index,
            fixed_leg_period,
        }
    }

    /// Returns the generator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the floating-leg index.
    #[must_use]
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// Returns the fixed-leg payment period.
    #[must_use]
    pub fn fixed_leg_period(&self) -> Tenor {
        self.fixed_leg_period
    }
}

impl fmt::Display for SwapGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_accessors() {
        let generator =
            SwapGenerator::new("EUR1YE3M", IborIndex::euribor_3m(), Tenor::Y1);
        assert_eq!(generator.name(), "EUR1YE3M");
        assert_eq!(generator.index(), &IborIndex::euribor_3m());
        assert_eq!(generator.fixed_leg_period(), Tenor::Y1);
    }
}
