//! Issuer-keyed discounting on top of a multicurve market.

pub mod provider;

pub use provider::{DiscountingIssuerProvider, IssuerProvider};
