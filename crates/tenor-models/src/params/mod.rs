//! Immutable model-parameter containers and their providers.
//!
//! These models have no volatility surface to look up: the provider simply
//! pairs curves with a validated, immutable parameter object and hands the
//! object out to pricing formulas living elsewhere.

pub mod g2pp;
pub mod hull_white;
pub mod lmm;
pub mod sabr;

pub use g2pp::{G2ppParameters, G2ppProvider};
pub use hull_white::{HullWhiteParameters, HullWhiteProvider};
pub use lmm::{LmmParameters, LmmProvider};
pub use sabr::{SabrParameters, SabrSwaptionProvider};
