//! Black volatility providers.
//!
//! Each provider pairs a curve provider with one surface and one
//! [`SmileConvention`](crate::moneyness::SmileConvention); the convention
//! is the only thing distinguishing the smile variants of a family.

pub mod bond_futures;
pub mod capfloor;
pub mod stir_futures;
pub mod swaption;

pub use bond_futures::BlackBondFuturesProvider;
pub use capfloor::BlackCapFloorProvider;
pub use stir_futures::BlackStirFuturesProvider;
pub use swaption::BlackSwaptionProvider;
