//! # Tenor Core
//!
//! Market primitives for the Tenor rates analytics library.
//!
//! This crate provides the foundational value types used throughout Tenor:
//!
//! - **Currencies**: [`Currency`] and [`CurrencyPair`]
//! - **Rate Indices**: [`IborIndex`] and [`OvernightIndex`] with their
//!   market conventions, plus the [`Tenor`] period type
//! - **Legal Entities**: [`LegalEntity`] together with the
//!   [`LegalEntityFilter`]/[`LegalEntityKey`] pair used to key
//!   issuer-specific discounting curves
//!
//! Everything here is a plain value type: cheap to clone, hashable where it
//! is used as a map key, and serializable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]

pub mod types;

pub use types::currency::{Currency, CurrencyPair};
pub use types::entity::{LegalEntity, LegalEntityFilter, LegalEntityKey};
pub use types::index::{IborIndex, OvernightIndex, Tenor};
