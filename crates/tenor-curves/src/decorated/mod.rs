//! Decorating providers.
//!
//! A decorator wraps a borrowed base provider and overrides one numeric
//! quantity, delegating everything else unchanged. Decorators are views:
//! they never mutate the base, are always shorter-lived than it, and refuse
//! `try_copy` — duplicating the view without duplicating the identity of
//! the base is ill-defined.

pub mod currency;
pub mod periodic;
pub mod spread;

pub use currency::IssuerDecoratedMulticurve;
pub use periodic::PeriodicSpreadDecoratedIssuer;
pub use spread::SpreadDecoratedIssuer;
