//! # Tenor Curves
//!
//! Multi-curve and issuer curve providers for the Tenor rates analytics
//! library.
//!
//! This crate provides:
//!
//! - **Curve Capability**: the [`YieldCurve`] trait consumed by every
//!   provider — discount factors plus parameter sensitivities
//! - **Concrete Curves**: interpolated zero-rate curves and periodic
//!   spread composites
//! - **Multicurve Provider**: discounting curves by currency, forward
//!   curves by index, an FX matrix, and curve-parameter sensitivity
//!   projection
//! - **Issuer Provider**: credit curves keyed by legal-entity filters on
//!   top of a multicurve market
//! - **Decorators**: spread-shifted and curve-substituted views over a
//!   borrowed base provider
//! - **Merging**: combining independently-built markets
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tenor_core::{Currency, IborIndex};
//! use tenor_curves::curves::ZeroRateCurve;
//! use tenor_curves::multicurve::{DiscountingMulticurve, MulticurveProvider};
//!
//! let mut market = DiscountingMulticurve::new();
//! market
//!     .set_discounting_curve(
//!         Currency::Usd,
//!         Arc::new(ZeroRateCurve::flat("USD-DSC", 0.02).unwrap()),
//!     )
//!     .unwrap();
//! market
//!     .set_ibor_curve(
//!         IborIndex::usd_term_3m(),
//!         Arc::new(ZeroRateCurve::flat("USD-3M", 0.02).unwrap()),
//!     )
//!     .unwrap();
//!
//! let df = market.discount_factor(Currency::Usd, 1.0).unwrap();
//! let fwd = market
//!     .ibor_forward_rate_with_accrual(&IborIndex::usd_term_3m(), 0.0, 0.25, 0.25)
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]

pub mod compounding;
pub mod curves;
pub mod decorated;
pub mod error;
pub mod issuer;
pub mod merge;
pub mod multicurve;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::Compounding;
    pub use crate::curves::{SpreadZeroCurve, ZeroRateCurve};
    pub use crate::decorated::{
        IssuerDecoratedMulticurve, PeriodicSpreadDecoratedIssuer, SpreadDecoratedIssuer,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::issuer::{DiscountingIssuerProvider, IssuerProvider};
    pub use crate::merge::{merge_fx, merge_multicurves};
    pub use crate::multicurve::{
        DiscountingMulticurve, ForwardRateCompounding, ForwardSensitivity, FxMatrix,
        MulticurveProvider, PointSensitivity,
    };
    pub use crate::traits::YieldCurve;
}

pub use compounding::Compounding;
pub use error::{CurveError, CurveResult};
pub use multicurve::{DiscountingMulticurve, FxMatrix, MulticurveProvider};
pub use traits::YieldCurve;
