//! # Tenor Models
//!
//! Volatility surfaces and model-parameter providers for the Tenor rates
//! analytics library.
//!
//! This crate provides:
//!
//! - **Surfaces**: the [`Surface`](surface::Surface) capability with flat
//!   and bilinear-grid implementations
//! - **Smile Conventions**: one coordinate transform per surface
//!   convention (strike, log-moneyness, rate-convention log-moneyness,
//!   simple moneyness)
//! - **Black Providers**: bond futures, STIR futures, swaption and
//!   cap/floor volatility lookups paired with their curve providers
//! - **SSVI**: the closed-form smile with an analytic adjoint for
//!   calibration
//! - **Model Parameters**: validated SABR, Hull-White one-factor, G2++ and
//!   displaced-diffusion LMM containers with pass-through curve delegation
//!
//! Every provider pairs one curve provider with one immutable parameter
//! object. Curve risk keeps flowing through the embedded provider; the
//! model parameters are never differentiated along that path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

pub mod black;
pub mod error;
pub mod generator;
pub mod moneyness;
pub mod params;
pub mod ssvi;
pub mod surface;
pub mod term;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::black::{
        BlackBondFuturesProvider, BlackCapFloorProvider, BlackStirFuturesProvider,
        BlackSwaptionProvider,
    };
    pub use crate::error::{VolError, VolResult};
    pub use crate::generator::SwapGenerator;
    pub use crate::moneyness::SmileConvention;
    pub use crate::params::{
        G2ppParameters, G2ppProvider, HullWhiteParameters, HullWhiteProvider, LmmParameters,
        LmmProvider, SabrParameters, SabrSwaptionProvider,
    };
    pub use crate::ssvi::{
        ssvi_volatility, ssvi_volatility_adjoint, SsviAdjoint, SsviBondFuturesProvider,
        SsviParameters,
    };
    pub use crate::surface::{FlatSurface, GridSurface, Surface};
    pub use crate::term::{SsviShape, VolTermCurve};
}

pub use error::{VolError, VolResult};
pub use moneyness::SmileConvention;
pub use surface::Surface;
