//! The multicurve market: discounting/forward curves, FX, sensitivities.

pub mod fx;
pub mod provider;
pub mod sensitivity;

pub use fx::FxMatrix;
pub use provider::{DiscountingMulticurve, MulticurveProvider};
pub use sensitivity::{ForwardRateCompounding, ForwardSensitivity, PointSensitivity};
