//! Volatility for STIR futures options.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::IborIndex;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::VolResult;
use crate::moneyness::SmileConvention;
use crate::surface::Surface;

/// Volatility provider for options on short-term interest-rate futures.
///
/// STIR futures quote on the price-of-100 convention, so the meaningful
/// smile coordinates are the raw strike, the rate-convention log-moneyness
/// `ln((1-K)/(1-F))`, and the simple moneyness `F - K` (the latter is the
/// usual choice for normal-vol surfaces).
pub struct BlackStirFuturesProvider<P> {
    curves: P,
    surface: Arc<dyn Surface>,
    convention: SmileConvention,
    index: IborIndex,
}

impl<P: MulticurveProvider> BlackStirFuturesProvider<P> {
    /// Creates a provider with an explicit smile convention.
    #[must_use]
    pub fn new(
        curves: P,
        surface: Arc<dyn Surface>,
        convention: SmileConvention,
        index: IborIndex,
    ) -> Self {
        Self {
            curves,
            surface,
            convention,
            index,
        }
    }

    /// Creates a provider on an `(expiry, strike)` surface.
    #[must_use]
    pub fn expiry_strike(curves: P, surface: Arc<dyn Surface>, index: IborIndex) -> Self {
        Self::new(curves, surface, SmileConvention::ExpiryStrike, index)
    }

    /// Creates a provider on an `(expiry, ln((1-strike)/(1-price)))`
    /// surface.
    #[must_use]
    pub fn log_rate_moneyness(curves: P, surface: Arc<dyn Surface>, index: IborIndex) -> Self {
        Self::new(curves, surface, SmileConvention::LogRateMoneyness, index)
    }

    /// Creates a provider on an `(expiry, price - strike)` surface.
    #[must_use]
    pub fn simple_moneyness(curves: P, surface: Arc<dyn Surface>, index: IborIndex) -> Self {
        Self::new(curves, surface, SmileConvention::SimpleMoneyness, index)
    }

    /// Returns the volatility for an option on the futures.
    pub fn volatility(
        &self,
        expiry: f64,
        delay: f64,
        strike: f64,
        futures_price: f64,
    ) -> VolResult<f64> {
        let y = self.convention.coordinate(delay, strike, futures_price)?;
        Ok(self.surface.z_value(expiry, y))
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &P {
        &self.curves
    }

    /// Returns the index of the underlying futures.
    #[must_use]
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// Returns the smile convention.
    #[must_use]
    pub fn convention(&self) -> SmileConvention {
        self.convention
    }

    /// Returns all curve names of the embedded provider.
    #[must_use]
    pub fn all_curve_names(&self) -> BTreeSet<String> {
        self.curves.all_curve_names()
    }

    /// Delegates to the embedded provider; the surface is not
    /// differentiated through this path.
    pub fn parameter_sensitivity(
        &self,
        name: &str,
        sensitivities: &[PointSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.curves.parameter_sensitivity(name, sensitivities)
    }

    /// Delegates to the embedded provider.
    pub fn parameter_forward_sensitivity(
        &self,
        name: &str,
        sensitivities: &[ForwardSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.curves.parameter_forward_sensitivity(name, sensitivities)
    }
}

impl<P: MulticurveProvider + Clone> BlackStirFuturesProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable surface.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            surface: Arc::clone(&self.surface),
            convention: self.convention,
            index: self.index.clone(),
        }
    }
}
