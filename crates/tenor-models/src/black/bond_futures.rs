//! Black volatility for bond futures options.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::LegalEntity;
use tenor_curves::error::CurveResult;
use tenor_curves::issuer::IssuerProvider;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::VolResult;
use crate::moneyness::SmileConvention;
use crate::surface::Surface;

/// Black volatility provider for options on bond futures.
///
/// Pairs the issuer curves discounting the underlying bonds with a
/// volatility surface in `(expiry, y)` coordinates, where `y` is fixed by
/// the smile convention. The surface is immutable and shared; `copy()`
/// deep-copies only the curve side.
pub struct BlackBondFuturesProvider<P> {
    issuer: P,
    surface: Arc<dyn Surface>,
    convention: SmileConvention,
    legal_entity: LegalEntity,
}

impl<P: IssuerProvider> BlackBondFuturesProvider<P> {
    /// Creates a provider with an explicit smile convention.
    #[must_use]
    pub fn new(
        issuer: P,
        surface: Arc<dyn Surface>,
        convention: SmileConvention,
        legal_entity: LegalEntity,
    ) -> Self {
        Self {
            issuer,
            surface,
            convention,
            legal_entity,
        }
    }

    /// Creates a smile-less provider on an `(expiry, delay)` surface.
    #[must_use]
    pub fn flat(issuer: P, surface: Arc<dyn Surface>, legal_entity: LegalEntity) -> Self {
        Self::new(issuer, surface, SmileConvention::ExpiryDelay, legal_entity)
    }

    /// Creates a provider on an `(expiry, ln(strike/price))` surface.
    #[must_use]
    pub fn log_moneyness(
        issuer: P,
        surface: Arc<dyn Surface>,
        legal_entity: LegalEntity,
    ) -> Self {
        Self::new(issuer, surface, SmileConvention::LogMoneyness, legal_entity)
    }

    /// Returns the Black volatility for an option on the futures.
    ///
    /// `delay` is the time between option expiry and delivery of the
    /// underlying futures; it is the y-coordinate for the smile-less
    /// convention and ignored otherwise.
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

    /// Returns the issuer provider.
    #[must_use]
    pub fn issuer(&self) -> &P {
        &self.issuer
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &dyn MulticurveProvider {
        self.issuer.multicurve()
    }

    /// Returns the legal entity of the bonds underlying the futures.
    #[must_use]
    pub fn legal_entity(&self) -> &LegalEntity {
        &self.legal_entity
    }

    /// Returns the smile convention.
    #[must_use]
    pub fn convention(&self) -> SmileConvention {
        self.convention
    }

    /// Returns all curve names of the embedded provider.
    #[must_use]
    pub fn all_curve_names(&self) -> BTreeSet<String> {
        self.issuer.all_curve_names()
    }

    /// Delegates to the embedded provider; the surface is not
    /// differentiated through this path.
    pub fn parameter_sensitivity(
        &self,
        name: &str,
        sensitivities: &[PointSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.issuer.parameter_sensitivity(name, sensitivities)
    }

    /// Delegates to the embedded provider.
    pub fn parameter_forward_sensitivity(
        &self,
        name: &str,
        sensitivities: &[ForwardSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.issuer.parameter_forward_sensitivity(name, sensitivities)
    }
}

impl<P: IssuerProvider + Clone> BlackBondFuturesProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable surface.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
            surface: Arc::clone(&self.surface),
            convention: self.convention,
            legal_entity: self.legal_entity.clone(),
        }
    }
}
