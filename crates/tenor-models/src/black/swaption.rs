//! Black volatility for swaptions.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::generator::SwapGenerator;
use crate::surface::Surface;

/// Black volatility provider for swaptions with a strike-less surface.
///
/// The surface is `(expiry, underlying swap tenor)`; the generator records
/// which swap family the volatilities were quoted for.
pub struct BlackSwaptionProvider<P> {
    curves: P,
    surface: Arc<dyn Surface>,
    generator: SwapGenerator,
}

impl<P: MulticurveProvider> BlackSwaptionProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, surface: Arc<dyn Surface>, generator: SwapGenerator) -> Self {
        Self {
            curves,
            surface,
            generator,
        }
    }

    /// Returns the Black volatility at `(expiry, underlying swap tenor)`.
    #[must_use]
    pub fn volatility(&self, expiry: f64, tenor: f64) -> f64 {
        self.surface.z_value(expiry, tenor)
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &P {
        &self.curves
    }

    /// Returns the swap generator the volatilities are valid for.
    #[must_use]
    pub fn generator(&self) -> &SwapGenerator {
        &self.generator
    }

    /// Returns all curve names of the embedded provider.
    #[must_use]
    pub fn all_curve_names(&self) -> BTreeSet<String> {
        self.curves.all_curve_names()
    }

    /// Delegates to the embedded provider.
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

impl<P: MulticurveProvider + Clone> BlackSwaptionProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable surface.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            surface: Arc::clone(&self.surface),
            generator: self.generator.clone(),
        }
    }
}
