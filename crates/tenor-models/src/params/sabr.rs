//! SABR parameter surfaces for swaptions.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};
use crate::generator::SwapGenerator;
use crate::surface::{GridSurface, Surface};

/// SABR parameters as surfaces over `(expiry, underlying maturity)`.
///
/// Each of alpha, beta, rho and nu is a full surface; the smile formula
/// consuming them (Hagan et al.) lives with the pricing code, this
/// container only guarantees the grids are well-formed and the queried
/// values are in range.
#[derive(Debug, Clone)]
pub struct SabrParameters {
    alpha: GridSurface,
    beta: GridSurface,
    rho: GridSurface,
    nu: GridSurface,
}

impl SabrParameters {
    /// Creates a parameter set from four surfaces.
    #[must_use]
    pub fn new(alpha: GridSurface, beta: GridSurface, rho: GridSurface, nu: GridSurface) -> Self {
        Self {
            alpha,
            beta,
            rho,
            nu,
        }
    }

    /// Returns alpha (initial volatility) at `(expiry, maturity)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolated value is not positive.
    pub fn alpha(&self, expiry: f64, maturity: f64) -> VolResult<f64> {
        let v = self.alpha.z_value(expiry, maturity);
        if v <= 0.0 {
            return Err(VolError::invalid_parameter("alpha", v));
        }
        Ok(v)
    }

    /// Returns beta (CEV exponent) at `(expiry, maturity)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolated value leaves `[0, 1]`.
    pub fn beta(&self, expiry: f64, maturity: f64) -> VolResult<f64> {
        let v = self.beta.z_value(expiry, maturity);
        if !(0.0..=1.0).contains(&v) {
            return Err(VolError::invalid_parameter("beta", v));
        }
        Ok(v)
    }

    /// Returns rho (spot/vol correlation) at `(expiry, maturity)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolated value leaves `(-1, 1)`.
    pub fn rho(&self, expiry: f64, maturity: f64) -> VolResult<f64> {
        let v = self.rho.z_value(expiry, maturity);
        if v.abs() >= 1.0 {
            return Err(VolError::invalid_parameter("rho", v));
        }
        Ok(v)
    }

    /// Returns nu (vol-of-vol) at `(expiry, maturity)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolated value is negative.
    pub fn nu(&self, expiry: f64, maturity: f64) -> VolResult<f64> {
        let v = self.nu.z_value(expiry, maturity);
        if v < 0.0 {
            return Err(VolError::invalid_parameter("nu", v));
        }
        Ok(v)
    }
}

/// Pairs a multicurve market with SABR parameter surfaces for one swap
/// family.
pub struct SabrSwaptionProvider<P> {
    curves: P,
    parameters: Arc<SabrParameters>,
    generator: SwapGenerator,
}

impl<P: MulticurveProvider> SabrSwaptionProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, parameters: Arc<SabrParameters>, generator: SwapGenerator) -> Self {
        Self {
            curves,
            parameters,
            generator,
        }
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> &SabrParameters {
        &self.parameters
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &P {
        &self.curves
    }

    /// Returns the swap generator the parameters are valid for.
    #[must_use]
    pub fn generator(&self) -> &SwapGenerator {
        &self.generator
    }

    /// Returns all curve names of the embedded provider.
    #[must_use]
    pub fn all_curve_names(&self) -> BTreeSet<String> {
        self.curves.all_curve_names()
    }

    /// Delegates to the embedded provider; SABR parameters are not
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

impl<P: MulticurveProvider + Clone> SabrSwaptionProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable parameters.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            parameters: Arc::clone(&self.parameters),
            generator: self.generator.clone(),
        }
    }
}
