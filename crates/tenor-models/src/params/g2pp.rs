//! G2++ two-factor model parameters.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tenor_core::Currency;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};

/// Piecewise-constant G2++ (two-factor Gaussian) parameters.
///
/// Two mean-reverting factors with correlated Brownian drivers; both
/// volatility functions are constant on the shared time grid, with the
/// same step layout as the one-factor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G2ppParameters {
    mean_reversion: [f64; 2],
    volatility: [Vec<f64>; 2],
    volatility_time: Vec<f64>,
    correlation: f64,
}

impl G2ppParameters {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Requires positive mean reversions, positive volatilities of length
    /// `volatility_time.len() + 1` for both factors, strictly increasing
    /// step times, and `|correlation| <= 1`.
    pub fn new(
        mean_reversion: [f64; 2],
        volatility: [Vec<f64>; 2],
        volatility_time: Vec<f64>,
        correlation: f64,
    ) -> VolResult<Self> {
        for &a in &mean_reversion {
            if !a.is_finite() || a <= 0.0 {
                return Err(VolError::invalid_parameter("mean_reversion", a));
            }
        }
        for vols in &volatility {
            if vols.len() != volatility_time.len() + 1 {
                return Err(VolError::invalid_parameter("volatility", vols.len() as f64));
            }
            if vols.iter().any(|&v| !v.is_finite() || v <= 0.0) {
                return Err(VolError::invalid_parameter("volatility", f64::NAN));
            }
        }
        for (i, &t) in volatility_time.iter().enumerate() {
            if !t.is_finite() || t <= 0.0 || (i > 0 && t <= volatility_time[i - 1]) {
                return Err(VolError::invalid_parameter("volatility_time", t));
            }
        }
        if !correlation.is_finite() || correlation.abs() > 1.0 {
            return Err(VolError::invalid_parameter("correlation", correlation));
        }
        Ok(Self {
            mean_reversion,
            volatility,
            volatility_time,
            correlation,
        })
    }

    /// Returns the mean reversion speeds of the two factors.
    #[must_use]
    pub fn mean_reversion(&self) -> [f64; 2] {
        self.mean_reversion
    }

    /// Returns the factor correlation.
    #[must_use]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Returns the step times.
    #[must_use]
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Returns the volatilities of both factors applying at time `t`.
    #[must_use]
    pub fn volatility_at(&self, t: f64) -> [f64; 2] {
        let idx = self
            .volatility_time
            .iter()
            .position(|&step| t < step)
            .unwrap_or(self.volatility_time.len());
        [self.volatility[0][idx], self.volatility[1][idx]]
    }
}

/// Pairs a multicurve market with G2++ parameters for one currency.
pub struct G2ppProvider<P> {
    curves: P,
    parameters: Arc<G2ppParameters>,
    currency: Currency,
}

impl<P: MulticurveProvider> G2ppProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, parameters: Arc<G2ppParameters>, currency: Currency) -> Self {
        Self {
            curves,
            parameters,
            currency,
        }
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> &G2ppParameters {
        &self.parameters
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &P {
        &self.curves
    }

    /// Returns the currency the parameters are valid for.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
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

impl<P: MulticurveProvider + Clone> G2ppProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable parameters.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            parameters: Arc::clone(&self.parameters),
            currency: self.currency,
        }
    }
}
