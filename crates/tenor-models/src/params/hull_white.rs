//! Hull-White one-factor model parameters.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tenor_core::Currency;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};

/// Piecewise-constant Hull-White one-factor parameters.
///
/// The short rate follows `dr = (θ(t) - a·r)dt + σ(t)dW` with constant
/// mean reversion `a` and a volatility that is constant on each interval
/// of the time grid: `volatility[i]` applies on
/// `[volatility_time[i-1], volatility_time[i])`, with the first interval
/// starting at zero and the last extending to infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteParameters {
    mean_reversion: f64,
    volatility: Vec<f64>,
    volatility_time: Vec<f64>,
}

impl HullWhiteParameters {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Requires a positive mean reversion, positive volatilities, strictly
    /// increasing step times, and `volatility.len() == volatility_time.len() + 1`.
    pub fn new(
        mean_reversion: f64,
        volatility: Vec<f64>,
        volatility_time: Vec<f64>,
    ) -> VolResult<Self> {
        if !mean_reversion.is_finite() || mean_reversion <= 0.0 {
            return Err(VolError::invalid_parameter("mean_reversion", mean_reversion));
        }
        if volatility.len() != volatility_time.len() + 1 {
            return Err(VolError::invalid_parameter(
                "volatility",
                volatility.len() as f64,
            ));
        }
        if volatility.iter().any(|&v| !v.is_finite() || v <= 0.0) {
            return Err(VolError::invalid_parameter("volatility", f64::NAN));
        }
        for (i, &t) in volatility_time.iter().enumerate() {
            if !t.is_finite() || t <= 0.0 || (i > 0 && t <= volatility_time[i - 1]) {
                return Err(VolError::invalid_parameter("volatility_time", t));
            }
        }
        Ok(Self {
            mean_reversion,
            volatility,
            volatility_time,
        })
    }

    /// Creates a single-volatility parameter set.
    pub fn constant(mean_reversion: f64, volatility: f64) -> VolResult<Self> {
        Self::new(mean_reversion, vec![volatility], vec![])
    }

    /// Returns the mean reversion speed.
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Returns the volatility steps.
    #[must_use]
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Returns the step times.
    #[must_use]
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Returns the volatility applying at time `t`.
    #[must_use]
    pub fn volatility_at(&self, t: f64) -> f64 {
        let idx = self
            .volatility_time
            .iter()
            .position(|&step| t < step)
            .unwrap_or(self.volatility_time.len());
        self.volatility[idx]
    }
}

/// Pairs a multicurve market with Hull-White parameters for one currency.
pub struct HullWhiteProvider<P> {
    curves: P,
    parameters: Arc<HullWhiteParameters>,
    currency: Currency,
}

impl<P: MulticurveProvider> HullWhiteProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, parameters: Arc<HullWhiteParameters>, currency: Currency) -> Self {
        Self {
            curves,
            parameters,
            currency,
        }
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> &HullWhiteParameters {
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

    /// Delegates to the embedded provider; model parameters are not
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

impl<P: MulticurveProvider + Clone> HullWhiteProvider<P> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc as StdArc;
    use tenor_curves::curves::ZeroRateCurve;
    use tenor_curves::multicurve::DiscountingMulticurve;

    fn params() -> HullWhiteParameters {
        HullWhiteParameters::new(0.01, vec![0.011, 0.012, 0.014], vec![1.0, 3.0]).unwrap()
    }

    #[test]
    fn test_piecewise_volatility_lookup() {
        let p = params();
        assert_relative_eq!(p.volatility_at(0.5), 0.011);
        assert_relative_eq!(p.volatility_at(1.0), 0.012);
        assert_relative_eq!(p.volatility_at(2.9), 0.012);
        assert_relative_eq!(p.volatility_at(10.0), 0.014);
    }

    #[test]
    fn test_validation() {
        assert!(HullWhiteParameters::new(0.0, vec![0.01], vec![]).is_err());
        assert!(HullWhiteParameters::new(0.01, vec![0.01, 0.02], vec![]).is_err());
        assert!(HullWhiteParameters::new(0.01, vec![0.01, -0.02], vec![1.0]).is_err());
        assert!(HullWhiteParameters::new(0.01, vec![0.01, 0.02, 0.03], vec![2.0, 1.0]).is_err());
        assert!(HullWhiteParameters::constant(0.01, 0.012).is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let p = params();
        let json = serde_json::to_string(&p).unwrap();
        let back: HullWhiteParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_provider_pairs_curves_and_parameters() {
        let mut market = DiscountingMulticurve::new();
        market
            .set_discounting_curve(
                Currency::Eur,
                StdArc::new(ZeroRateCurve::flat("EUR-DSC", 0.025).unwrap()),
            )
            .unwrap();
        let provider = HullWhiteProvider::new(market, Arc::new(params()), Currency::Eur);

        assert_eq!(provider.currency(), Currency::Eur);
        assert_relative_eq!(provider.parameters().mean_reversion(), 0.01);
        assert!(provider.all_curve_names().contains("EUR-DSC"));

        let copy = provider.copy();
        assert_eq!(copy.parameters(), provider.parameters());
    }
}
