//! Displaced-diffusion LIBOR market model parameters.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};
use crate::generator::SwapGenerator;

/// Displaced-diffusion LMM parameters on a discrete forward-rate tenor
/// structure.
///
/// For `n` periods the tenor structure has `n + 1` times; each period
/// carries an accrual factor, a displacement, and a row of factor
/// volatilities (all rows share the same factor count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmmParameters {
    ibor_time: Vec<f64>,
    accrual_factor: Vec<f64>,
    displacement: Vec<f64>,
    volatility: Vec<Vec<f64>>,
    time_tolerance: f64,
}

impl LmmParameters {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Requires a strictly increasing tenor structure of `n + 1` times with
    /// per-period vectors of length `n`, positive accrual factors,
    /// non-negative displacements, a common factor count across volatility
    /// rows, and a positive time tolerance.
    pub fn new(
        ibor_time: Vec<f64>,
        accrual_factor: Vec<f64>,
        displacement: Vec<f64>,
        volatility: Vec<Vec<f64>>,
        time_tolerance: f64,
    ) -> VolResult<Self> {
        if ibor_time.len() < 2 {
            return Err(VolError::invalid_parameter(
                "ibor_time",
                ibor_time.len() as f64,
            ));
        }
        for (i, &t) in ibor_time.iter().enumerate() {
            if !t.is_finite() || t < 0.0 || (i > 0 && t <= ibor_time[i - 1]) {
                return Err(VolError::invalid_parameter("ibor_time", t));
            }
        }
        let periods = ibor_time.len() - 1;
        if accrual_factor.len() != periods {
            return Err(VolError::invalid_parameter(
                "accrual_factor",
                accrual_factor.len() as f64,
            ));
        }
        if accrual_factor.iter().any(|&a| !a.is_finite() || a <= 0.0) {
            return Err(VolError::invalid_parameter("accrual_factor", f64::NAN));
        }
        if displacement.len() != periods {
            return Err(VolError::invalid_parameter(
                "displacement",
                displacement.len() as f64,
            ));
        }
        if displacement.iter().any(|&d| !d.is_finite() || d < 0.0) {
            return Err(VolError::invalid_parameter("displacement", f64::NAN));
        }
        if volatility.len() != periods {
            return Err(VolError::invalid_parameter(
                "volatility",
                volatility.len() as f64,
            ));
        }
        let factors = volatility.first().map_or(0, Vec::len);
        if factors == 0 {
            return Err(VolError::invalid_parameter("volatility", 0.0));
        }
        for row in &volatility {
            if row.len() != factors || row.iter().any(|v| !v.is_finite()) {
                return Err(VolError::invalid_parameter("volatility", row.len() as f64));
            }
        }
        if !time_tolerance.is_finite() || time_tolerance <= 0.0 {
            return Err(VolError::invalid_parameter("time_tolerance", time_tolerance));
        }
        Ok(Self {
            ibor_time,
            accrual_factor,
            displacement,
            volatility,
            time_tolerance,
        })
    }

    /// Returns the number of forward-rate periods.
    #[must_use]
    pub fn periods(&self) -> usize {
        self.ibor_time.len() - 1
    }

    /// Returns the number of driving factors.
    #[must_use]
    pub fn factors(&self) -> usize {
        self.volatility[0].len()
    }

    /// Returns the tenor structure times.
    #[must_use]
    pub fn ibor_time(&self) -> &[f64] {
        &self.ibor_time
    }

    /// Returns the accrual factors per period.
    #[must_use]
    pub fn accrual_factor(&self) -> &[f64] {
        &self.accrual_factor
    }

    /// Returns the displacements per period.
    #[must_use]
    pub fn displacement(&self) -> &[f64] {
        &self.displacement
    }

    /// Returns the factor volatilities of one period.
    #[must_use]
    pub fn volatility_row(&self, period: usize) -> &[f64] {
        &self.volatility[period]
    }

    /// Returns the tolerance used to match cash-flow times onto the tenor
    /// structure.
    #[must_use]
    pub fn time_tolerance(&self) -> f64 {
        self.time_tolerance
    }

    /// Returns the index of the tenor-structure time matching `t` within
    /// the tolerance.
    #[must_use]
    pub fn period_index(&self, t: f64) -> Option<usize> {
        self.ibor_time
            .iter()
            .position(|&node| (node - t).abs() <= self.time_tolerance)
    }
}

/// Pairs a multicurve market with LMM parameters for one swap family.
pub struct LmmProvider<P> {
    curves: P,
    parameters: Arc<LmmParameters>,
    generator: SwapGenerator,
}

impl<P: MulticurveProvider> LmmProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, parameters: Arc<LmmParameters>, generator: SwapGenerator) -> Self {
        Self {
            curves,
            parameters,
            generator,
        }
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> &LmmParameters {
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

impl<P: MulticurveProvider + Clone> LmmProvider<P> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LmmParameters {
        LmmParameters::new(
            vec![0.0, 0.5, 1.0, 1.5],
            vec![0.5, 0.5, 0.5],
            vec![0.1, 0.1, 0.1],
            vec![vec![0.10, 0.02], vec![0.11, 0.015], vec![0.12, 0.01]],
            1e-3,
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let p = params();
        assert_eq!(p.periods(), 3);
        assert_eq!(p.factors(), 2);
        assert_eq!(p.volatility_row(1), &[0.11, 0.015]);
    }

    #[test]
    fn test_period_index_within_tolerance() {
        let p = params();
        assert_eq!(p.period_index(0.5), Some(1));
        assert_eq!(p.period_index(0.5005), Some(1));
        assert_eq!(p.period_index(0.6), None);
    }

    #[test]
    fn test_validation() {
        // Mismatched accrual length.
        assert!(LmmParameters::new(
            vec![0.0, 0.5, 1.0],
            vec![0.5],
            vec![0.1, 0.1],
            vec![vec![0.1], vec![0.1]],
            1e-3,
        )
        .is_err());
        // Ragged volatility rows.
        assert!(LmmParameters::new(
            vec![0.0, 0.5, 1.0],
            vec![0.5, 0.5],
            vec![0.1, 0.1],
            vec![vec![0.1, 0.02], vec![0.1]],
            1e-3,
        )
        .is_err());
        // Negative displacement.
        assert!(LmmParameters::new(
            vec![0.0, 0.5, 1.0],
            vec![0.5, 0.5],
            vec![-0.1, 0.1],
            vec![vec![0.1], vec![0.1]],
            1e-3,
        )
        .is_err());
    }
}
