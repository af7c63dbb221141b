//! Interpolated zero-rate curve.

use chrono::NaiveDate;
use nalgebra::DVector;

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};
use crate::traits::YieldCurve;

/// A yield curve defined by zero rates at node times, linearly interpolated.
///
/// The node rates are the curve's parameters; the sensitivity of the zero
/// rate at any time to those parameters is the vector of interpolation
/// weights (scaled by the convention derivative for periodic curves).
/// Extrapolation is flat on both sides.
///
/// # Example
///
/// ```rust
/// use tenor_curves::curves::ZeroRateCurve;
/// use tenor_curves::traits::YieldCurve;
///
/// let curve = ZeroRateCurve::new(
///     "USD-DSC",
///     vec![0.25, 1.0, 5.0],
///     vec![0.020, 0.022, 0.025],
/// )
/// .unwrap();
///
/// let df = curve.discount_factor(1.0);
/// assert!((df - (-0.022_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroRateCurve {
    name: String,
    times: Vec<f64>,
    rates: Vec<f64>,
    compounding: Compounding,
    reference_date: Option<NaiveDate>,
}

impl ZeroRateCurve {
    /// Creates a continuously-compounded zero-rate curve.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `times` and `rates` have different lengths
    /// - no nodes are provided
    /// - times are negative or not strictly increasing
    /// - any value is not finite
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        rates: Vec<f64>,
    ) -> CurveResult<Self> {
        Self::with_compounding(name, times, rates, Compounding::Continuous)
    }

    /// Creates a zero-rate curve with an explicit compounding convention.
    pub fn with_compounding(
        name: impl Into<String>,
        times: Vec<f64>,
        rates: Vec<f64>,
        compounding: Compounding,
    ) -> CurveResult<Self> {
        if times.len() != rates.len() {
            return Err(CurveError::invalid_argument(format!(
                "times ({}) and rates ({}) must have same length",
                times.len(),
                rates.len()
            )));
        }
        if times.is_empty() {
            return Err(CurveError::invalid_argument("curve needs at least one node"));
        }
        for (i, &t) in times.iter().enumerate() {
            if !t.is_finite() || t < 0.0 {
                return Err(CurveError::invalid_argument(format!(
                    "node time {} is invalid: {}",
                    i, t
                )));
            }
            if i > 0 && t <= times[i - 1] {
                return Err(CurveError::invalid_argument(format!(
                    "node times not strictly increasing at index {}: {} >= {}",
                    i,
                    times[i - 1],
                    t
                )));
            }
        }
        if rates.iter().any(|r| !r.is_finite()) {
            return Err(CurveError::invalid_argument("non-finite node rate"));
        }

        Ok(Self {
            name: name.into(),
            times,
            rates,
            compounding,
            reference_date: None,
        })
    }

    /// Creates a single-node flat curve at `rate` (continuous compounding).
    pub fn flat(name: impl Into<String>, rate: f64) -> CurveResult<Self> {
        Self::new(name, vec![1.0], vec![rate])
    }

    /// Attaches a valuation date for date-based queries.
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Returns the valuation date if one is attached.
    #[must_use]
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the node rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the compounding convention of the stored rates.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// ACT/365F year fraction from the reference date.
    ///
    /// # Errors
    ///
    /// Fails if no reference date is attached.
    pub fn year_fraction(&self, date: NaiveDate) -> CurveResult<f64> {
        let reference = self.reference_date.ok_or_else(|| {
            CurveError::invalid_argument("curve has no reference date attached")
        })?;
        let days = (date - reference).num_days();
        Ok(days as f64 / 365.0)
    }

    /// Discount factor on a calendar date (ACT/365F from the reference date).
    pub fn discount_factor_on(&self, date: NaiveDate) -> CurveResult<f64> {
        Ok(self.discount_factor(self.year_fraction(date)?))
    }

    /// Interpolated rate at `t` in the stored convention, with the weight
    /// layout used for sensitivities: (rate, lower index, lower weight).
    fn interpolate(&self, t: f64) -> (f64, usize, f64) {
        let n = self.times.len();
        if t <= self.times[0] {
            return (self.rates[0], 0, 1.0);
        }
        if t >= self.times[n - 1] {
            return (self.rates[n - 1], n - 1, 1.0);
        }
        // binary search for the bracketing interval
        let idx = match self
            .times
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap())
        {
            Ok(i) => return (self.rates[i], i, 1.0),
            Err(i) => i - 1,
        };
        let t0 = self.times[idx];
        let t1 = self.times[idx + 1];
        let w = (t1 - t) / (t1 - t0);
        let rate = w * self.rates[idx] + (1.0 - w) * self.rates[idx + 1];
        (rate, idx, w)
    }
}

impl YieldCurve for ZeroRateCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn discount_factor(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let (rate, _, _) = self.interpolate(t);
        self.compounding.discount_factor(rate, t)
    }

    fn parameter_count(&self) -> usize {
        self.rates.len()
    }

    fn parameter_sensitivity(&self, t: f64) -> DVector<f64> {
        let mut result = DVector::zeros(self.rates.len());
        let (rate, idx, w) = self.interpolate(t.max(0.0));
        let chain = self.compounding.to_continuous_derivative(rate);
        result[idx] += w * chain;
        if w < 1.0 {
            result[idx + 1] += (1.0 - w) * chain;
        }
        result
    }

    fn periodic_compounding(&self) -> Option<u32> {
        match self.compounding {
            Compounding::Continuous => None,
            Compounding::Periodic(f) => Some(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_curve() -> ZeroRateCurve {
        ZeroRateCurve::new(
            "USD-DSC",
            vec![0.25, 0.5, 1.0, 2.0, 5.0],
            vec![0.020, 0.021, 0.022, 0.024, 0.027],
        )
        .unwrap()
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_rejects_length_mismatch() {
        let result = ZeroRateCurve::new("X", vec![1.0, 2.0], vec![0.02]);
        assert!(matches!(result, Err(CurveError::InvalidArgument { .. })));
    }

    #[test]
    fn test_rejects_non_monotonic_times() {
        let result = ZeroRateCurve::new("X", vec![1.0, 1.0], vec![0.02, 0.03]);
        assert!(result.is_err());
        let result = ZeroRateCurve::new("X", vec![2.0, 1.0], vec![0.02, 0.03]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_time() {
        let result = ZeroRateCurve::new("X", vec![-0.5, 1.0], vec![0.02, 0.03]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flat_curve() {
        let curve = ZeroRateCurve::flat("FLAT", 0.03).unwrap();
        assert_eq!(curve.parameter_count(), 1);
        assert_relative_eq!(
            curve.discount_factor(2.0),
            (-0.06_f64).exp(),
            epsilon = 1e-15
        );
    }

    // ========================================
    // Discount factors & interpolation
    // ========================================

    #[test]
    fn test_discount_factor_at_node() {
        let curve = sample_curve();
        assert_relative_eq!(
            curve.discount_factor(1.0),
            (-0.022_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_discount_factor_interpolated() {
        let curve = sample_curve();
        // midway between 1Y (2.2%) and 2Y (2.4%)
        let expected_rate = 0.023;
        assert_relative_eq!(
            curve.discount_factor(1.5),
            (-expected_rate * 1.5_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = sample_curve();
        assert_relative_eq!(
            curve.discount_factor(10.0),
            (-0.027 * 10.0_f64).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            curve.discount_factor(0.1),
            (-0.020 * 0.1_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_discount_factor_at_zero() {
        assert_relative_eq!(sample_curve().discount_factor(0.0), 1.0);
    }

    // ========================================
    // Parameter sensitivity
    // ========================================

    #[test]
    fn test_sensitivity_length_and_weights() {
        let curve = sample_curve();
        let sens = curve.parameter_sensitivity(1.5);
        assert_eq!(sens.len(), curve.parameter_count());
        // 1.5 is midway between nodes 2 (1.0) and 3 (2.0)
        assert_relative_eq!(sens[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(sens[3], 0.5, epsilon = 1e-12);
        assert_relative_eq!(sens.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sensitivity_at_node_is_unit() {
        let curve = sample_curve();
        let sens = curve.parameter_sensitivity(0.5);
        assert_relative_eq!(sens[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(sens.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sensitivity_matches_finite_difference() {
        let curve = sample_curve();
        let t = 1.7;
        let h = 1e-7;
        let sens = curve.parameter_sensitivity(t);
        for i in 0..curve.parameter_count() {
            let mut up = curve.rates().to_vec();
            let mut dn = curve.rates().to_vec();
            up[i] += h;
            dn[i] -= h;
            let curve_up =
                ZeroRateCurve::new("X", curve.times().to_vec(), up).unwrap();
            let curve_dn =
                ZeroRateCurve::new("X", curve.times().to_vec(), dn).unwrap();
            let fd = (curve_up.zero_rate(t) - curve_dn.zero_rate(t)) / (2.0 * h);
            assert_relative_eq!(sens[i], fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_periodic_sensitivity_chain_rule() {
        let curve = ZeroRateCurve::with_compounding(
            "GOVT",
            vec![1.0, 5.0],
            vec![0.03, 0.04],
            Compounding::Periodic(1),
        )
        .unwrap();
        let t = 3.0;
        let h = 1e-7;
        let sens = curve.parameter_sensitivity(t);
        for i in 0..2 {
            let mut up = curve.rates().to_vec();
            let mut dn = curve.rates().to_vec();
            up[i] += h;
            dn[i] -= h;
            let cu = ZeroRateCurve::with_compounding(
                "GOVT",
                curve.times().to_vec(),
                up,
                Compounding::Periodic(1),
            )
            .unwrap();
            let cd = ZeroRateCurve::with_compounding(
                "GOVT",
                curve.times().to_vec(),
                dn,
                Compounding::Periodic(1),
            )
            .unwrap();
            let fd = (cu.zero_rate(t) - cd.zero_rate(t)) / (2.0 * h);
            assert_relative_eq!(sens[i], fd, epsilon = 1e-6);
        }
    }

    // ========================================
    // Date conveniences
    // ========================================

    #[test]
    fn test_date_queries() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let curve = sample_curve().with_reference_date(reference);
        let one_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let t = curve.year_fraction(one_year).unwrap();
        assert_relative_eq!(t, 365.0 / 365.0, epsilon = 1e-12);
        let df = curve.discount_factor_on(one_year).unwrap();
        assert_relative_eq!(df, curve.discount_factor(1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_date_query_without_reference_fails() {
        let curve = sample_curve();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(curve.discount_factor_on(date).is_err());
    }

    #[test]
    fn test_periodic_compounding_reported() {
        let continuous = sample_curve();
        assert_eq!(continuous.periodic_compounding(), None);

        let periodic = ZeroRateCurve::with_compounding(
            "GOVT",
            vec![1.0],
            vec![0.03],
            Compounding::Periodic(2),
        )
        .unwrap();
        assert_eq!(periodic.periodic_compounding(), Some(2));
    }
}
