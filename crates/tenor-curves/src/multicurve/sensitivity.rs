//! Point sensitivities routed into curve-parameter space.
//!
//! Pricing code produces sensitivities either to the zero rate at a time
//! ([`PointSensitivity`]) or to a forward rate over a period
//! ([`ForwardSensitivity`]). Providers project both onto the parameters of
//! the curve that produced the quantity; the forward case needs the
//! analytic derivatives of the forward rate with respect to the zero
//! yields at its two endpoints, supplied here.

use serde::{Deserialize, Serialize};

/// Sensitivity to the continuously-compounded zero rate at one time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSensitivity {
    /// Time of the sensitivity in years.
    pub time: f64,
    /// Sensitivity amount (dPV/dRate).
    pub value: f64,
}

impl PointSensitivity {
    /// Creates a new point sensitivity.
    #[must_use]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Compounding convention of the forward rate a sensitivity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardRateCompounding {
    /// Simply compounded: `F = (DFs/DFe - 1)/a`.
    Simple,
    /// Annually compounded: `F = (DFs/DFe)^(1/a) - 1`.
    Annual,
}

/// Sensitivity to a forward rate observed over one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardSensitivity {
    /// Period start time in years.
    pub start_time: f64,
    /// Period end time in years.
    pub end_time: f64,
    /// Accrual factor of the period.
    pub accrual_factor: f64,
    /// Sensitivity amount (dPV/dForward).
    pub value: f64,
    /// Compounding convention of the forward rate.
    pub compounding: ForwardRateCompounding,
}

impl ForwardSensitivity {
    /// Creates a simply-compounded forward sensitivity.
    #[must_use]
    pub fn simple(start_time: f64, end_time: f64, accrual_factor: f64, value: f64) -> Self {
        Self {
            start_time,
            end_time,
            accrual_factor,
            value,
            compounding: ForwardRateCompounding::Simple,
        }
    }

    /// Creates an annually-compounded forward sensitivity.
    #[must_use]
    pub fn annual(start_time: f64, end_time: f64, accrual_factor: f64, value: f64) -> Self {
        Self {
            start_time,
            end_time,
            accrual_factor,
            value,
            compounding: ForwardRateCompounding::Annual,
        }
    }

    /// Derivative of the forward rate with respect to the zero yield at the
    /// period start, given the discount factors at both endpoints.
    #[must_use]
    pub fn derivative_to_yield_start(&self, df_start: f64, df_end: f64) -> f64 {
        match self.compounding {
            ForwardRateCompounding::Simple => {
                -self.start_time * df_start / (df_end * self.accrual_factor)
            }
            ForwardRateCompounding::Annual => {
                -self.start_time / self.accrual_factor
                    * (df_start / df_end).powf(1.0 / self.accrual_factor)
            }
        }
    }

    /// Derivative of the forward rate with respect to the zero yield at the
    /// period end.
    #[must_use]
    pub fn derivative_to_yield_end(&self, df_start: f64, df_end: f64) -> f64 {
        match self.compounding {
            ForwardRateCompounding::Simple => {
                self.end_time * df_start / (df_end * self.accrual_factor)
            }
            ForwardRateCompounding::Annual => {
                self.end_time / self.accrual_factor
                    * (df_start / df_end).powf(1.0 / self.accrual_factor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn forward_simple(ys: f64, ye: f64, s: f64, e: f64, a: f64) -> f64 {
        let dfs = (-ys * s).exp();
        let dfe = (-ye * e).exp();
        (dfs / dfe - 1.0) / a
    }

    fn forward_annual(ys: f64, ye: f64, s: f64, e: f64, a: f64) -> f64 {
        let dfs = (-ys * s).exp();
        let dfe = (-ye * e).exp();
        (dfs / dfe).powf(1.0 / a) - 1.0
    }

    #[test]
    fn test_simple_derivatives_match_finite_difference() {
        let (s, e, a) = (1.0, 1.25, 0.25);
        let (ys, ye) = (0.02, 0.021);
        let sens = ForwardSensitivity::simple(s, e, a, 1.0);
        let dfs = (-ys * s).exp();
        let dfe = (-ye * e).exp();

        let h = 1e-7;
        let fd_start =
            (forward_simple(ys + h, ye, s, e, a) - forward_simple(ys - h, ye, s, e, a)) / (2.0 * h);
        let fd_end =
            (forward_simple(ys, ye + h, s, e, a) - forward_simple(ys, ye - h, s, e, a)) / (2.0 * h);

        assert_relative_eq!(
            sens.derivative_to_yield_start(dfs, dfe),
            fd_start,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            sens.derivative_to_yield_end(dfs, dfe),
            fd_end,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_annual_derivatives_match_finite_difference() {
        let (s, e, a) = (2.0, 3.0, 1.0);
        let (ys, ye) = (0.03, 0.032);
        let sens = ForwardSensitivity::annual(s, e, a, 1.0);
        let dfs = (-ys * s).exp();
        let dfe = (-ye * e).exp();

        let h = 1e-7;
        let fd_start =
            (forward_annual(ys + h, ye, s, e, a) - forward_annual(ys - h, ye, s, e, a)) / (2.0 * h);
        let fd_end =
            (forward_annual(ys, ye + h, s, e, a) - forward_annual(ys, ye - h, s, e, a)) / (2.0 * h);

        assert_relative_eq!(
            sens.derivative_to_yield_start(dfs, dfe),
            fd_start,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            sens.derivative_to_yield_end(dfs, dfe),
            fd_end,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_spec_formulas() {
        let sens = ForwardSensitivity::simple(1.0, 1.5, 0.5, 1.0);
        let (dfs, dfe) = (0.98, 0.96);
        assert_relative_eq!(
            sens.derivative_to_yield_start(dfs, dfe),
            -1.0 * dfs / (dfe * 0.5),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            sens.derivative_to_yield_end(dfs, dfe),
            1.5 * dfs / (dfe * 0.5),
            epsilon = 1e-15
        );
    }
}
