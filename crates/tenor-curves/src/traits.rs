//! The yield curve capability consumed by the provider layer.
//!
//! Providers never look inside a curve: they only need discount factors,
//! the curve's parameter count, and the gradient of the zero rate with
//! respect to those parameters. Interpolation internals stay behind this
//! trait.

use nalgebra::DVector;

/// The core capability of a yield curve.
///
/// A curve maps a time in years (ACT/365F year fraction from the valuation
/// date) to a discount factor, and exposes enough of its parameterization
/// for providers to project point sensitivities onto curve parameters.
///
/// # Contract
///
/// - `discount_factor(0.0) == 1.0`
/// - `parameter_sensitivity(t).len() == parameter_count()` for all `t`
/// - `underlying_curve_names()` is empty for leaf curves and lists the
///   wrapped curve(s) for composite/spread curves
pub trait YieldCurve: Send + Sync {
    /// Returns the curve name, unique within a provider.
    fn name(&self) -> &str;

    /// Returns the discount factor at time `t` (years).
    fn discount_factor(&self, t: f64) -> f64;

    /// Returns the number of parameters (nodes) of the curve.
    fn parameter_count(&self) -> usize;

    /// Returns the gradient of the continuously-compounded zero rate at
    /// time `t` with respect to each curve parameter.
    fn parameter_sensitivity(&self, t: f64) -> DVector<f64>;

    /// Returns the names of the curves this curve wraps, if any.
    fn underlying_curve_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns the compounding frequency per year when the curve stores
    /// periodically-compounded zero rates, `None` for continuous ones.
    fn periodic_compounding(&self) -> Option<u32> {
        None
    }

    /// Returns the continuously-compounded zero rate at time `t`.
    ///
    /// Derived from the discount factor; the rate at `t == 0` is taken as
    /// the limit from the right at a one-day horizon.
    fn zero_rate(&self, t: f64) -> f64 {
        if t.abs() < 1e-10 {
            let dt = 1.0 / 365.0;
            return -self.discount_factor(dt).ln() / dt;
        }
        -self.discount_factor(t).ln() / t
    }
}
