//! Composite curve adding a constant periodic spread to a base curve.

use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{CurveError, CurveResult};
use crate::traits::YieldCurve;

/// A base curve plus a constant periodically-compounded rate spread.
///
/// The discount factor is the product of the base discount factor and the
/// spread's own discount factor:
///
/// `DF(t) = DF_base(t) * (1 + s/f)^(-f t)`
///
/// A negative spread divides out a positive one, so the sign of `s` picks
/// addition or subtraction of the spread. The spread is a fixed constant,
/// not a curve parameter: parameter count and sensitivities delegate to the
/// base curve unchanged.
#[derive(Clone)]
pub struct SpreadZeroCurve {
    name: String,
    base: Arc<dyn YieldCurve>,
    spread: f64,
    frequency: u32,
}

impl std::fmt::Debug for SpreadZeroCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadZeroCurve")
            .field("name", &self.name)
            .field("base", &self.base.name())
            .field("spread", &self.spread)
            .field("frequency", &self.frequency)
            .finish()
    }
}

impl SpreadZeroCurve {
    /// Creates a spread curve over `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base` is itself a composite curve (double-wrapping)
    /// - `frequency` is zero
    /// - `1 + spread/frequency` is not positive
    pub fn new(
        name: impl Into<String>,
        base: Arc<dyn YieldCurve>,
        spread: f64,
        frequency: u32,
    ) -> CurveResult<Self> {
        if !base.underlying_curve_names().is_empty() {
            return Err(CurveError::invalid_argument(format!(
                "curve {} is already a composite curve",
                base.name()
            )));
        }
        if frequency == 0 {
            return Err(CurveError::invalid_argument(
                "spread compounding frequency must be positive",
            ));
        }
        if 1.0 + spread / f64::from(frequency) <= 0.0 {
            return Err(CurveError::invalid_argument(format!(
                "spread {} too negative for frequency {}",
                spread, frequency
            )));
        }
        Ok(Self {
            name: name.into(),
            base,
            spread,
            frequency,
        })
    }

    /// Returns the constant spread.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Returns the spread compounding frequency.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

impl YieldCurve for SpreadZeroCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn discount_factor(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.base.discount_factor(t);
        }
        let f = f64::from(self.frequency);
        self.base.discount_factor(t) * (1.0 + self.spread / f).powf(-f * t)
    }

    fn parameter_count(&self) -> usize {
        self.base.parameter_count()
    }

    fn parameter_sensitivity(&self, t: f64) -> DVector<f64> {
        self.base.parameter_sensitivity(t)
    }

    fn underlying_curve_names(&self) -> Vec<String> {
        vec![self.base.name().to_string()]
    }

    fn periodic_compounding(&self) -> Option<u32> {
        self.base.periodic_compounding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounding::Compounding;
    use crate::curves::ZeroRateCurve;
    use approx::assert_relative_eq;

    fn base() -> Arc<dyn YieldCurve> {
        Arc::new(
            ZeroRateCurve::with_compounding(
                "GOVT-EUR",
                vec![1.0, 5.0],
                vec![0.03, 0.035],
                Compounding::Periodic(1),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_spread_discount_factor() {
        let curve = SpreadZeroCurve::new("GOVT-EUR+50", base(), 0.005, 1).unwrap();
        let t = 2.0;
        let expected = base().discount_factor(t) * 1.005_f64.powf(-2.0);
        assert_relative_eq!(curve.discount_factor(t), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_negative_spread_raises_discount_factor() {
        let curve = SpreadZeroCurve::new("GOVT-EUR-50", base(), -0.005, 1).unwrap();
        assert!(curve.discount_factor(2.0) > base().discount_factor(2.0));
    }

    #[test]
    fn test_zero_spread_is_identity() {
        let curve = SpreadZeroCurve::new("GOVT-EUR+0", base(), 0.0, 4).unwrap();
        for t in [0.5, 1.0, 3.0, 10.0] {
            assert_relative_eq!(
                curve.discount_factor(t),
                base().discount_factor(t),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_rejects_double_wrapping() {
        let once = Arc::new(SpreadZeroCurve::new("GOVT+S", base(), 0.01, 1).unwrap());
        let twice = SpreadZeroCurve::new("GOVT+S+S", once, 0.01, 1);
        assert!(matches!(twice, Err(CurveError::InvalidArgument { .. })));
    }

    #[test]
    fn test_rejects_degenerate_spread() {
        assert!(SpreadZeroCurve::new("X", base(), -1.5, 1).is_err());
        assert!(SpreadZeroCurve::new("X", base(), 0.01, 0).is_err());
    }

    #[test]
    fn test_sensitivity_delegates_to_base() {
        let curve = SpreadZeroCurve::new("GOVT+S", base(), 0.01, 1).unwrap();
        assert_eq!(curve.parameter_count(), 2);
        let sens = curve.parameter_sensitivity(3.0);
        let base_sens = base().parameter_sensitivity(3.0);
        assert_relative_eq!((sens - base_sens).norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_underlying_names() {
        let curve = SpreadZeroCurve::new("GOVT+S", base(), 0.01, 1).unwrap();
        assert_eq!(curve.underlying_curve_names(), vec!["GOVT-EUR".to_string()]);
    }
}
