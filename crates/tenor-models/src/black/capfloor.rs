//! Black volatility for caps and floors.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::IborIndex;
use tenor_curves::error::CurveResult;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};
use crate::surface::Surface;

/// Black volatility provider for caps/floors on an Ibor index.
///
/// The surface is `(expiry, strike)` with strikes quoted as rates; strikes
/// must be positive under the lognormal convention.
pub struct BlackCapFloorProvider<P> {
    curves: P,
    surface: Arc<dyn Surface>,
    index: IborIndex,
}

impl<P: MulticurveProvider> BlackCapFloorProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(curves: P, surface: Arc<dyn Surface>, index: IborIndex) -> Self {
        Self {
            curves,
            surface,
            index,
        }
    }

    /// Returns the Black volatility at `(expiry, strike)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrike` for non-positive strikes.
    pub fn volatility(&self, expiry: f64, strike: f64) -> VolResult<f64> {
        if strike <= 0.0 {
            return Err(VolError::invalid_strike(strike));
        }
        Ok(self.surface.z_value(expiry, strike))
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &P {
        &self.curves
    }

    /// Returns the index the caplet volatilities are quoted on.
    #[must_use]
    pub fn index(&self) -> &IborIndex {
        &self.index
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

impl<P: MulticurveProvider + Clone> BlackCapFloorProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable surface.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            curves: self.curves.clone(),
            surface: Arc::clone(&self.surface),
            index: self.index.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GridSurface;
    use approx::assert_relative_eq;
    use std::sync::Arc as StdArc;
    use tenor_core::Currency;
    use tenor_curves::curves::ZeroRateCurve;
    use tenor_curves::multicurve::DiscountingMulticurve;

    fn provider() -> BlackCapFloorProvider<DiscountingMulticurve> {
        let mut market = DiscountingMulticurve::new();
        market
            .set_ibor_curve(
                IborIndex::euribor_3m(),
                StdArc::new(ZeroRateCurve::flat("EUR-3M", 0.025).unwrap()),
            )
            .unwrap();
        let surface = Arc::new(
            GridSurface::new(
                vec![1.0, 5.0],
                vec![0.01, 0.03, 0.05],
                vec![vec![0.45, 0.40, 0.43], vec![0.38, 0.34, 0.36]],
            )
            .unwrap(),
        );
        BlackCapFloorProvider::new(market, surface, IborIndex::euribor_3m())
    }

    #[test]
    fn test_expiry_strike_lookup() {
        let provider = provider();
        assert_relative_eq!(provider.volatility(1.0, 0.03).unwrap(), 0.40, epsilon = 1e-15);
        assert_relative_eq!(provider.volatility(5.0, 0.01).unwrap(), 0.38, epsilon = 1e-15);
    }

    #[test]
    fn test_non_positive_strike_rejected() {
        let provider = provider();
        assert!(matches!(
            provider.volatility(1.0, 0.0),
            Err(VolError::InvalidStrike { .. })
        ));
        assert!(matches!(
            provider.volatility(1.0, -0.01),
            Err(VolError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_delegation() {
        let provider = provider();
        assert!(provider.all_curve_names().contains("EUR-3M"));
        assert_eq!(provider.index(), &IborIndex::euribor_3m());
    }
}
