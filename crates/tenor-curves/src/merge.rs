//! Stateless helpers for combining markets.

use std::sync::Arc;

use crate::error::CurveResult;
use crate::multicurve::fx::FxMatrix;
use crate::multicurve::provider::{DiscountingMulticurve, MulticurveProvider};

/// Merges several multicurve markets into one.
///
/// Keys must be disjoint across the inputs (a shared currency or index is a
/// `DuplicateKey`; a shared curve name is a `DuplicateName`) and the FX
/// matrices must be connectable and consistent.
///
/// # Errors
///
/// Fails on key or name collisions, or on inconsistent FX matrices.
pub fn merge_multicurves(
    providers: &[&DiscountingMulticurve],
) -> CurveResult<DiscountingMulticurve> {
    let mut merged = DiscountingMulticurve::with_fx(merge_fx(
        &providers.iter().map(|p| p.fx()).collect::<Vec<_>>(),
    )?);
    for provider in providers {
        for (currency, curve) in provider.discounting_curves() {
            merged.set_discounting_curve(*currency, Arc::clone(curve))?;
        }
        for (index, curve) in provider.ibor_curves() {
            merged.set_ibor_curve(index.clone(), Arc::clone(curve))?;
        }
        for (index, curve) in provider.overnight_curves() {
            merged.set_overnight_curve(index.clone(), Arc::clone(curve))?;
        }
    }
    tracing::debug!(
        curves = merged.all_curve_names().len(),
        sources = providers.len(),
        "merged multicurve providers"
    );
    Ok(merged)
}

/// Merges several FX matrices into one.
///
/// # Errors
///
/// Fails if two non-empty matrices share no currency or quote a shared
/// pair inconsistently.
pub fn merge_fx(matrices: &[&FxMatrix]) -> CurveResult<FxMatrix> {
    let mut merged = FxMatrix::new();
    for matrix in matrices {
        merged.merge(matrix)?;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::ZeroRateCurve;
    use crate::error::CurveError;
    use crate::multicurve::provider::MulticurveProvider;
    use crate::traits::YieldCurve;
    use approx::assert_relative_eq;
    use tenor_core::{Currency, IborIndex};

    fn flat(name: &str, rate: f64) -> Arc<dyn YieldCurve> {
        Arc::new(ZeroRateCurve::flat(name, rate).unwrap())
    }

    fn usd() -> DiscountingMulticurve {
        let mut fx = FxMatrix::with_base(Currency::Usd);
        fx.add_currency(Currency::Eur, Currency::Usd, 1.1).unwrap();
        let mut market = DiscountingMulticurve::with_fx(fx);
        market
            .set_discounting_curve(Currency::Usd, flat("USD-DSC", 0.02))
            .unwrap();
        market
            .set_ibor_curve(IborIndex::usd_term_3m(), flat("USD-3M", 0.021))
            .unwrap();
        market
    }

    fn eur() -> DiscountingMulticurve {
        let mut fx = FxMatrix::new();
        fx.add_currency(Currency::Eur, Currency::Usd, 1.1).unwrap();
        let mut market = DiscountingMulticurve::with_fx(fx);
        market
            .set_discounting_curve(Currency::Eur, flat("EUR-DSC", 0.025))
            .unwrap();
        market
            .set_ibor_curve(IborIndex::euribor_3m(), flat("EUR-3M", 0.026))
            .unwrap();
        market
    }

    #[test]
    fn test_merge_disjoint_markets() {
        let (a, b) = (usd(), eur());
        let merged = merge_multicurves(&[&a, &b]).unwrap();
        assert_eq!(merged.all_curve_names().len(), 4);
        assert!(merged.discount_factor(Currency::Usd, 1.0).is_ok());
        assert!(merged.discount_factor(Currency::Eur, 1.0).is_ok());
        assert_relative_eq!(
            merged.fx_rate(Currency::Eur, Currency::Usd).unwrap(),
            1.1,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_merge_key_collision_fails() {
        let a = usd();
        let b = usd();
        assert!(matches!(
            merge_multicurves(&[&a, &b]),
            Err(CurveError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_merge_name_collision_fails() {
        let a = usd();
        let mut b = DiscountingMulticurve::with_fx(FxMatrix::with_base(Currency::Usd));
        // Different key, same curve name as in `a`.
        b.set_discounting_curve(Currency::Eur, flat("USD-DSC", 0.03))
            .unwrap();
        assert!(matches!(
            merge_multicurves(&[&a, &b]),
            Err(CurveError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_merge_preserves_originals() {
        let (a, b) = (usd(), eur());
        let _ = merge_multicurves(&[&a, &b]).unwrap();
        assert_eq!(a.all_curve_names().len(), 2);
        assert_eq!(b.all_curve_names().len(), 2);
    }
}
