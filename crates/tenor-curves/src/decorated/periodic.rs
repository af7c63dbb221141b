//! Periodic-spread decorator on one issuer.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::LegalEntity;

use crate::curves::SpreadZeroCurve;
use crate::error::{CurveError, CurveResult};
use crate::issuer::provider::{DiscountingIssuerProvider, IssuerProvider};
use crate::multicurve::provider::MulticurveProvider;
use crate::multicurve::sensitivity::{ForwardSensitivity, PointSensitivity};
use crate::traits::YieldCurve;

/// Substitutes one issuer's curve with the same curve plus a constant
/// periodically-compounded spread.
///
/// The spread compounds at the underlying curve's own frequency, so the
/// target curve must carry periodically-compounded zero rates; wrapping a
/// continuous curve, or wrapping a curve that is already composite, fails
/// at construction. The sign of the spread picks addition or subtraction.
pub struct PeriodicSpreadDecoratedIssuer<'a> {
    base: &'a dyn IssuerProvider,
    entity: LegalEntity,
    spread_curve: Arc<dyn YieldCurve>,
}

impl<'a> PeriodicSpreadDecoratedIssuer<'a> {
    /// Creates the decorator, wrapping the target issuer's curve.
    ///
    /// # Errors
    ///
    /// Fails if the entity has no curve on `base`, if that curve is not
    /// periodically compounded, or if it is already a composite curve.
    pub fn new(
        base: &'a dyn IssuerProvider,
        entity: LegalEntity,
        spread: f64,
    ) -> CurveResult<Self> {
        let target = base.issuer_curve(&entity)?;
        let Some(frequency) = target.periodic_compounding() else {
            return Err(CurveError::invalid_argument(format!(
                "issuer curve {} must carry periodically-compounded rates",
                target.name()
            )));
        };
        let name = if spread >= 0.0 {
            format!("{}+{:.0}bp", target.name(), spread * 1e4)
        } else {
            format!("{}{:.0}bp", target.name(), spread * 1e4)
        };
        let spread_curve = SpreadZeroCurve::new(name, target, spread, frequency)?;
        Ok(Self {
            base,
            entity,
            spread_curve: Arc::new(spread_curve),
        })
    }

    /// Returns the decorated entity.
    #[must_use]
    pub fn entity(&self) -> &LegalEntity {
        &self.entity
    }
}

impl IssuerProvider for PeriodicSpreadDecoratedIssuer<'_> {
    fn multicurve(&self) -> &dyn MulticurveProvider {
        self.base.multicurve()
    }

    fn issuer_curve(&self, entity: &LegalEntity) -> CurveResult<Arc<dyn YieldCurve>> {
        if *entity == self.entity {
            return Ok(Arc::clone(&self.spread_curve));
        }
        self.base.issuer_curve(entity)
    }

    fn all_curve_names(&self) -> BTreeSet<String> {
        let mut names = self.base.all_curve_names();
        names.insert(self.spread_curve.name().to_string());
        names
    }

    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        if name == self.spread_curve.name() {
            return Ok(Arc::clone(&self.spread_curve));
        }
        self.base.curve_by_name(name)
    }

    fn parameter_sensitivity(
        &self,
        _name: &str,
        _sensitivities: &[PointSensitivity],
    ) -> CurveResult<DVector<f64>> {
        Err(CurveError::unsupported(
            "parameter sensitivity on spread-decorated provider",
        ))
    }

    fn parameter_forward_sensitivity(
        &self,
        _name: &str,
        _sensitivities: &[ForwardSensitivity],
    ) -> CurveResult<DVector<f64>> {
        Err(CurveError::unsupported(
            "parameter forward sensitivity on spread-decorated provider",
        ))
    }

    fn try_copy(&self) -> CurveResult<DiscountingIssuerProvider> {
        Err(CurveError::unsupported("copy on decorated provider"))
    }
}
