//! Continuous-spread decorator on one issuer.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::LegalEntity;

use crate::error::{CurveError, CurveResult};
use crate::issuer::provider::{DiscountingIssuerProvider, IssuerProvider};
use crate::multicurve::provider::MulticurveProvider;
use crate::multicurve::sensitivity::{ForwardSensitivity, PointSensitivity};
use crate::traits::YieldCurve;

/// Shifts one issuer's discount factors by a continuously-compounded
/// spread, leaving every other query untouched.
///
/// For the decorated entity, `DF(t) = DF_base(t) · exp(-t · spread)`. The
/// shift lives outside the base curve's parameterization, so parameter
/// sensitivities are refused rather than silently mis-attributed: risk
/// must be run against the undecorated base.
pub struct SpreadDecoratedIssuer<'a> {
    base: &'a dyn IssuerProvider,
    entity: LegalEntity,
    spread: f64,
}

impl<'a> SpreadDecoratedIssuer<'a> {
    /// Creates a spread decorator over `base` for one entity.
    #[must_use]
    pub fn new(base: &'a dyn IssuerProvider, entity: LegalEntity, spread: f64) -> Self {
        Self {
            base,
            entity,
            spread,
        }
    }

    /// Returns the decorated entity.
    #[must_use]
    pub fn entity(&self) -> &LegalEntity {
        &self.entity
    }

    /// Returns the spread.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }
}

impl IssuerProvider for SpreadDecoratedIssuer<'_> {
    fn multicurve(&self) -> &dyn MulticurveProvider {
        self.base.multicurve()
    }

    /// Returns the *undecorated* curve backing the entity; the spread is
    /// applied to discount factors only.
    fn issuer_curve(&self, entity: &LegalEntity) -> CurveResult<Arc<dyn YieldCurve>> {
        self.base.issuer_curve(entity)
    }

    fn issuer_discount_factor(&self, entity: &LegalEntity, time: f64) -> CurveResult<f64> {
        let base_df = self.base.issuer_discount_factor(entity, time)?;
        if *entity == self.entity {
            return Ok(base_df * (-time * self.spread).exp());
        }
        Ok(base_df)
    }

    fn all_curve_names(&self) -> BTreeSet<String> {
        self.base.all_curve_names()
    }

    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
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
