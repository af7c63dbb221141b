//! Currency-substitution decorator: discount one currency on an issuer
//! curve.

use std::collections::BTreeSet;
use std::sync::Arc;

use tenor_core::{Currency, IborIndex, LegalEntity, OvernightIndex};

use crate::error::{CurveError, CurveResult};
use crate::issuer::provider::IssuerProvider;
use crate::multicurve::provider::{DiscountingMulticurve, MulticurveProvider};
use crate::traits::YieldCurve;

/// Routes one currency's discounting to an issuer's curve.
///
/// Pricing bond-like cash flows against an issuer means discounting that
/// issuer's currency on its credit curve instead of the risk-free curve.
/// This decorator presents the issuer provider as a plain multicurve market
/// in which exactly one currency's discounting curve is substituted;
/// forward curves, FX and every other currency pass through unchanged.
///
/// Unlike the spread decorators, the substituted curve is a real registered
/// curve of the base provider, so parameter sensitivities remain available
/// and resolve by name against the base.
pub struct IssuerDecoratedMulticurve<'a> {
    base: &'a dyn IssuerProvider,
    currency: Currency,
    entity: LegalEntity,
}

impl<'a> IssuerDecoratedMulticurve<'a> {
    /// Creates the decorator substituting `currency`'s discounting with the
    /// curve of `entity`.
    #[must_use]
    pub fn new(base: &'a dyn IssuerProvider, currency: Currency, entity: LegalEntity) -> Self {
        Self {
            base,
            currency,
            entity,
        }
    }

    /// Returns the decorated currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the entity whose curve substitutes the discounting curve.
    #[must_use]
    pub fn entity(&self) -> &LegalEntity {
        &self.entity
    }
}

impl MulticurveProvider for IssuerDecoratedMulticurve<'_> {
    fn discounting_curve(&self, currency: Currency) -> CurveResult<Arc<dyn YieldCurve>> {
        if currency == self.currency {
            return self.base.issuer_curve(&self.entity);
        }
        self.base.multicurve().discounting_curve(currency)
    }

    fn ibor_curve(&self, index: &IborIndex) -> CurveResult<Arc<dyn YieldCurve>> {
        self.base.multicurve().ibor_curve(index)
    }

    fn overnight_curve(&self, index: &OvernightIndex) -> CurveResult<Arc<dyn YieldCurve>> {
        self.base.multicurve().overnight_curve(index)
    }

    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.base.curve_by_name(name)
    }

    fn all_curve_names(&self) -> BTreeSet<String> {
        self.base.all_curve_names()
    }

    fn fx_rate(&self, ccy1: Currency, ccy2: Currency) -> CurveResult<f64> {
        self.base.multicurve().fx_rate(ccy1, ccy2)
    }

    fn try_copy(&self) -> CurveResult<DiscountingMulticurve> {
        Err(CurveError::unsupported("copy on decorated provider"))
    }
}
