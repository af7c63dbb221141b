//! Issuer (credit) curve provider.
//!
//! An issuer provider wraps a multicurve market and adds discounting
//! curves keyed by `(LegalEntityKey, LegalEntityFilter)` pairs. Resolution
//! is predicate-keyed: each stored filter is applied to the queried entity
//! and the first entry whose projection equals the stored key wins. Cost is
//! linear in the number of registered issuers; entries are kept in
//! insertion order so resolution is deterministic.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::{LegalEntity, LegalEntityFilter, LegalEntityKey};

use crate::error::{CurveError, CurveResult};
use crate::multicurve::provider::{DiscountingMulticurve, MulticurveProvider};
use crate::multicurve::sensitivity::{ForwardSensitivity, PointSensitivity};
use crate::traits::YieldCurve;

/// Read-side contract of an issuer-curve market.
///
/// Everything the embedded multicurve answers stays available through
/// [`multicurve`](IssuerProvider::multicurve); this trait adds the
/// issuer-keyed lookups and name resolution across the union of both curve
/// sets.
pub trait IssuerProvider: Send + Sync {
    /// Returns the embedded multicurve market.
    fn multicurve(&self) -> &dyn MulticurveProvider;

    /// Returns the discounting curve for a legal entity.
    fn issuer_curve(&self, entity: &LegalEntity) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns all curve names (issuer curves and multicurve), sorted.
    fn all_curve_names(&self) -> BTreeSet<String>;

    /// Returns a curve by name, searching issuer curves first and falling
    /// back to the embedded multicurve.
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns an independently-mutable copy of the underlying market.
    ///
    /// Decorating providers refuse with [`CurveError::Unsupported`].
    fn try_copy(&self) -> CurveResult<DiscountingIssuerProvider>;

    /// Returns the discount factor for a legal entity at `time`.
    fn issuer_discount_factor(&self, entity: &LegalEntity, time: f64) -> CurveResult<f64> {
        Ok(self.issuer_curve(entity)?.discount_factor(time))
    }

    /// Returns the name of the curve discounting a legal entity.
    fn issuer_curve_name(&self, entity: &LegalEntity) -> CurveResult<String> {
        Ok(self.issuer_curve(entity)?.name().to_string())
    }

    /// Returns the number of parameters of the named curve.
    fn parameter_count(&self, name: &str) -> CurveResult<usize> {
        Ok(self.curve_by_name(name)?.parameter_count())
    }

    /// Projects zero-rate point sensitivities onto the named curve's
    /// parameters; resolves issuer curves first, then the multicurve.
    fn parameter_sensitivity(
        &self,
        name: &str,
        sensitivities: &[PointSensitivity],
    ) -> CurveResult<DVector<f64>> {
        let curve = self.curve_by_name(name)?;
        let mut result = DVector::zeros(curve.parameter_count());
        for point in sensitivities {
            result += curve.parameter_sensitivity(point.time) * point.value;
        }
        Ok(result)
    }

    /// Projects forward-rate sensitivities onto the named curve's
    /// parameters through the discount-factor chain rule.
    fn parameter_forward_sensitivity(
        &self,
        name: &str,
        sensitivities: &[ForwardSensitivity],
    ) -> CurveResult<DVector<f64>> {
        let curve = self.curve_by_name(name)?;
        let mut result = DVector::zeros(curve.parameter_count());
        for forward in sensitivities {
            let df_start = curve.discount_factor(forward.start_time);
            let df_end = curve.discount_factor(forward.end_time);
            let d_start = forward.derivative_to_yield_start(df_start, df_end);
            let d_end = forward.derivative_to_yield_end(df_start, df_end);
            result += curve.parameter_sensitivity(forward.start_time) * (d_start * forward.value);
            result += curve.parameter_sensitivity(forward.end_time) * (d_end * forward.value);
        }
        Ok(result)
    }
}

/// A mutable issuer-curve market: a [`DiscountingMulticurve`] plus ordered
/// issuer entries.
///
/// Curve names must stay unique across the union of issuer curves and
/// multicurve curves; issuer mutators enforce this. `clone()` has the same
/// copy semantics as the multicurve: fresh containers, shared curve
/// objects.
#[derive(Clone, Default)]
pub struct DiscountingIssuerProvider {
    multicurve: DiscountingMulticurve,
    issuer_curves: Vec<(LegalEntityKey, LegalEntityFilter, Arc<dyn YieldCurve>)>,
}

impl std::fmt::Debug for DiscountingIssuerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountingIssuerProvider")
            .field("curves", &self.all_curve_names())
            .field("issuers", &self.issuer_curves.len())
            .finish()
    }
}

impl DiscountingIssuerProvider {
    /// Creates an issuer provider over an existing multicurve market.
    #[must_use]
    pub fn new(multicurve: DiscountingMulticurve) -> Self {
        Self {
            multicurve,
            issuer_curves: Vec::new(),
        }
    }

    /// Returns the embedded multicurve market for structural mutation.
    ///
    /// Name uniqueness against the issuer curves is enforced by the issuer
    /// mutators; when adding curves here afterwards, keep names distinct
    /// from the registered issuer curves.
    pub fn multicurve_mut(&mut self) -> &mut DiscountingMulticurve {
        &mut self.multicurve
    }

    /// Consumes the provider, returning the embedded multicurve market.
    #[must_use]
    pub fn into_multicurve(self) -> DiscountingMulticurve {
        self.multicurve
    }

    /// Returns the registered issuer entries in insertion order.
    #[must_use]
    pub fn issuer_entries(
        &self,
    ) -> &[(LegalEntityKey, LegalEntityFilter, Arc<dyn YieldCurve>)] {
        &self.issuer_curves
    }

    fn position(&self, key: &LegalEntityKey, filter: LegalEntityFilter) -> Option<usize> {
        self.issuer_curves
            .iter()
            .position(|(k, f, _)| k == key && *f == filter)
    }

    fn check_name_free(&self, curve: &Arc<dyn YieldCurve>) -> CurveResult<()> {
        let name = curve.name();
        let clash_issuer = self
            .issuer_curves
            .iter()
            .any(|(_, _, c)| c.name() == name && !Arc::ptr_eq(c, curve));
        let clash_multicurve = match self.multicurve.curve_by_name(name) {
            Ok(existing) => !Arc::ptr_eq(&existing, curve),
            Err(_) => false,
        };
        if clash_issuer || clash_multicurve {
            return Err(CurveError::duplicate_name(name));
        }
        Ok(())
    }

    /// Registers an issuer curve under a `(key, filter)` pair.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateKey` if the pair is already registered, or with
    /// `DuplicateName` if the curve's name collides with a different
    /// registered curve.
    pub fn set_issuer_curve(
        &mut self,
        key: LegalEntityKey,
        filter: LegalEntityFilter,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if self.position(&key, filter).is_some() {
            return Err(CurveError::duplicate_key(key.to_string()));
        }
        self.check_name_free(&curve)?;
        self.issuer_curves.push((key, filter, curve));
        Ok(())
    }

    /// Replaces the curve registered under an existing `(key, filter)` pair.
    ///
    /// # Errors
    ///
    /// Fails with `MissingKey` if the pair was never registered.
    pub fn replace_issuer_curve(
        &mut self,
        key: &LegalEntityKey,
        filter: LegalEntityFilter,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        let Some(idx) = self.position(key, filter) else {
            return Err(CurveError::missing_key(key.to_string()));
        };
        let previous = std::mem::replace(&mut self.issuer_curves[idx].2, curve);
        let candidate = Arc::clone(&self.issuer_curves[idx].2);
        if let Err(e) = self.check_name_free(&candidate) {
            self.issuer_curves[idx].2 = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Removes the curve registered under a `(key, filter)` pair.
    pub fn remove_issuer_curve(
        &mut self,
        key: &LegalEntityKey,
        filter: LegalEntityFilter,
    ) -> CurveResult<()> {
        let Some(idx) = self.position(key, filter) else {
            return Err(CurveError::missing_key(key.to_string()));
        };
        self.issuer_curves.remove(idx);
        Ok(())
    }
}

impl IssuerProvider for DiscountingIssuerProvider {
    fn multicurve(&self) -> &dyn MulticurveProvider {
        &self.multicurve
    }

    fn issuer_curve(&self, entity: &LegalEntity) -> CurveResult<Arc<dyn YieldCurve>> {
        for (key, filter, curve) in &self.issuer_curves {
            if filter.apply(entity) == *key {
                return Ok(Arc::clone(curve));
            }
        }
        Err(CurveError::issuer_not_found(entity.to_string()))
    }

    fn all_curve_names(&self) -> BTreeSet<String> {
        let mut names = self.multicurve.all_curve_names();
        names.extend(
            self.issuer_curves
                .iter()
                .map(|(_, _, c)| c.name().to_string()),
        );
        names
    }

    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        if let Some((_, _, curve)) = self
            .issuer_curves
            .iter()
            .find(|(_, _, c)| c.name() == name)
        {
            return Ok(Arc::clone(curve));
        }
        self.multicurve.curve_by_name(name)
    }

    fn try_copy(&self) -> CurveResult<DiscountingIssuerProvider> {
        Ok(self.clone())
    }
}
