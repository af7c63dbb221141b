//! The multicurve provider: discounting and forward curves plus FX.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use nalgebra::DVector;
use tenor_core::{Currency, IborIndex, OvernightIndex};

use crate::error::{CurveError, CurveResult};
use crate::multicurve::fx::FxMatrix;
use crate::multicurve::sensitivity::{ForwardSensitivity, PointSensitivity};
use crate::traits::YieldCurve;

/// Read-side contract of a multicurve market.
///
/// Forward rates are computed from ratios of discount factors on the curve
/// registered for the index; all formulas are provided so that an
/// implementation only decides *which* curve answers a query. Decorating
/// providers override the curve accessors (or individual quantities) and
/// inherit the rest.
pub trait MulticurveProvider: Send + Sync {
    /// Returns the discounting curve for a currency.
    fn discounting_curve(&self, currency: Currency) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns the forward curve for an Ibor index.
    fn ibor_curve(&self, index: &IborIndex) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns the forward curve for an overnight index.
    fn overnight_curve(&self, index: &OvernightIndex) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns a curve by name.
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Returns all curve names, sorted.
    fn all_curve_names(&self) -> BTreeSet<String>;

    /// Returns the exchange rate: 1 unit of `ccy1` in units of `ccy2`.
    fn fx_rate(&self, ccy1: Currency, ccy2: Currency) -> CurveResult<f64>;

    /// Returns an independently-mutable copy of the underlying market.
    ///
    /// Decorating providers refuse with [`CurveError::Unsupported`]: a
    /// decorator is a view over a borrowed base, and duplicating the view
    /// without duplicating the base is ill-defined.
    fn try_copy(&self) -> CurveResult<DiscountingMulticurve>;

    /// Returns the discount factor for a currency at `time`.
    fn discount_factor(&self, currency: Currency, time: f64) -> CurveResult<f64> {
        Ok(self.discounting_curve(currency)?.discount_factor(time))
    }

    /// Returns the name of the discounting curve for a currency.
    fn discounting_curve_name(&self, currency: Currency) -> CurveResult<String> {
        Ok(self.discounting_curve(currency)?.name().to_string())
    }

    /// Returns the name of the forward curve for an Ibor index.
    fn ibor_curve_name(&self, index: &IborIndex) -> CurveResult<String> {
        Ok(self.ibor_curve(index)?.name().to_string())
    }

    /// Returns the name of the forward curve for an overnight index.
    fn overnight_curve_name(&self, index: &OvernightIndex) -> CurveResult<String> {
        Ok(self.overnight_curve(index)?.name().to_string())
    }

    /// Returns the investment factor `DF(start)/DF(end)` on the Ibor curve.
    fn ibor_investment_factor(
        &self,
        index: &IborIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        let curve = self.ibor_curve(index)?;
        Ok(curve.discount_factor(start_time) / curve.discount_factor(end_time))
    }

    /// Returns the simply-compounded forward rate on the Ibor curve with an
    /// explicit accrual factor: `(DF(start)/DF(end) - 1) / accrual`.
    fn ibor_forward_rate_with_accrual(
        &self,
        index: &IborIndex,
        start_time: f64,
        end_time: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        if accrual_factor == 0.0 {
            return Err(CurveError::invalid_argument(
                "accrual factor must be non-zero",
            ));
        }
        Ok((self.ibor_investment_factor(index, start_time, end_time)? - 1.0) / accrual_factor)
    }

    /// Returns the simply-compounded forward rate on the Ibor curve, with
    /// the accrual factor taken as `end_time - start_time`.
    fn ibor_forward_rate(
        &self,
        index: &IborIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        if start_time == end_time {
            return Err(CurveError::invalid_argument(
                "start time should be different from end time",
            ));
        }
        self.ibor_forward_rate_with_accrual(index, start_time, end_time, end_time - start_time)
    }

    /// Returns the annually-compounded forward rate on the Ibor curve,
    /// with the accrual factor taken as `end_time - start_time`.
    fn ibor_annually_compounded_rate(
        &self,
        index: &IborIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        if start_time == end_time {
            return Err(CurveError::invalid_argument(
                "start time should be different from end time",
            ));
        }
        self.ibor_annually_compounded_rate_with_accrual(
            index,
            start_time,
            end_time,
            end_time - start_time,
        )
    }

    /// Returns the annually-compounded forward rate on the Ibor curve:
    /// `(DF(start)/DF(end))^(1/accrual) - 1`.
    fn ibor_annually_compounded_rate_with_accrual(
        &self,
        index: &IborIndex,
        start_time: f64,
        end_time: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        if accrual_factor == 0.0 {
            return Err(CurveError::invalid_argument(
                "accrual factor must be non-zero",
            ));
        }
        Ok(self
            .ibor_investment_factor(index, start_time, end_time)?
            .powf(1.0 / accrual_factor)
            - 1.0)
    }

    /// Returns the investment factor `DF(start)/DF(end)` on the overnight
    /// curve.
    fn overnight_investment_factor(
        &self,
        index: &OvernightIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        let curve = self.overnight_curve(index)?;
        Ok(curve.discount_factor(start_time) / curve.discount_factor(end_time))
    }

    /// Returns the simply-compounded forward rate on the overnight curve.
    fn overnight_forward_rate_with_accrual(
        &self,
        index: &OvernightIndex,
        start_time: f64,
        end_time: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        if accrual_factor == 0.0 {
            return Err(CurveError::invalid_argument(
                "accrual factor must be non-zero",
            ));
        }
        Ok(
            (self.overnight_investment_factor(index, start_time, end_time)? - 1.0)
                / accrual_factor,
        )
    }

    /// Returns the simply-compounded forward rate on the overnight curve,
    /// with the accrual factor taken as `end_time - start_time`.
    fn overnight_forward_rate(
        &self,
        index: &OvernightIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        if start_time == end_time {
            return Err(CurveError::invalid_argument(
                "start time should be different from end time",
            ));
        }
        self.overnight_forward_rate_with_accrual(
            index,
            start_time,
            end_time,
            end_time - start_time,
        )
    }

    /// Returns the annually-compounded forward rate on the overnight
    /// curve, with the accrual factor taken as `end_time - start_time`.
    fn overnight_annually_compounded_rate(
        &self,
        index: &OvernightIndex,
        start_time: f64,
        end_time: f64,
    ) -> CurveResult<f64> {
        if start_time == end_time {
            return Err(CurveError::invalid_argument(
                "start time should be different from end time",
            ));
        }
        self.overnight_annually_compounded_rate_with_accrual(
            index,
            start_time,
            end_time,
            end_time - start_time,
        )
    }

    /// Returns the annually-compounded forward rate on the overnight
    /// curve: `(DF(start)/DF(end))^(1/accrual) - 1`.
    fn overnight_annually_compounded_rate_with_accrual(
        &self,
        index: &OvernightIndex,
        start_time: f64,
        end_time: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        if accrual_factor == 0.0 {
            return Err(CurveError::invalid_argument(
                "accrual factor must be non-zero",
            ));
        }
        Ok(self
            .overnight_investment_factor(index, start_time, end_time)?
            .powf(1.0 / accrual_factor)
            - 1.0)
    }

    /// Returns the number of parameters of the named curve.
    fn parameter_count(&self, name: &str) -> CurveResult<usize> {
        Ok(self.curve_by_name(name)?.parameter_count())
    }

    /// Returns the names of the curves the named curve wraps, if any.
    fn underlying_curve_names(&self, name: &str) -> CurveResult<Vec<String>> {
        Ok(self.curve_by_name(name)?.underlying_curve_names())
    }

    /// Projects zero-rate point sensitivities onto the named curve's
    /// parameters: `Σ value · ∂rate(t)/∂params`.
    ///
    /// An empty list yields a zero vector of the curve's parameter count.
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
    /// parameters through the discount-factor chain rule at both period
    /// endpoints.
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

/// A mutable multicurve market: one discounting curve per currency, one
/// forward curve per index, and an FX matrix.
///
/// A name index over all registered curves is rebuilt synchronously on
/// every structural mutation; two keys producing identically-named curves
/// is an error. Mutation is not synchronized — callers either serialize
/// structural changes or `clone()` before mutating a shared instance
/// (clones share the immutable curve objects but own their maps).
#[derive(Clone, Default)]
pub struct DiscountingMulticurve {
    discounting: HashMap<Currency, Arc<dyn YieldCurve>>,
    ibor: HashMap<IborIndex, Arc<dyn YieldCurve>>,
    overnight: HashMap<OvernightIndex, Arc<dyn YieldCurve>>,
    fx: FxMatrix,
    by_name: HashMap<String, Arc<dyn YieldCurve>>,
}

impl std::fmt::Debug for DiscountingMulticurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountingMulticurve")
            .field("curves", &self.all_curve_names())
            .field("fx", &self.fx.currencies())
            .finish()
    }
}

impl DiscountingMulticurve {
    /// Creates an empty market.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty market carrying an FX matrix.
    #[must_use]
    pub fn with_fx(fx: FxMatrix) -> Self {
        Self {
            fx,
            ..Self::default()
        }
    }

    /// Rebuilds the derived name index from the three curve maps.
    fn rebuild_names(&mut self) -> CurveResult<()> {
        let mut by_name: HashMap<String, Arc<dyn YieldCurve>> = HashMap::new();
        let all = self
            .discounting
            .values()
            .chain(self.ibor.values())
            .chain(self.overnight.values());
        for curve in all {
            let name = curve.name().to_string();
            if let Some(existing) = by_name.get(&name) {
                // Same Arc registered under several keys is fine; two
                // distinct curves under one name is not.
                if !Arc::ptr_eq(existing, curve) {
                    return Err(CurveError::duplicate_name(name));
                }
            } else {
                by_name.insert(name, Arc::clone(curve));
            }
        }
        self.by_name = by_name;
        Ok(())
    }

    /// Registers the discounting curve for a currency.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateKey` if the currency already has a curve, or
    /// with `DuplicateName` on a cross-map name collision.
    pub fn set_discounting_curve(
        &mut self,
        currency: Currency,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if self.discounting.contains_key(&currency) {
            tracing::debug!(currency = %currency, "rejecting duplicate discounting curve");
            return Err(CurveError::duplicate_key(currency.code()));
        }
        self.discounting.insert(currency, curve);
        if let Err(e) = self.rebuild_names() {
            self.discounting.remove(&currency);
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Registers the forward curve for an Ibor index.
    pub fn set_ibor_curve(
        &mut self,
        index: IborIndex,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if self.ibor.contains_key(&index) {
            tracing::debug!(index = %index, "rejecting duplicate Ibor curve");
            return Err(CurveError::duplicate_key(index.name()));
        }
        self.ibor.insert(index.clone(), curve);
        if let Err(e) = self.rebuild_names() {
            self.ibor.remove(&index);
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Registers the forward curve for an overnight index.
    pub fn set_overnight_curve(
        &mut self,
        index: OvernightIndex,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if self.overnight.contains_key(&index) {
            tracing::debug!(index = %index, "rejecting duplicate overnight curve");
            return Err(CurveError::duplicate_key(index.name()));
        }
        self.overnight.insert(index.clone(), curve);
        if let Err(e) = self.rebuild_names() {
            self.overnight.remove(&index);
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Replaces the discounting curve for a currency that already has one.
    ///
    /// # Errors
    ///
    /// Fails with `MissingKey` if the currency has no curve yet.
    pub fn replace_discounting_curve(
        &mut self,
        currency: Currency,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if !self.discounting.contains_key(&currency) {
            return Err(CurveError::missing_key(currency.code()));
        }
        let previous = self.discounting.insert(currency, curve);
        if let Err(e) = self.rebuild_names() {
            self.discounting
                .insert(currency, previous.expect("key was present"));
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Replaces the forward curve for an Ibor index that already has one.
    pub fn replace_ibor_curve(
        &mut self,
        index: IborIndex,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if !self.ibor.contains_key(&index) {
            return Err(CurveError::missing_key(index.name()));
        }
        let previous = self.ibor.insert(index.clone(), curve);
        if let Err(e) = self.rebuild_names() {
            self.ibor.insert(index, previous.expect("key was present"));
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Replaces the forward curve for an overnight index that already has
    /// one.
    pub fn replace_overnight_curve(
        &mut self,
        index: OvernightIndex,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<()> {
        if !self.overnight.contains_key(&index) {
            return Err(CurveError::missing_key(index.name()));
        }
        let previous = self.overnight.insert(index.clone(), curve);
        if let Err(e) = self.rebuild_names() {
            self.overnight
                .insert(index, previous.expect("key was present"));
            self.rebuild_names().expect("previous state was consistent");
            return Err(e);
        }
        Ok(())
    }

    /// Removes the discounting curve for a currency.
    ///
    /// # Errors
    ///
    /// Fails with `MissingKey` if the currency has no curve.
    pub fn remove_discounting_curve(&mut self, currency: Currency) -> CurveResult<()> {
        if self.discounting.remove(&currency).is_none() {
            return Err(CurveError::missing_key(currency.code()));
        }
        self.rebuild_names()
            .expect("removal cannot introduce a name collision");
        Ok(())
    }

    /// Removes the forward curve for an Ibor index.
    pub fn remove_ibor_curve(&mut self, index: &IborIndex) -> CurveResult<()> {
        if self.ibor.remove(index).is_none() {
            return Err(CurveError::missing_key(index.name()));
        }
        self.rebuild_names()
            .expect("removal cannot introduce a name collision");
        Ok(())
    }

    /// Removes the forward curve for an overnight index.
    pub fn remove_overnight_curve(&mut self, index: &OvernightIndex) -> CurveResult<()> {
        if self.overnight.remove(index).is_none() {
            return Err(CurveError::missing_key(index.name()));
        }
        self.rebuild_names()
            .expect("removal cannot introduce a name collision");
        Ok(())
    }

    /// Copies all curves from another market into this one, replacing
    /// curves on keys present in both.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateName` if the union would register two distinct
    /// curves under one name; the receiver is left unchanged on failure.
    pub fn set_all(&mut self, other: &DiscountingMulticurve) -> CurveResult<()> {
        let mut candidate = self.clone();
        candidate
            .discounting
            .extend(other.discounting.iter().map(|(k, v)| (*k, Arc::clone(v))));
        candidate.ibor.extend(
            other
                .ibor
                .iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v))),
        );
        candidate.overnight.extend(
            other
                .overnight
                .iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v))),
        );
        candidate.rebuild_names()?;
        *self = candidate;
        Ok(())
    }

    /// Replaces the FX matrix.
    pub fn set_fx(&mut self, fx: FxMatrix) {
        self.fx = fx;
    }

    /// Returns the FX matrix.
    #[must_use]
    pub fn fx(&self) -> &FxMatrix {
        &self.fx
    }

    /// Returns the registered currencies, sorted.
    #[must_use]
    pub fn currencies(&self) -> BTreeSet<Currency> {
        self.discounting.keys().copied().collect()
    }

    /// Returns the currency-to-discounting-curve map.
    #[must_use]
    pub fn discounting_curves(&self) -> &HashMap<Currency, Arc<dyn YieldCurve>> {
        &self.discounting
    }

    /// Returns the Ibor-index-to-forward-curve map.
    #[must_use]
    pub fn ibor_curves(&self) -> &HashMap<IborIndex, Arc<dyn YieldCurve>> {
        &self.ibor
    }

    /// Returns the overnight-index-to-forward-curve map.
    #[must_use]
    pub fn overnight_curves(&self) -> &HashMap<OvernightIndex, Arc<dyn YieldCurve>> {
        &self.overnight
    }

    /// Returns the registered Ibor indices.
    #[must_use]
    pub fn ibor_indices(&self) -> Vec<&IborIndex> {
        self.ibor.keys().collect()
    }

    /// Returns the registered overnight indices.
    #[must_use]
    pub fn overnight_indices(&self) -> Vec<&OvernightIndex> {
        self.overnight.keys().collect()
    }

    /// Returns a new market with the discounting curve for one currency
    /// substituted (set or replaced); the receiver is unchanged.
    pub fn with_discounting(
        &self,
        currency: Currency,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<Self> {
        let mut copy = self.clone();
        copy.discounting.insert(currency, curve);
        copy.rebuild_names()?;
        Ok(copy)
    }

    /// Returns a new market with the forward curve for one Ibor index
    /// substituted; the receiver is unchanged.
    pub fn with_ibor(&self, index: IborIndex, curve: Arc<dyn YieldCurve>) -> CurveResult<Self> {
        let mut copy = self.clone();
        copy.ibor.insert(index, curve);
        copy.rebuild_names()?;
        Ok(copy)
    }

    /// Returns a new market with the forward curve for one overnight index
    /// substituted; the receiver is unchanged.
    pub fn with_overnight(
        &self,
        index: OvernightIndex,
        curve: Arc<dyn YieldCurve>,
    ) -> CurveResult<Self> {
        let mut copy = self.clone();
        copy.overnight.insert(index, curve);
        copy.rebuild_names()?;
        Ok(copy)
    }
}

impl MulticurveProvider for DiscountingMulticurve {
    fn discounting_curve(&self, currency: Currency) -> CurveResult<Arc<dyn YieldCurve>> {
        self.discounting
            .get(&currency)
            .cloned()
            .ok_or_else(|| CurveError::curve_not_found(currency.code()))
    }

    fn ibor_curve(&self, index: &IborIndex) -> CurveResult<Arc<dyn YieldCurve>> {
        self.ibor
            .get(index)
            .cloned()
            .ok_or_else(|| CurveError::curve_not_found(index.name()))
    }

    fn overnight_curve(&self, index: &OvernightIndex) -> CurveResult<Arc<dyn YieldCurve>> {
        self.overnight
            .get(index)
            .cloned()
            .ok_or_else(|| CurveError::curve_not_found(index.name()))
    }

    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| CurveError::curve_not_found(name))
    }

    fn all_curve_names(&self) -> BTreeSet<String> {
        self.by_name.keys().cloned().collect()
    }

    fn fx_rate(&self, ccy1: Currency, ccy2: Currency) -> CurveResult<f64> {
        self.fx.rate(ccy1, ccy2)
    }

    fn try_copy(&self) -> CurveResult<DiscountingMulticurve> {
        Ok(self.clone())
    }
}
