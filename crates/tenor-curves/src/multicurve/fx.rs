//! Pairwise exchange-rate matrix.

use std::collections::HashMap;

use tenor_core::Currency;

use crate::error::{CurveError, CurveResult};

/// Tolerance used when checking rate consistency during merges.
const MERGE_TOLERANCE: f64 = 1e-10;

/// A matrix of exchange rates between registered currencies.
///
/// Rates are stored dense: `rate(a, b)` is the value of 1 unit of `a` in
/// units of `b`. Adding a currency quotes it against one already-registered
/// reference currency; all cross rates are derived through that reference,
/// so the matrix stays internally consistent by construction.
#[derive(Debug, Clone, Default)]
pub struct FxMatrix {
    currencies: Vec<Currency>,
    index: HashMap<Currency, usize>,
    rates: Vec<Vec<f64>>,
}

impl FxMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a matrix containing a single base currency.
    #[must_use]
    pub fn with_base(currency: Currency) -> Self {
        let mut matrix = Self::new();
        matrix.currencies.push(currency);
        matrix.index.insert(currency, 0);
        matrix.rates.push(vec![1.0]);
        matrix
    }

    /// Returns the registered currencies in insertion order.
    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Returns true if the currency is registered.
    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.index.contains_key(&currency)
    }

    /// Registers a currency quoted against an existing reference.
    ///
    /// `rate` is the value of 1 unit of `currency` in units of `reference`.
    /// On an empty matrix both currencies are registered at once.
    ///
    /// # Errors
    ///
    /// Fails if `currency` is already registered, if `reference` is unknown
    /// (on a non-empty matrix), or if the rate is not positive.
    pub fn add_currency(
        &mut self,
        currency: Currency,
        reference: Currency,
        rate: f64,
    ) -> CurveResult<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CurveError::invalid_argument(format!(
                "FX rate must be positive: {}",
                rate
            )));
        }
        if currency == reference {
            return Err(CurveError::invalid_argument(
                "cannot quote a currency against itself",
            ));
        }
        if self.index.contains_key(&currency) {
            return Err(CurveError::duplicate_key(currency.code()));
        }
        if self.currencies.is_empty() {
            *self = Self::with_base(reference);
        }
        let Some(&ref_idx) = self.index.get(&reference) else {
            return Err(CurveError::missing_key(reference.code()));
        };

        let n = self.currencies.len();
        // 1 currency = rate reference; cross rates chain through the reference.
        let mut new_row = Vec::with_capacity(n + 1);
        for j in 0..n {
            new_row.push(rate * self.rates[ref_idx][j]);
        }
        new_row.push(1.0);
        for (i, row) in self.rates.iter_mut().enumerate() {
            row.push(1.0 / new_row[i]);
        }
        self.rates.push(new_row);
        self.currencies.push(currency);
        self.index.insert(currency, n);
        Ok(())
    }

    /// Updates the quote of an already-registered currency.
    ///
    /// # Errors
    ///
    /// Fails if either currency is unknown or the rate is not positive.
    pub fn update_rate(
        &mut self,
        currency: Currency,
        reference: Currency,
        rate: f64,
    ) -> CurveResult<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CurveError::invalid_argument(format!(
                "FX rate must be positive: {}",
                rate
            )));
        }
        let Some(&idx) = self.index.get(&currency) else {
            return Err(CurveError::missing_key(currency.code()));
        };
        let Some(&ref_idx) = self.index.get(&reference) else {
            return Err(CurveError::missing_key(reference.code()));
        };
        if idx == ref_idx {
            return Err(CurveError::invalid_argument(
                "cannot quote a currency against itself",
            ));
        }
        let n = self.currencies.len();
        for j in 0..n {
            if j == idx {
                continue;
            }
            let cross = rate * self.rates[ref_idx][j];
            self.rates[idx][j] = cross;
            self.rates[j][idx] = 1.0 / cross;
        }
        Ok(())
    }

    /// Returns the exchange rate: 1 unit of `ccy1` in units of `ccy2`.
    ///
    /// # Errors
    ///
    /// Fails if either currency is unregistered (except the trivial
    /// same-currency query, which is always 1).
    pub fn rate(&self, ccy1: Currency, ccy2: Currency) -> CurveResult<f64> {
        if ccy1 == ccy2 {
            return Ok(1.0);
        }
        let i = self
            .index
            .get(&ccy1)
            .ok_or_else(|| CurveError::curve_not_found(ccy1.code()))?;
        let j = self
            .index
            .get(&ccy2)
            .ok_or_else(|| CurveError::curve_not_found(ccy2.code()))?;
        Ok(self.rates[*i][*j])
    }

    /// Merges another matrix into this one.
    ///
    /// When the matrices share a currency, the other's currencies are
    /// re-quoted through the first shared currency; rates quoted by both
    /// must agree within tolerance.
    ///
    /// # Errors
    ///
    /// Fails if the matrices are both non-empty yet share no currency, or
    /// if a shared pair disagrees.
    pub fn merge(&mut self, other: &FxMatrix) -> CurveResult<()> {
        if other.currencies.is_empty() {
            return Ok(());
        }
        if self.currencies.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        let Some(&pivot) = other.currencies.iter().find(|c| self.contains(**c)) else {
            return Err(CurveError::invalid_argument(
                "FX matrices share no common currency",
            ));
        };
        // Consistency of pairs known to both sides.
        for &a in &other.currencies {
            for &b in &other.currencies {
                if a != b && self.contains(a) && self.contains(b) {
                    let mine = self.rate(a, b)?;
                    let theirs = other.rate(a, b)?;
                    if (mine - theirs).abs() > MERGE_TOLERANCE * mine.abs().max(1.0) {
                        return Err(CurveError::invalid_argument(format!(
                            "inconsistent FX rate for {}/{}: {} vs {}",
                            a, b, mine, theirs
                        )));
                    }
                }
            }
        }
        for &ccy in &other.currencies {
            if !self.contains(ccy) {
                let rate = other.rate(ccy, pivot)?;
                self.add_currency(ccy, pivot, rate)?;
            }
        }
        Ok(())
    }
}
