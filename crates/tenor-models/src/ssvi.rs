//! SSVI (surface SVI) volatility formula, parameters and provider.
//!
//! The smile at expiry `T` is driven by the ATM volatility term structure
//! and two shape parameters. With total ATM variance `θ = σ_atm² T`,
//! `φ = η/√θ` and log-moneyness `k = ln(K/F)`:
//!
//! ```text
//! w(k) = θ/2 · (1 + ρφk + sqrt((φk + ρ)² + 1 - ρ²))
//! σ(K, F, T) = sqrt(w(k) / T)
//! ```
//!
//! At `k = 0` the square root collapses to 1 and the formula returns the
//! ATM volatility exactly. The adjoint returns the volatility together
//! with its partial derivatives with respect to the six formula inputs in
//! fixed order (price, strike, expiry, ATM vol, rho, eta), holding the
//! other five fixed — no finite differencing in calibration loops.

use std::collections::BTreeSet;
use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tenor_core::LegalEntity;
use tenor_curves::error::CurveResult;
use tenor_curves::issuer::IssuerProvider;
use tenor_curves::multicurve::{ForwardSensitivity, MulticurveProvider, PointSensitivity};

use crate::error::{VolError, VolResult};
use crate::term::{SsviShape, VolTermCurve};

/// The SSVI volatility and its partial derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsviAdjoint {
    /// The volatility itself.
    pub value: f64,
    /// Derivative with respect to the futures/forward price.
    pub d_price: f64,
    /// Derivative with respect to the strike.
    pub d_strike: f64,
    /// Derivative with respect to the expiry.
    pub d_expiry: f64,
    /// Derivative with respect to the ATM volatility.
    pub d_atm: f64,
    /// Derivative with respect to rho.
    pub d_rho: f64,
    /// Derivative with respect to eta.
    pub d_eta: f64,
}

fn check_inputs(
    price: f64,
    strike: f64,
    expiry: f64,
    atm_vol: f64,
    rho: f64,
    eta: f64,
) -> VolResult<()> {
    if price <= 0.0 {
        return Err(VolError::invalid_price(price));
    }
    if strike <= 0.0 {
        return Err(VolError::invalid_strike(strike));
    }
    if expiry <= 0.0 {
        return Err(VolError::invalid_expiry(expiry));
    }
    if atm_vol <= 0.0 {
        return Err(VolError::invalid_parameter("atm_vol", atm_vol));
    }
    if rho.abs() >= 1.0 {
        return Err(VolError::invalid_parameter("rho", rho));
    }
    if eta <= 0.0 {
        return Err(VolError::invalid_parameter("eta", eta));
    }
    Ok(())
}

/// Returns the SSVI volatility.
///
/// # Errors
///
/// Requires `price > 0`, `strike > 0`, `expiry > 0`, `atm_vol > 0`,
/// `|rho| < 1` and `eta > 0`.
pub fn ssvi_volatility(
    price: f64,
    strike: f64,
    expiry: f64,
    atm_vol: f64,
    rho: f64,
    eta: f64,
) -> VolResult<f64> {
    check_inputs(price, strike, expiry, atm_vol, rho, eta)?;
    let theta = atm_vol * atm_vol * expiry;
    let phi = eta / theta.sqrt();
    let k = (strike / price).ln();
    let u = phi * k + rho;
    let root = (u * u + 1.0 - rho * rho).sqrt();
    let w = 0.5 * theta * (1.0 + rho * phi * k + root);
    Ok((w / expiry).sqrt())
}

/// Returns the SSVI volatility together with its analytic partial
/// derivatives.
///
/// The `value` field always agrees with [`ssvi_volatility`] on the same
/// inputs.
///
/// # Errors
///
/// Same domain as [`ssvi_volatility`].
pub fn ssvi_volatility_adjoint(
    price: f64,
    strike: f64,
    expiry: f64,
    atm_vol: f64,
    rho: f64,
    eta: f64,
) -> VolResult<SsviAdjoint> {
    check_inputs(price, strike, expiry, atm_vol, rho, eta)?;
    let theta = atm_vol * atm_vol * expiry;
    let phi = eta / theta.sqrt();
    let k = (strike / price).ln();
    let u = phi * k + rho;
    let root = (u * u + 1.0 - rho * rho).sqrt();
    let a = 1.0 + rho * phi * k + root;
    let w = 0.5 * theta * a;
    let value = (w / expiry).sqrt();

    // Derivatives of the half-total-variance w through its pieces.
    let d_sigma_dw = 1.0 / (2.0 * value * expiry);
    let da_dphi = rho * k + u * k / root;
    let da_drho = phi * k + (u - rho) / root;
    let da_dk = rho * phi + u * phi / root;
    // theta enters directly and through phi = eta * theta^(-1/2).
    let dw_dtheta = 0.5 * a - 0.25 * da_dphi * phi;
    let dw_dk = 0.5 * theta * da_dk;

    let d_strike = d_sigma_dw * dw_dk / strike;
    let d_price = -d_sigma_dw * dw_dk / price;
    let d_atm = d_sigma_dw * dw_dtheta * 2.0 * atm_vol * expiry;
    let d_rho = d_sigma_dw * 0.5 * theta * da_drho;
    let d_eta = d_sigma_dw * 0.5 * theta * da_dphi * phi / eta;
    // sigma = sqrt(w/T) with theta = atm^2 T: both w and the outer 1/T move.
    let dw_dexpiry = dw_dtheta * atm_vol * atm_vol;
    let d_expiry = (dw_dexpiry * expiry - w) / (2.0 * value * expiry * expiry);

    Ok(SsviAdjoint {
        value,
        d_price,
        d_strike,
        d_expiry,
        d_atm,
        d_rho,
        d_eta,
    })
}

/// Immutable SSVI parameter set: ATM volatility term structure plus the
/// two shape parameters, each either constant or expiry-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsviParameters {
    atm: VolTermCurve,
    rho: SsviShape,
    eta: SsviShape,
}

impl SsviParameters {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Every ATM node must be positive, every rho value inside `(-1, 1)`,
    /// every eta value positive.
    pub fn new(atm: VolTermCurve, rho: SsviShape, eta: SsviShape) -> VolResult<Self> {
        for &v in atm.values() {
            if v <= 0.0 {
                return Err(VolError::invalid_parameter("atm_vol", v));
            }
        }
        rho.validate("rho", |v| v.abs() < 1.0)?;
        eta.validate("eta", |v| v > 0.0)?;
        Ok(Self { atm, rho, eta })
    }

    /// Returns the ATM volatility at `expiry`.
    #[must_use]
    pub fn atm_vol(&self, expiry: f64) -> f64 {
        self.atm.value(expiry)
    }

    /// Returns rho at `expiry`.
    #[must_use]
    pub fn rho(&self, expiry: f64) -> f64 {
        self.rho.value(expiry)
    }

    /// Returns eta at `expiry`.
    #[must_use]
    pub fn eta(&self, expiry: f64) -> f64 {
        self.eta.value(expiry)
    }

    /// Returns the volatility at `(expiry, strike, price)`.
    pub fn volatility(&self, expiry: f64, strike: f64, price: f64) -> VolResult<f64> {
        ssvi_volatility(
            price,
            strike,
            expiry,
            self.atm_vol(expiry),
            self.rho(expiry),
            self.eta(expiry),
        )
    }

    /// Returns the volatility and its partial derivatives at
    /// `(expiry, strike, price)`.
    pub fn volatility_adjoint(
        &self,
        expiry: f64,
        strike: f64,
        price: f64,
    ) -> VolResult<SsviAdjoint> {
        ssvi_volatility_adjoint(
            price,
            strike,
            expiry,
            self.atm_vol(expiry),
            self.rho(expiry),
            self.eta(expiry),
        )
    }
}

/// SSVI volatility provider for options on bond futures.
///
/// Pairs issuer curves with an immutable [`SsviParameters`] set; `copy()`
/// deep-copies the curves and shares the parameters.
pub struct SsviBondFuturesProvider<P> {
    issuer: P,
    parameters: Arc<SsviParameters>,
    legal_entity: LegalEntity,
}

impl<P: IssuerProvider> SsviBondFuturesProvider<P> {
    /// Creates a new provider.
    #[must_use]
    pub fn new(issuer: P, parameters: Arc<SsviParameters>, legal_entity: LegalEntity) -> Self {
        Self {
            issuer,
            parameters,
            legal_entity,
        }
    }

    /// Returns the volatility for an option on the futures; the delay
    /// between expiry and delivery does not enter the formula.
    pub fn volatility(
        &self,
        expiry: f64,
        _delay: f64,
        strike: f64,
        futures_price: f64,
    ) -> VolResult<f64> {
        self.parameters.volatility(expiry, strike, futures_price)
    }

    /// Returns the volatility and its partial derivatives.
    pub fn volatility_adjoint(
        &self,
        expiry: f64,
        _delay: f64,
        strike: f64,
        futures_price: f64,
    ) -> VolResult<SsviAdjoint> {
        self.parameters
            .volatility_adjoint(expiry, strike, futures_price)
    }

    /// Returns the SSVI parameters.
    #[must_use]
    pub fn parameters(&self) -> &SsviParameters {
        &self.parameters
    }

    /// Returns the issuer provider.
    #[must_use]
    pub fn issuer(&self) -> &P {
        &self.issuer
    }

    /// Returns the embedded multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &dyn MulticurveProvider {
        self.issuer.multicurve()
    }

    /// Returns the legal entity of the bonds underlying the futures.
    #[must_use]
    pub fn legal_entity(&self) -> &LegalEntity {
        &self.legal_entity
    }

    /// Returns all curve names of the embedded provider.
    #[must_use]
    pub fn all_curve_names(&self) -> BTreeSet<String> {
        self.issuer.all_curve_names()
    }

    /// Delegates to the embedded provider; the parameters are not
    /// differentiated through this path.
    pub fn parameter_sensitivity(
        &self,
        name: &str,
        sensitivities: &[PointSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.issuer.parameter_sensitivity(name, sensitivities)
    }

    /// Delegates to the embedded provider.
    pub fn parameter_forward_sensitivity(
        &self,
        name: &str,
        sensitivities: &[ForwardSensitivity],
    ) -> CurveResult<DVector<f64>> {
        self.issuer.parameter_forward_sensitivity(name, sensitivities)
    }
}

impl<P: IssuerProvider + Clone> SsviBondFuturesProvider<P> {
    /// Returns a provider over an independent copy of the curves, sharing
    /// the immutable parameters.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
            parameters: Arc::clone(&self.parameters),
            legal_entity: self.legal_entity.clone(),
        }
    }
}
