//! End-to-end volatility provider scenarios over a shared curve market.

use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;

use tenor_core::{Currency, IborIndex, LegalEntity, LegalEntityFilter, LegalEntityKey};
use tenor_curves::curves::ZeroRateCurve;
use tenor_curves::issuer::{DiscountingIssuerProvider, IssuerProvider};
use tenor_curves::multicurve::{DiscountingMulticurve, MulticurveProvider, PointSensitivity};
use tenor_curves::YieldCurve;
use tenor_models::prelude::*;

fn flat(name: &str, rate: f64) -> Arc<dyn YieldCurve> {
    Arc::new(ZeroRateCurve::flat(name, rate).unwrap())
}

fn ust() -> LegalEntity {
    LegalEntity::new("UST", "US TREASURY", "GOVT", Currency::Usd)
}

fn issuer_market() -> DiscountingIssuerProvider {
    let mut multicurve = DiscountingMulticurve::new();
    multicurve
        .set_discounting_curve(Currency::Usd, flat("USD-DSC", 0.02))
        .unwrap();
    multicurve
        .set_ibor_curve(IborIndex::usd_term_3m(), flat("USD-3M", 0.021))
        .unwrap();
    let mut issuer = DiscountingIssuerProvider::new(multicurve);
    issuer
        .set_issuer_curve(
            LegalEntityKey::Sector("GOVT".to_string()),
            LegalEntityFilter::Sector,
            flat("GOVT-USD", 0.025),
        )
        .unwrap();
    issuer
}

#[test]
fn bond_futures_provider_couples_vol_and_curves() {
    let surface: Arc<dyn Surface> = Arc::new(
        GridSurface::new(
            vec![0.25, 1.0],
            vec![-0.2, 0.0, 0.2],
            vec![vec![0.26, 0.20, 0.26], vec![0.24, 0.19, 0.24]],
        )
        .unwrap(),
    );
    let provider =
        BlackBondFuturesProvider::log_moneyness(issuer_market(), surface, ust());

    // Volatility lookups and discounting flow from one object.
    let vol = provider.volatility(1.0, 0.0, 125.0, 125.0).unwrap();
    assert_relative_eq!(vol, 0.19, epsilon = 1e-15);
    let df = provider
        .issuer()
        .issuer_discount_factor(&ust(), 1.0)
        .unwrap();
    assert_relative_eq!(df, (-0.025_f64).exp(), epsilon = 1e-15);

    // Curve risk keyed by name passes through to the issuer provider.
    let sens = provider
        .parameter_sensitivity("GOVT-USD", &[PointSensitivity::new(1.0, 1.0)])
        .unwrap();
    assert_eq!(sens.len(), 1);
}

#[test]
fn provider_copy_isolates_curve_mutation() {
    let provider = BlackBondFuturesProvider::flat(
        issuer_market(),
        Arc::new(FlatSurface::new(0.2)) as Arc<dyn Surface>,
        ust(),
    );
    let copy = provider.copy();
    copy.issuer()
        .multicurve()
        .discount_factor(Currency::Usd, 1.0)
        .unwrap();

    // Mutate the copy's curves: the original keeps answering unchanged.
    let copied_issuer = {
        let mut c = provider.issuer().try_copy().unwrap();
        c.multicurve_mut()
            .replace_discounting_curve(Currency::Usd, flat("USD-DSC", 0.05))
            .unwrap();
        c
    };
    assert_relative_eq!(
        copied_issuer
            .multicurve()
            .discount_factor(Currency::Usd, 1.0)
            .unwrap(),
        (-0.05_f64).exp(),
        epsilon = 1e-15
    );
    assert_relative_eq!(
        provider
            .issuer()
            .multicurve()
            .discount_factor(Currency::Usd, 1.0)
            .unwrap(),
        (-0.02_f64).exp(),
        epsilon = 1e-15
    );
}

#[test]
fn ssvi_provider_adjoint_agrees_with_plain_call() {
    let parameters = SsviParameters::new(
        VolTermCurve::new(vec![0.25, 1.0, 2.0], vec![0.05, 0.06, 0.065]).unwrap(),
        SsviShape::Constant(-0.25),
        SsviShape::Constant(0.5),
    )
    .unwrap();
    let provider =
        SsviBondFuturesProvider::new(issuer_market(), Arc::new(parameters), ust());

    for (expiry, strike, price) in [
        (0.5, 120.0, 124.5),
        (1.0, 124.5, 124.5),
        (1.5, 131.0, 124.5),
    ] {
        let vol = provider.volatility(expiry, 0.0, strike, price).unwrap();
        let adjoint = provider
            .volatility_adjoint(expiry, 0.0, strike, price)
            .unwrap();
        assert_relative_eq!(adjoint.value, vol, epsilon = 1e-15);
    }
}

#[test]
fn hull_white_provider_full_round_trip() {
    let mut market = DiscountingMulticurve::new();
    market
        .set_discounting_curve(Currency::Eur, flat("EUR-DSC", 0.025))
        .unwrap();
    let parameters =
        Arc::new(HullWhiteParameters::new(0.01, vec![0.011, 0.013], vec![2.0]).unwrap());
    let provider = HullWhiteProvider::new(market, Arc::clone(&parameters), Currency::Eur);

    let copy = provider.copy();
    assert_eq!(copy.parameters(), provider.parameters());
    assert_relative_eq!(copy.parameters().volatility_at(1.0), 0.011);
    assert!(copy.all_curve_names().contains("EUR-DSC"));
}

proptest! {
    /// SSVI adjoint base value equals the plain volatility everywhere in
    /// the valid domain.
    #[test]
    fn ssvi_adjoint_consistency(
        price in 50.0_f64..200.0,
        moneyness in -0.3_f64..0.3,
        expiry in 0.05_f64..10.0,
        atm in 0.01_f64..0.8,
        rho in -0.95_f64..0.95,
        eta in 0.05_f64..3.0,
    ) {
        let strike = price * moneyness.exp();
        let vol = ssvi_volatility(price, strike, expiry, atm, rho, eta).unwrap();
        let adjoint =
            ssvi_volatility_adjoint(price, strike, expiry, atm, rho, eta).unwrap();
        prop_assert!((adjoint.value - vol).abs() <= 1e-14 * vol.max(1.0));
        prop_assert!(vol > 0.0);
    }

    /// At the money the SSVI smile returns the ATM volatility exactly.
    #[test]
    fn ssvi_atm_recovery(
        price in 50.0_f64..200.0,
        expiry in 0.05_f64..10.0,
        atm in 0.01_f64..0.8,
        rho in -0.95_f64..0.95,
        eta in 0.05_f64..3.0,
    ) {
        let vol = ssvi_volatility(price, price, expiry, atm, rho, eta).unwrap();
        prop_assert!((vol - atm).abs() <= 1e-12 * atm);
    }
}
