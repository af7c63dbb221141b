//! End-to-end provider scenarios: a small USD/EUR market with an issuer
//! layer, decorated views, and sensitivity projection.

use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;

use tenor_core::{Currency, IborIndex, LegalEntity, LegalEntityFilter, LegalEntityKey};
use tenor_curves::prelude::*;

fn flat(name: &str, rate: f64) -> Arc<dyn YieldCurve> {
    Arc::new(ZeroRateCurve::flat(name, rate).unwrap())
}

fn ust() -> LegalEntity {
    LegalEntity::new("UST", "US TREASURY", "GOVT", Currency::Usd)
}

/// USD discounting at flat 2% with a 3M forward curve on the same level,
/// EUR discounting at 2.5%, EUR/USD at 1.10, and a GOVT issuer curve.
fn market() -> DiscountingIssuerProvider {
    let mut fx = FxMatrix::new();
    fx.add_currency(Currency::Eur, Currency::Usd, 1.10).unwrap();

    let mut multicurve = DiscountingMulticurve::with_fx(fx);
    multicurve
        .set_discounting_curve(Currency::Usd, flat("USD-DSC", 0.02))
        .unwrap();
    multicurve
        .set_ibor_curve(IborIndex::usd_term_3m(), flat("USD-3M", 0.02))
        .unwrap();
    multicurve
        .set_discounting_curve(Currency::Eur, flat("EUR-DSC", 0.025))
        .unwrap();

    let mut issuer = DiscountingIssuerProvider::new(multicurve);
    issuer
        .set_issuer_curve(
            LegalEntityKey::Sector("GOVT".to_string()),
            LegalEntityFilter::Sector,
            flat("GOVT-USD", 0.028),
        )
        .unwrap();
    issuer
}

#[test]
fn forward_rate_spec_scenario() {
    // Flat 2% continuous discounting and forward curve:
    // F(0, 0.25, 0.25) = (1/exp(-0.02*0.25) - 1)/0.25
    let issuer = market();
    let fwd = issuer
        .multicurve()
        .ibor_forward_rate_with_accrual(&IborIndex::usd_term_3m(), 0.0, 0.25, 0.25)
        .unwrap();
    let expected = ((0.02_f64 * 0.25).exp() - 1.0) / 0.25;
    assert_relative_eq!(fwd, expected, epsilon = 1e-12);
}

#[test]
fn issuer_and_risk_free_discounting_differ() {
    let issuer = market();
    let risk_free = issuer
        .multicurve()
        .discount_factor(Currency::Usd, 5.0)
        .unwrap();
    let credit = issuer.issuer_discount_factor(&ust(), 5.0).unwrap();
    assert!(credit < risk_free);
}

#[test]
fn decorated_chain_end_to_end() {
    let issuer = market();

    // Spread-decorate the treasury by 10bp, then present the result as a
    // multicurve market discounting USD on the treasury curve.
    let spread = SpreadDecoratedIssuer::new(&issuer, ust(), 0.001);
    let df_base = issuer.issuer_discount_factor(&ust(), 2.0).unwrap();
    let df_shifted = spread.issuer_discount_factor(&ust(), 2.0).unwrap();
    assert_relative_eq!(df_shifted, df_base * (-0.002_f64).exp(), epsilon = 1e-15);

    let decorated = IssuerDecoratedMulticurve::new(&issuer, Currency::Usd, ust());
    assert_relative_eq!(
        decorated.discount_factor(Currency::Usd, 2.0).unwrap(),
        df_base,
        epsilon = 1e-15
    );
    // EUR unaffected by the substitution.
    assert_relative_eq!(
        decorated.discount_factor(Currency::Eur, 2.0).unwrap(),
        issuer
            .multicurve()
            .discount_factor(Currency::Eur, 2.0)
            .unwrap(),
        epsilon = 1e-15
    );
}

#[test]
fn copy_then_mutate_leaves_original() {
    let issuer = market();
    let mut copy = issuer.try_copy().unwrap();
    copy.multicurve_mut()
        .replace_discounting_curve(Currency::Usd, flat("USD-DSC", 0.04))
        .unwrap();

    assert_relative_eq!(
        issuer
            .multicurve()
            .discount_factor(Currency::Usd, 1.0)
            .unwrap(),
        (-0.02_f64).exp(),
        epsilon = 1e-15
    );
    assert_relative_eq!(
        copy.multicurve()
            .discount_factor(Currency::Usd, 1.0)
            .unwrap(),
        (-0.04_f64).exp(),
        epsilon = 1e-15
    );
}

#[test]
fn fx_round_trip_through_market() {
    let issuer = market();
    let eurusd = issuer
        .multicurve()
        .fx_rate(Currency::Eur, Currency::Usd)
        .unwrap();
    let usdeur = issuer
        .multicurve()
        .fx_rate(Currency::Usd, Currency::Eur)
        .unwrap();
    assert_relative_eq!(eurusd * usdeur, 1.0, epsilon = 1e-12);
}

proptest! {
    /// The simply-compounded forward rate always equals the discount
    /// factor ratio formula on the registered curve.
    #[test]
    fn forward_rate_matches_df_ratio(
        start in 0.0_f64..10.0,
        length in 0.01_f64..2.0,
        accrual in 0.01_f64..2.0,
        rate in -0.01_f64..0.10,
    ) {
        let mut market = DiscountingMulticurve::new();
        let index = IborIndex::usd_term_3m();
        market
            .set_ibor_curve(index.clone(), flat("USD-3M", rate))
            .unwrap();
        let end = start + length;
        let curve = market.ibor_curve(&index).unwrap();
        let expected =
            (curve.discount_factor(start) / curve.discount_factor(end) - 1.0) / accrual;
        let fwd = market
            .ibor_forward_rate_with_accrual(&index, start, end, accrual)
            .unwrap();
        prop_assert!((fwd - expected).abs() <= 1e-12 * expected.abs().max(1.0));
    }

    /// Parameter sensitivity accumulation is linear in the point list.
    #[test]
    fn parameter_sensitivity_is_linear(
        t1 in 0.1_f64..8.0,
        t2 in 0.1_f64..8.0,
        v1 in -100.0_f64..100.0,
        v2 in -100.0_f64..100.0,
    ) {
        let mut market = DiscountingMulticurve::new();
        market
            .set_discounting_curve(
                Currency::Usd,
                Arc::new(
                    ZeroRateCurve::new(
                        "USD-DSC",
                        vec![0.5, 1.0, 2.0, 5.0],
                        vec![0.02, 0.021, 0.023, 0.026],
                    )
                    .unwrap(),
                ),
            )
            .unwrap();
        let s1 = PointSensitivity::new(t1, v1);
        let s2 = PointSensitivity::new(t2, v2);
        let both = market.parameter_sensitivity("USD-DSC", &[s1, s2]).unwrap();
        let sum = market.parameter_sensitivity("USD-DSC", &[s1]).unwrap()
            + market.parameter_sensitivity("USD-DSC", &[s2]).unwrap();
        prop_assert!((both - sum).norm() <= 1e-12);
    }

    /// A zero continuous spread decorates without changing anything.
    #[test]
    fn zero_spread_decorator_is_identity(t in 0.0_f64..30.0) {
        let issuer = market();
        let decorated = SpreadDecoratedIssuer::new(&issuer, ust(), 0.0);
        let lhs = decorated.issuer_discount_factor(&ust(), t).unwrap();
        let rhs = issuer.issuer_discount_factor(&ust(), t).unwrap();
        prop_assert_eq!(lhs, rhs);
    }
}
