//! Integration tests for valuation, market sessions and the dashboard view.
//!
//! Tests cover:
//! - The BTC/BBCA worked scenario end to end (INI file -> valuation -> view)
//! - Valuation properties over generated portfolios
//! - IDX session boundaries
//! - Idempotence of valuation and view construction

mod common;

use approx::assert_relative_eq;
use common::*;
use folioview::adapters::ini_holdings_adapter::IniHoldingsAdapter;
use folioview::domain::asset::AssetRecord;
use folioview::domain::book::BookKind;
use folioview::domain::dashboard::{DashboardView, DisplayZone, ViewFilter};
use folioview::domain::holdings::default_holdings;
use folioview::domain::session::{MarketSession, SessionRule, IDX_TIMEZONE};
use folioview::domain::valuation::Valuation;
use folioview::ports::holdings_port::HoldingsPort;
use proptest::prelude::*;

mod scenario {
    use super::*;

    #[test]
    fn btc_and_bbca_totals() {
        let valuation = Valuation::compute(&scenario_holdings());

        let crypto = valuation.book(BookKind::Crypto).unwrap();
        assert_relative_eq!(crypto.total_native, 33710.25, max_relative = 1e-12);
        assert_relative_eq!(crypto.change_usd, 788.81985, max_relative = 1e-9);

        let idx = valuation.book(BookKind::Idx).unwrap();
        assert_relative_eq!(idx.total_native, 4_937_500.0, max_relative = 1e-12);
        assert_relative_eq!(idx.total_usd, 311.0625, max_relative = 1e-9);
        assert_relative_eq!(idx.change_native, 61_718.75, max_relative = 1e-9);
        assert_relative_eq!(idx.change_usd, 3.88828125, max_relative = 1e-9);

        assert_relative_eq!(valuation.total_usd, 34021.3125, max_relative = 1e-9);
        assert_relative_eq!(valuation.change_usd, 792.70813125, max_relative = 1e-9);
        let pct = valuation.change_pct.unwrap();
        assert!((pct - 2.386).abs() < 1e-3, "pct = {pct}");
    }

    #[test]
    fn loaded_from_ini_matches_literal_holdings() {
        let file = write_temp_ini(SCENARIO_INI);
        let loaded = IniHoldingsAdapter::new(file.path()).load().unwrap();
        assert_eq!(
            Valuation::compute(&loaded),
            Valuation::compute(&scenario_holdings())
        );
    }

    #[test]
    fn dashboard_strings() {
        let holdings = scenario_holdings();
        let valuation = Valuation::compute(&holdings);
        let view = DashboardView::build(
            &holdings,
            &valuation,
            jakarta(2024, 1, 15, 9, 0),
            DisplayZone::Named(IDX_TIMEZONE),
            ViewFilter::All,
        );

        assert_eq!(view.clock.time, "09:00:00");
        assert_eq!(view.clock.date, "MON, JAN 15, 2024");
        assert_eq!(view.summary.total_display, "$34,021.31");
        assert_eq!(view.summary.change_display, "+$792.71");
        assert_eq!(view.summary.change_pct_display, "+2.39%");
        assert_eq!(view.summary.allocations[0].allocation_display, "99.1%");
        assert_eq!(view.summary.allocations[1].allocation_display, "0.9%");
        assert_eq!(view.market("IDX").unwrap().status, "OPEN");

        let bbca = &view.sections[1].cards[0];
        assert_eq!(bbca.value_display, "Rp 4.937.500");
        assert_eq!(bbca.value_secondary.as_deref(), Some("~$311"));
        let btc = &view.sections[0].cards[0];
        assert_eq!(btc.value_display, "$33,710.25");
        assert_eq!(btc.amount_display, "0.5 BTC");
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn empty_portfolio_is_neutral() {
        let valuation = Valuation::compute(&crypto_only(Vec::new()));
        assert_eq!(valuation.total_usd, 0.0);
        assert_eq!(valuation.change_usd, 0.0);
        assert_eq!(valuation.change_pct, None);
        assert_eq!(valuation.books[0].allocation_pct, None);
    }

    #[test]
    fn zero_amount_contributes_nothing() {
        let valuation = Valuation::compute(&crypto_only(vec![AssetRecord::new(
            "BTC", "Bitcoin", 0.0, 67420.5, 2.34,
        )]));
        assert_eq!(valuation.total_usd, 0.0);
        assert_eq!(valuation.change_usd, 0.0);
    }

    #[test]
    fn implied_base_governs_percent() {
        // value 100 with a 50 gain implies a base of 50
        let doubled = Valuation::compute(&crypto_only(vec![AssetRecord::new(
            "X", "X", 1.0, 100.0, 50.0,
        )]));
        assert_relative_eq!(doubled.change_pct.unwrap(), 100.0, max_relative = 1e-12);

        // a reported change at or above the whole value leaves no base
        let degenerate = Valuation::compute(&crypto_only(vec![AssetRecord::new(
            "X", "X", 1.0, 100.0, 150.0,
        )]));
        assert_eq!(degenerate.change_pct, None);
    }

    #[test]
    fn loss_is_negative_percent() {
        let valuation = Valuation::compute(&crypto_only(vec![AssetRecord::new(
            "ETH", "Ethereum", 3.2, 3891.20, -1.12,
        )]));
        assert!(valuation.change_usd < 0.0);
        assert!(valuation.change_pct.unwrap() < 0.0);
        assert!(!valuation.is_gain());
    }
}

mod sessions {
    use super::*;

    fn idx() -> MarketSession {
        MarketSession::Scheduled(SessionRule::idx())
    }

    #[test]
    fn boundaries() {
        assert!(idx().is_open(jakarta(2024, 1, 15, 9, 0)));
        assert!(!idx().is_open(jakarta(2024, 1, 15, 8, 59)));
        assert!(idx().is_open(jakarta(2024, 1, 19, 15, 59)));
        assert!(!idx().is_open(jakarta(2024, 1, 19, 16, 0)));
        assert!(!idx().is_open(jakarta(2024, 1, 20, 12, 0)));
    }

    #[test]
    fn crypto_never_closes() {
        let crypto = MarketSession::AlwaysOpen;
        for hour in 0..24 {
            assert!(crypto.is_open(jakarta(2024, 1, 20, hour, 0)));
        }
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn repeated_evaluation_is_identical() {
        let holdings = default_holdings().unwrap();
        let instant = jakarta(2024, 1, 16, 11, 15);

        let first = Valuation::compute(&holdings);
        let second = Valuation::compute(&holdings);
        assert_eq!(first, second);

        let zone = DisplayZone::Named(IDX_TIMEZONE);
        let a = DashboardView::build(&holdings, &first, instant, zone, ViewFilter::All);
        let b = DashboardView::build(&holdings, &second, instant, zone, ViewFilter::All);
        assert_eq!(a, b);
    }
}

fn asset_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0..1_000.0f64, 0.0..100_000.0f64, -50.0..50.0f64)
}

proptest! {
    #[test]
    fn book_total_is_sum_of_values(assets in prop::collection::vec(asset_strategy(), 0..12)) {
        let records: Vec<AssetRecord> = assets
            .iter()
            .enumerate()
            .map(|(i, (amount, price, change))| {
                AssetRecord::new(&format!("A{i}"), "Asset", *amount, *price, *change)
            })
            .collect();
        let expected: f64 = records.iter().map(|r| r.amount * r.price).sum();

        let valuation = Valuation::compute(&crypto_only(records));
        let total = valuation.books[0].total_native;
        prop_assert!((total - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn allocations_sum_to_hundred(
        crypto in prop::collection::vec(asset_strategy(), 1..6),
        idx in prop::collection::vec(asset_strategy(), 1..6),
    ) {
        use folioview::domain::book::Book;
        use folioview::domain::holdings::{FxRate, Holdings};

        let records = |prefix: &str, list: &[(f64, f64, f64)]| -> Vec<AssetRecord> {
            list.iter()
                .enumerate()
                .map(|(i, (a, p, c))| AssetRecord::new(&format!("{prefix}{i}"), "x", *a, *p, *c))
                .collect()
        };
        let holdings = Holdings::new(
            vec![
                Book::new(BookKind::Crypto, MarketSession::AlwaysOpen, records("C", &crypto)).unwrap(),
                Book::new(BookKind::Idx, MarketSession::Scheduled(SessionRule::idx()), records("I", &idx)).unwrap(),
            ],
            FxRate::default(),
        )
        .unwrap();
        let valuation = Valuation::compute(&holdings);
        prop_assume!(valuation.total_usd > 0.0);

        let sum: f64 = valuation.books.iter().map(|b| b.allocation_pct.unwrap()).sum();
        prop_assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn change_percent_sign_follows_change(assets in prop::collection::vec(asset_strategy(), 1..8)) {
        let records: Vec<AssetRecord> = assets
            .iter()
            .enumerate()
            .map(|(i, (amount, price, change))| {
                AssetRecord::new(&format!("A{i}"), "Asset", *amount, *price, *change)
            })
            .collect();
        let valuation = Valuation::compute(&crypto_only(records));

        if let Some(pct) = valuation.change_pct {
            // base = total - change > 0 whenever a percent is reported
            prop_assert!(valuation.total_usd - valuation.change_usd > 0.0);
            if valuation.change_usd > 0.0 {
                prop_assert!(pct > 0.0);
            } else if valuation.change_usd < 0.0 {
                prop_assert!(pct < 0.0);
            }
        }
        prop_assert!(valuation.total_usd.is_finite());
        prop_assert!(valuation.change_usd.is_finite());
    }
}
