//! Portfolio valuation.
//!
//! Pure function of the holdings and FX rate: per-book totals and weighted
//! 24h change, USD-normalized, then blended into portfolio figures.
//!
//! The change percent is measured against the implied prior-period total
//! (`total - change`). When that base is not strictly positive the percent
//! is not applicable and reported as `None`; allocation is `None` when the
//! portfolio total is zero.

use serde::Serialize;

use super::book::{Book, BookKind};
use super::currency::Currency;
use super::holdings::{FxRate, Holdings};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookValuation {
    pub kind: BookKind,
    pub currency: Currency,
    pub total_native: f64,
    pub total_usd: f64,
    pub change_native: f64,
    pub change_usd: f64,
    pub allocation_pct: Option<f64>,
}

impl BookValuation {
    fn from_book(book: &Book, fx: FxRate) -> Self {
        let currency = book.currency();
        let total_native = book.total_value();
        let change_native = book.change_contribution();
        BookValuation {
            kind: book.kind(),
            currency,
            total_native,
            total_usd: fx.to_usd(total_native, currency),
            change_native,
            change_usd: fx.to_usd(change_native, currency),
            allocation_pct: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub books: Vec<BookValuation>,
    pub total_usd: f64,
    pub change_usd: f64,
    pub change_pct: Option<f64>,
}

impl Valuation {
    pub fn compute(holdings: &Holdings) -> Self {
        let fx = holdings.fx();
        let mut books: Vec<BookValuation> = holdings
            .books()
            .iter()
            .map(|b| BookValuation::from_book(b, fx))
            .collect();

        let total_usd: f64 = books.iter().map(|b| b.total_usd).sum();
        let change_usd: f64 = books.iter().map(|b| b.change_usd).sum();

        for book in &mut books {
            book.allocation_pct = allocation_pct(book.total_usd, total_usd);
        }

        Valuation {
            books,
            total_usd,
            change_usd,
            change_pct: change_pct(total_usd, change_usd),
        }
    }

    pub fn book(&self, kind: BookKind) -> Option<&BookValuation> {
        self.books.iter().find(|b| b.kind == kind)
    }

    pub fn is_gain(&self) -> bool {
        self.change_usd >= 0.0
    }
}

/// `change / (total - change) * 100`, or `None` when the implied base is
/// not strictly positive.
pub fn change_pct(total: f64, change: f64) -> Option<f64> {
    let base = total - change;
    if base.is_nan() || base <= 0.0 {
        return None;
    }
    let pct = change / base * 100.0;
    pct.is_finite().then_some(pct)
}

/// Share of the portfolio total, or `None` for an empty portfolio.
pub fn allocation_pct(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    let pct = part / total * 100.0;
    pct.is_finite().then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetRecord;
    use crate::domain::session::{MarketSession, SessionRule};

    fn scenario() -> Holdings {
        let crypto = Book::new(
            BookKind::Crypto,
            MarketSession::AlwaysOpen,
            vec![AssetRecord::new("BTC", "Bitcoin", 0.5, 67420.50, 2.34)],
        )
        .unwrap();
        let idx = Book::new(
            BookKind::Idx,
            MarketSession::Scheduled(SessionRule::idx()),
            vec![AssetRecord::new("BBCA", "Bank Central Asia", 500.0, 9875.0, 1.25)],
        )
        .unwrap();
        Holdings::new(vec![crypto, idx], FxRate::new(0.000063)).unwrap()
    }

    #[test]
    fn scenario_book_totals() {
        let v = Valuation::compute(&scenario());
        let crypto = v.book(BookKind::Crypto).unwrap();
        let idx = v.book(BookKind::Idx).unwrap();

        assert!((crypto.total_usd - 33710.25).abs() < 1e-9);
        assert!((idx.total_native - 4_937_500.0).abs() < 1e-9);
        assert!((idx.total_usd - 311.0625).abs() < 1e-9);
        assert!((v.total_usd - 34021.3125).abs() < 1e-9);
    }

    #[test]
    fn scenario_change() {
        let v = Valuation::compute(&scenario());
        let idx = v.book(BookKind::Idx).unwrap();
        assert!((idx.change_native - 61_718.75).abs() < 1e-9);
        assert!((idx.change_usd - 3.888_281_25).abs() < 1e-9);

        let expected_change = 33710.25 * 0.0234 + 61_718.75 * 0.000063;
        assert!((v.change_usd - expected_change).abs() < 1e-9);

        let pct = v.change_pct.unwrap();
        assert!((pct - 2.386).abs() < 1e-3, "pct = {pct}");
    }

    #[test]
    fn allocation_sums_to_hundred() {
        let v = Valuation::compute(&scenario());
        let sum: f64 = v.books.iter().filter_map(|b| b.allocation_pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn change_pct_undefined_when_base_not_positive() {
        assert_eq!(change_pct(100.0, 100.0), None);
        assert_eq!(change_pct(100.0, 150.0), None);
        assert_eq!(change_pct(0.0, 0.0), None);
    }

    #[test]
    fn change_pct_sign_follows_change() {
        assert!(change_pct(110.0, 10.0).unwrap() > 0.0);
        assert!(change_pct(90.0, -10.0).unwrap() < 0.0);
        assert!((change_pct(110.0, 10.0).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn empty_portfolio_has_no_allocation() {
        let holdings = Holdings::new(
            vec![Book::new(BookKind::Crypto, MarketSession::AlwaysOpen, Vec::new()).unwrap()],
            FxRate::default(),
        )
        .unwrap();
        let v = Valuation::compute(&holdings);
        assert_eq!(v.total_usd, 0.0);
        assert_eq!(v.change_pct, None);
        assert_eq!(v.books[0].allocation_pct, None);
    }

    #[test]
    fn idempotent() {
        let holdings = scenario();
        assert_eq!(Valuation::compute(&holdings), Valuation::compute(&holdings));
    }
}
