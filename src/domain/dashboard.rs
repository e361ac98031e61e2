//! Read-only dashboard view consumed by the renderers.
//!
//! Everything a renderer shows is derived here from the holdings, their
//! valuation and one reference instant, so renderers never do arithmetic.

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::asset::AssetRecord;
use super::book::{Book, BookKind};
use super::currency::{
    format_allocation, format_change_percent, format_money, format_quantity,
    format_signed_money, format_signed_percent, format_usd_equivalent, Currency,
};
use super::holdings::{FxRate, Holdings};
use super::valuation::Valuation;

/// Which book sections are shown. The summary always covers every book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Only(BookKind),
}

impl ViewFilter {
    pub fn shows(&self, kind: BookKind) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Only(k) => *k == kind,
        }
    }
}

/// Timezone the header clock is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Named(Tz),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockDisplay {
    pub time: String,
    pub date: String,
    pub timezone: String,
}

impl ClockDisplay {
    pub fn at(instant: DateTime<Utc>, zone: DisplayZone) -> Self {
        match zone {
            DisplayZone::Local => Self::from_local(&instant.with_timezone(&Local), "local"),
            DisplayZone::Named(tz) => Self::from_local(&instant.with_timezone(&tz), tz.name()),
        }
    }

    fn from_local<T: TimeZone>(local: &DateTime<T>, zone_name: &str) -> Self
    where
        T::Offset: std::fmt::Display,
    {
        ClockDisplay {
            time: local.format("%H:%M:%S").to_string(),
            date: local.format("%a, %b %d, %Y").to_string().to_uppercase(),
            timezone: zone_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketBadge {
    pub market: String,
    pub status: String,
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetCard {
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub price: f64,
    pub change_24h: f64,
    pub value: f64,
    pub currency: Currency,
    pub positive: bool,
    pub amount_display: String,
    pub price_display: String,
    pub change_display: String,
    pub value_display: String,
    /// USD equivalent shown beneath non-USD values.
    pub value_secondary: Option<String>,
}

impl AssetCard {
    fn from_record(asset: &AssetRecord, currency: Currency, fx: FxRate) -> Self {
        let value = asset.value();
        let value_secondary = match currency {
            Currency::Usd => None,
            other => Some(format_usd_equivalent(fx.to_usd(value, other))),
        };
        AssetCard {
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            amount: asset.amount,
            price: asset.price,
            change_24h: asset.change_24h,
            value,
            currency,
            positive: asset.is_positive(),
            amount_display: format!("{} {}", format_quantity(asset.amount), asset.symbol),
            price_display: format_money(asset.price, currency),
            change_display: format_signed_percent(asset.change_24h),
            value_display: format_money(value, currency),
            value_secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSection {
    pub kind: BookKind,
    pub title: String,
    pub currency: Currency,
    pub is_open: bool,
    pub cards: Vec<AssetCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub kind: BookKind,
    pub label: String,
    pub subtotal_usd: f64,
    pub allocation_pct: Option<f64>,
    pub subtotal_display: String,
    pub allocation_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_usd: f64,
    pub change_usd: f64,
    pub change_pct: Option<f64>,
    pub positive: bool,
    pub total_display: String,
    pub change_display: String,
    pub change_pct_display: String,
    pub allocations: Vec<AllocationSlice>,
}

impl Summary {
    fn from_valuation(valuation: &Valuation) -> Self {
        let allocations = valuation
            .books
            .iter()
            .map(|b| AllocationSlice {
                kind: b.kind,
                label: b.kind.market_label().to_string(),
                subtotal_usd: b.total_usd,
                allocation_pct: b.allocation_pct,
                subtotal_display: format_money(b.total_usd, Currency::Usd),
                allocation_display: format_allocation(b.allocation_pct),
            })
            .collect();

        Summary {
            total_usd: valuation.total_usd,
            change_usd: valuation.change_usd,
            change_pct: valuation.change_pct,
            positive: valuation.is_gain(),
            total_display: format_money(valuation.total_usd, Currency::Usd),
            change_display: format_signed_money(valuation.change_usd, Currency::Usd),
            change_pct_display: format_change_percent(valuation.change_pct),
            allocations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub clock: ClockDisplay,
    pub markets: Vec<MarketBadge>,
    pub summary: Summary,
    pub sections: Vec<BookSection>,
}

impl DashboardView {
    pub fn build(
        holdings: &Holdings,
        valuation: &Valuation,
        instant: DateTime<Utc>,
        zone: DisplayZone,
        filter: ViewFilter,
    ) -> Self {
        let fx = holdings.fx();

        let markets = holdings
            .books()
            .iter()
            .map(|book| MarketBadge {
                market: book.kind().market_label().to_string(),
                status: book.session().status_label(instant).to_string(),
                is_open: book.session().is_open(instant),
            })
            .collect();

        let sections = holdings
            .books()
            .iter()
            .filter(|book| filter.shows(book.kind()))
            .map(|book| section(book, fx, instant))
            .collect();

        DashboardView {
            clock: ClockDisplay::at(instant, zone),
            markets,
            summary: Summary::from_valuation(valuation),
            sections,
        }
    }

    pub fn market(&self, label: &str) -> Option<&MarketBadge> {
        self.markets.iter().find(|m| m.market == label)
    }
}

fn section(book: &Book, fx: FxRate, instant: DateTime<Utc>) -> BookSection {
    let currency = book.currency();
    BookSection {
        kind: book.kind(),
        title: book.kind().title().to_string(),
        currency,
        is_open: book.session().is_open(instant),
        cards: book
            .assets()
            .iter()
            .map(|a| AssetCard::from_record(a, currency, fx))
            .collect(),
    }
}
