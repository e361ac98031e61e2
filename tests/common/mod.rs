#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use folioview::domain::asset::AssetRecord;
use folioview::domain::book::{Book, BookKind};
use folioview::domain::holdings::{FxRate, Holdings};
use folioview::domain::session::{MarketSession, SessionRule, IDX_TIMEZONE};
use std::io::Write;

/// Two-asset portfolio used for the worked valuation scenario.
pub const SCENARIO_INI: &str = r#"
[fx]
idr_usd = 0.000063

[display]
timezone = Asia/Jakarta

[crypto]
symbols = BTC

[crypto.BTC]
name = Bitcoin
amount = 0.5
price = 67420.50
change_24h = 2.34

[idx]
symbols = BBCA
timezone = Asia/Jakarta
open_hour = 9
close_hour = 16

[idx.BBCA]
name = Bank Central Asia
amount = 500
price = 9875
change_24h = 1.25
"#;

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn jakarta(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    IDX_TIMEZONE
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn scenario_holdings() -> Holdings {
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
    Holdings::new(vec![crypto, idx], FxRate::default()).unwrap()
}

pub fn crypto_only(assets: Vec<AssetRecord>) -> Holdings {
    let book = Book::new(BookKind::Crypto, MarketSession::AlwaysOpen, assets).unwrap();
    Holdings::new(vec![book], FxRate::default()).unwrap()
}
