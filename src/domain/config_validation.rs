//! Holdings configuration validation.
//!
//! Validates every field of a holdings file before any book is built, so the
//! valuation core only ever sees finite, non-negative amounts and prices, a
//! positive FX rate and known timezones.

use chrono_tz::Tz;

use crate::domain::book::{parse_symbols, BookKind, SymbolListError};
use crate::domain::error::FolioError;
use crate::domain::session::{parse_timezone, MarketSession, SessionRule, IDX_CLOSE_HOUR, IDX_OPEN_HOUR};
use crate::ports::config_port::ConfigPort;

pub const FX_SECTION: &str = "fx";
pub const DISPLAY_SECTION: &str = "display";

pub fn validate_holdings_config(config: &dyn ConfigPort) -> Result<(), FolioError> {
    validate_fx(config)?;
    validate_display(config)?;
    for kind in BookKind::ALL {
        validate_book(config, kind)?;
    }
    Ok(())
}

fn validate_fx(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(rate) = optional_number(config, FX_SECTION, "idr_usd")? {
        if rate <= 0.0 {
            return Err(invalid(FX_SECTION, "idr_usd", "idr_usd must be positive"));
        }
    }
    Ok(())
}

fn validate_display(config: &dyn ConfigPort) -> Result<(), FolioError> {
    display_timezone(config).map(|_| ())
}

fn validate_book(config: &dyn ConfigPort, kind: BookKind) -> Result<(), FolioError> {
    let symbols = book_symbols(config, kind)?;
    book_session(config, kind)?;

    for symbol in &symbols {
        let section = asset_section(kind, symbol);
        if !config.has_section(&section) {
            return Err(FolioError::ConfigMissing {
                section,
                key: "amount".to_string(),
            });
        }
        for key in ["amount", "price"] {
            if require_number(config, &section, key)? < 0.0 {
                return Err(invalid(&section, key, &format!("{key} must be non-negative")));
            }
        }
        require_number(config, &section, "change_24h")?;
    }
    Ok(())
}

/// Section holding one asset's fields, e.g. `crypto.BTC`.
pub fn asset_section(kind: BookKind, symbol: &str) -> String {
    format!("{}.{}", kind.key(), symbol)
}

/// Symbols listed for a book; an absent book section is an empty book.
pub fn book_symbols(config: &dyn ConfigPort, kind: BookKind) -> Result<Vec<String>, FolioError> {
    if !config.has_section(kind.key()) {
        return Ok(Vec::new());
    }
    let raw = config
        .get_string(kind.key(), "symbols")
        .ok_or_else(|| FolioError::ConfigMissing {
            section: kind.key().to_string(),
            key: "symbols".to_string(),
        })?;
    parse_symbols(&raw).map_err(|e| match e {
        SymbolListError::DuplicateSymbol(symbol) => FolioError::DuplicateSymbol {
            book: kind.key().to_string(),
            symbol,
        },
        SymbolListError::EmptyToken => invalid(kind.key(), "symbols", &e.to_string()),
    })
}

/// Session rule for a book. A `timezone` key schedules the book; without one
/// crypto trades around the clock and IDX keeps its regular hours.
pub fn book_session(config: &dyn ConfigPort, kind: BookKind) -> Result<MarketSession, FolioError> {
    let section = kind.key();
    let zone = config.get_string(section, "timezone");

    let timezone = match (zone, kind) {
        (Some(z), _) => parse_timezone(&z)?,
        (None, BookKind::Crypto) => return Ok(MarketSession::AlwaysOpen),
        (None, BookKind::Idx) => SessionRule::idx().timezone,
    };

    let open_hour = hour(config, section, "open_hour", IDX_OPEN_HOUR)?;
    let close_hour = hour(config, section, "close_hour", IDX_CLOSE_HOUR)?;
    if open_hour >= close_hour {
        return Err(invalid(section, "open_hour", "open_hour must be before close_hour"));
    }

    Ok(MarketSession::Scheduled(SessionRule::new(
        timezone, open_hour, close_hour,
    )))
}

/// `[display] timezone`, if configured.
pub fn display_timezone(config: &dyn ConfigPort) -> Result<Option<Tz>, FolioError> {
    config
        .get_string(DISPLAY_SECTION, "timezone")
        .filter(|z| !z.trim().is_empty())
        .map(|z| parse_timezone(&z))
        .transpose()
}

fn hour(config: &dyn ConfigPort, section: &str, key: &str, default: u32) -> Result<u32, FolioError> {
    match optional_number(config, section, key)? {
        None => Ok(default),
        Some(h) if h.fract() == 0.0 && (0.0..=24.0).contains(&h) => Ok(h as u32),
        Some(_) => Err(invalid(section, key, "hour must be a whole number between 0 and 24")),
    }
}

/// A finite number that must be present.
pub fn require_number(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, FolioError> {
    optional_number(config, section, key)?.ok_or_else(|| FolioError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    })
}

/// A finite number if the key is present; a present but unparseable or
/// non-finite value is an error rather than a silent default.
pub fn optional_number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, FolioError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(invalid(section, key, &format!("expected a finite number, got {raw:?}"))),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> FolioError {
    FolioError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
