//! Market session predicate.
//!
//! A scheduled market is open on local weekdays (Monday to Friday) during the
//! half-open hour window `[open_hour, close_hour)`. Minutes are ignored, so
//! 15:59 is inside a window closing at 16 and 16:00 is outside it.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::error::FolioError;

pub const IDX_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;
pub const IDX_OPEN_HOUR: u32 = 9;
pub const IDX_CLOSE_HOUR: u32 = 16;

/// Parse an IANA timezone identifier such as `Asia/Jakarta`.
pub fn parse_timezone(zone: &str) -> Result<Tz, FolioError> {
    zone.trim()
        .parse::<Tz>()
        .map_err(|_| FolioError::UnknownTimezone {
            zone: zone.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRule {
    pub timezone: Tz,
    pub open_hour: u32,
    pub close_hour: u32,
}

impl SessionRule {
    pub fn new(timezone: Tz, open_hour: u32, close_hour: u32) -> Self {
        SessionRule {
            timezone,
            open_hour,
            close_hour,
        }
    }

    /// Indonesia Stock Exchange regular hours.
    pub fn idx() -> Self {
        SessionRule::new(IDX_TIMEZONE, IDX_OPEN_HOUR, IDX_CLOSE_HOUR)
    }

    pub fn is_open(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.timezone);
        let trading_day = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
        let hour = local.hour();
        trading_day && hour >= self.open_hour && hour < self.close_hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSession {
    AlwaysOpen,
    Scheduled(SessionRule),
}

impl MarketSession {
    pub fn is_open(&self, instant: DateTime<Utc>) -> bool {
        match self {
            MarketSession::AlwaysOpen => true,
            MarketSession::Scheduled(rule) => rule.is_open(instant),
        }
    }

    pub fn status_label(&self, instant: DateTime<Utc>) -> &'static str {
        match self {
            MarketSession::AlwaysOpen => "24/7",
            MarketSession::Scheduled(rule) if rule.is_open(instant) => "OPEN",
            MarketSession::Scheduled(_) => "CLOSED",
        }
    }
}

impl std::fmt::Display for MarketSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketSession::AlwaysOpen => f.write_str("24/7"),
            MarketSession::Scheduled(rule) => write!(
                f,
                "Mon-Fri {:02}:00-{:02}:00 {}",
                rule.open_hour,
                rule.close_hour,
                rule.timezone.name()
            ),
        }
    }
}
