//! Holdings loaded from an INI file.
//!
//! ```ini
//! [fx]
//! idr_usd = 0.000063
//!
//! [crypto]
//! symbols = BTC,ETH
//!
//! [crypto.BTC]
//! name = Bitcoin
//! amount = 0.5
//! price = 67420.50
//! change_24h = 2.34
//! ```

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tracing::debug;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::asset::AssetRecord;
use crate::domain::book::{Book, BookKind};
use crate::domain::config_validation::{
    asset_section, book_session, book_symbols, display_timezone, optional_number,
    require_number, validate_holdings_config, FX_SECTION,
};
use crate::domain::error::FolioError;
use crate::domain::holdings::{FxRate, Holdings, DEFAULT_IDR_TO_USD};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;

pub struct IniHoldingsAdapter {
    path: PathBuf,
}

impl IniHoldingsAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        IniHoldingsAdapter {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Holdings and the `[display] timezone` from one parse of the file.
    pub fn load_with_display_timezone(&self) -> Result<(Holdings, Option<Tz>), FolioError> {
        let config = self.config()?;
        let holdings = build_holdings(&config)?;
        Ok((holdings, display_timezone(&config)?))
    }

    fn config(&self) -> Result<FileConfigAdapter, FolioError> {
        FileConfigAdapter::from_file(&self.path).map_err(|e| FolioError::ConfigParse {
            file: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl HoldingsPort for IniHoldingsAdapter {
    fn load(&self) -> Result<Holdings, FolioError> {
        build_holdings(&self.config()?)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// Validate a holdings configuration and build the store from it.
pub fn build_holdings(config: &dyn ConfigPort) -> Result<Holdings, FolioError> {
    validate_holdings_config(config)?;

    let fx = FxRate::new(optional_number(config, FX_SECTION, "idr_usd")?.unwrap_or(DEFAULT_IDR_TO_USD));

    let mut books = Vec::with_capacity(BookKind::ALL.len());
    for kind in BookKind::ALL {
        if !config.has_section(kind.key()) {
            continue;
        }
        let book = build_book(config, kind)?;
        debug!(book = %kind, assets = book.assets().len(), "loaded book");
        books.push(book);
    }

    Holdings::new(books, fx)
}

fn build_book(config: &dyn ConfigPort, kind: BookKind) -> Result<Book, FolioError> {
    let session = book_session(config, kind)?;
    let assets = book_symbols(config, kind)?
        .iter()
        .map(|symbol| build_asset(config, kind, symbol))
        .collect::<Result<Vec<_>, _>>()?;
    Book::new(kind, session, assets)
}

fn build_asset(config: &dyn ConfigPort, kind: BookKind, symbol: &str) -> Result<AssetRecord, FolioError> {
    let section = asset_section(kind, symbol);
    let name = config
        .get_string(&section, "name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| symbol.to_string());

    Ok(AssetRecord {
        symbol: symbol.to_string(),
        name,
        amount: require_number(config, &section, "amount")?,
        price: require_number(config, &section, "price")?,
        change_24h: require_number(config, &section, "change_24h")?,
    })
}
