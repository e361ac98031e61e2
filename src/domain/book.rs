//! Books: independently priced collections of holdings sharing a currency.

use serde::Serialize;
use std::collections::HashSet;

use super::asset::AssetRecord;
use super::currency::Currency;
use super::error::FolioError;
use super::session::MarketSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookKind {
    Crypto,
    Idx,
}

impl BookKind {
    pub const ALL: [BookKind; 2] = [BookKind::Crypto, BookKind::Idx];

    pub fn currency(&self) -> Currency {
        match self {
            BookKind::Crypto => Currency::Usd,
            BookKind::Idx => Currency::Idr,
        }
    }

    /// Config section name and JSON key.
    pub fn key(&self) -> &'static str {
        match self {
            BookKind::Crypto => "crypto",
            BookKind::Idx => "idx",
        }
    }

    /// Short market badge label.
    pub fn market_label(&self) -> &'static str {
        match self {
            BookKind::Crypto => "CRYPTO",
            BookKind::Idx => "IDX",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookKind::Crypto => "Cryptocurrency",
            BookKind::Idx => "Indonesia Stock Exchange",
        }
    }
}

impl std::fmt::Display for BookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolListError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

/// Parse a comma-separated symbol list, upper-casing each symbol. A blank
/// list is an empty book.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, SymbolListError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(SymbolListError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(SymbolListError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[derive(Debug, Clone)]
pub struct Book {
    kind: BookKind,
    session: MarketSession,
    assets: Vec<AssetRecord>,
}

impl Book {
    /// Builds a book, rejecting symbols that repeat within it.
    pub fn new(
        kind: BookKind,
        session: MarketSession,
        assets: Vec<AssetRecord>,
    ) -> Result<Self, FolioError> {
        let mut seen = HashSet::new();
        for asset in &assets {
            if !seen.insert(asset.symbol.as_str()) {
                return Err(FolioError::DuplicateSymbol {
                    book: kind.key().to_string(),
                    symbol: asset.symbol.clone(),
                });
            }
        }
        Ok(Book {
            kind,
            session,
            assets,
        })
    }

    pub fn kind(&self) -> BookKind {
        self.kind
    }

    pub fn currency(&self) -> Currency {
        self.kind.currency()
    }

    pub fn session(&self) -> &MarketSession {
        &self.session
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn get(&self, symbol: &str) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Native-currency total value.
    pub fn total_value(&self) -> f64 {
        self.assets.iter().map(AssetRecord::value).sum()
    }

    /// Native-currency weighted 24h change.
    pub fn change_contribution(&self) -> f64 {
        self.assets.iter().map(AssetRecord::change_contribution).sum()
    }
}
