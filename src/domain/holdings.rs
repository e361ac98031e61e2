//! Immutable holdings store and FX conversion.

use super::asset::AssetRecord;
use super::book::{Book, BookKind};
use super::currency::Currency;
use super::error::FolioError;
use super::session::{MarketSession, SessionRule};

pub const DEFAULT_IDR_TO_USD: f64 = 0.000063;

/// Fixed conversion into the USD reporting currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxRate {
    pub idr_to_usd: f64,
}

impl FxRate {
    pub fn new(idr_to_usd: f64) -> Self {
        FxRate { idr_to_usd }
    }

    pub fn to_usd(&self, amount: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => amount,
            Currency::Idr => amount * self.idr_to_usd,
        }
    }
}

impl Default for FxRate {
    fn default() -> Self {
        FxRate::new(DEFAULT_IDR_TO_USD)
    }
}

/// All books plus the FX rate they are reported with. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Holdings {
    books: Vec<Book>,
    fx: FxRate,
}

impl Holdings {
    /// Each `BookKind` may appear at most once.
    pub fn new(books: Vec<Book>, fx: FxRate) -> Result<Self, FolioError> {
        for (i, book) in books.iter().enumerate() {
            if books[..i].iter().any(|b| b.kind() == book.kind()) {
                return Err(FolioError::DuplicateBook {
                    book: book.kind().key().to_string(),
                });
            }
        }
        Ok(Holdings { books, fx })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, kind: BookKind) -> Option<&Book> {
        self.books.iter().find(|b| b.kind() == kind)
    }

    pub fn fx(&self) -> FxRate {
        self.fx
    }

    pub fn asset_count(&self) -> usize {
        self.books.iter().map(|b| b.assets().len()).sum()
    }
}

/// The portfolio the dashboard ships with.
pub fn default_holdings() -> Result<Holdings, FolioError> {
    let crypto = Book::new(
        BookKind::Crypto,
        MarketSession::AlwaysOpen,
        vec![
            AssetRecord::new("BTC", "Bitcoin", 0.5, 67420.50, 2.34),
            AssetRecord::new("ETH", "Ethereum", 3.2, 3891.20, -1.12),
            AssetRecord::new("SOL", "Solana", 25.0, 172.45, 5.67),
            AssetRecord::new("AVAX", "Avalanche", 40.0, 38.92, 3.21),
        ],
    )?;

    let idx = Book::new(
        BookKind::Idx,
        MarketSession::Scheduled(SessionRule::idx()),
        vec![
            AssetRecord::new("BBCA", "Bank Central Asia", 500.0, 9875.0, 1.25),
            AssetRecord::new("TLKM", "Telkom Indonesia", 1000.0, 3450.0, -0.58),
            AssetRecord::new("BBRI", "Bank Rakyat Indonesia", 800.0, 5125.0, 2.10),
            AssetRecord::new("ASII", "Astra International", 300.0, 4950.0, -1.85),
        ],
    )?;

    Holdings::new(vec![crypto, idx], FxRate::default())
}
