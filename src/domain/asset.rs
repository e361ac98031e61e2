//! Held asset records.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub price: f64,
    pub change_24h: f64,
}

impl AssetRecord {
    pub fn new(symbol: &str, name: &str, amount: f64, price: f64, change_24h: f64) -> Self {
        AssetRecord {
            symbol: symbol.to_string(),
            name: name.to_string(),
            amount,
            price,
            change_24h,
        }
    }

    /// amount * price, in the book's native currency
    pub fn value(&self) -> f64 {
        self.amount * self.price
    }

    /// Native-currency amount the position moved over the prior 24h,
    /// weighted by its current value.
    pub fn change_contribution(&self) -> f64 {
        self.value() * (self.change_24h / 100.0)
    }

    pub fn is_positive(&self) -> bool {
        self.change_24h >= 0.0
    }
}
