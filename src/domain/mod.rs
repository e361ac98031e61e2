//! Core domain types and logic.

pub mod asset;
pub mod book;
pub mod config_validation;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod holdings;
pub mod session;
pub mod valuation;
