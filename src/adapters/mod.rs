//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod html_dashboard;
pub mod ini_holdings_adapter;
pub mod static_holdings;
pub mod system_clock;
pub mod terminal;
pub mod ticker;
