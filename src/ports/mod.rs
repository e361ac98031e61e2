//! Port traits: the seams between the domain and its collaborators.

pub mod clock_port;
pub mod config_port;
pub mod dashboard_port;
pub mod holdings_port;
