//! Built-in holdings adapter.

use crate::domain::error::FolioError;
use crate::domain::holdings::{default_holdings, Holdings};
use crate::ports::holdings_port::HoldingsPort;

/// Serves the portfolio compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticHoldings;

impl HoldingsPort for StaticHoldings {
    fn load(&self) -> Result<Holdings, FolioError> {
        default_holdings()
    }

    fn source(&self) -> String {
        "built-in portfolio".to_string()
    }
}
