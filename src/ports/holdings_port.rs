//! Holdings source port trait.
//!
//! The valuation core only ever sees a [`Holdings`] value; where it came
//! from (built-in literals, a config file) is an adapter concern.

use crate::domain::error::FolioError;
use crate::domain::holdings::Holdings;

pub trait HoldingsPort {
    fn load(&self) -> Result<Holdings, FolioError>;

    /// Human-readable description of where the holdings come from.
    fn source(&self) -> String;
}
