//! Domain error types.

/// Top-level error type for folioview.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("duplicate symbol {symbol} in {book} book")]
    DuplicateSymbol { book: String, symbol: String },

    #[error("duplicate {book} book")]
    DuplicateBook { book: String },

    #[error("unknown timezone: {zone}")]
    UnknownTimezone { zone: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FolioError> for std::process::ExitCode {
    fn from(err: &FolioError) -> Self {
        let code: u8 = match err {
            FolioError::Io(_) | FolioError::Render { .. } => 1,
            FolioError::ConfigParse { .. }
            | FolioError::ConfigMissing { .. }
            | FolioError::ConfigInvalid { .. } => 2,
            FolioError::DuplicateSymbol { .. } | FolioError::DuplicateBook { .. } => 3,
            FolioError::UnknownTimezone { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
