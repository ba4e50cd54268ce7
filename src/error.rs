//! Error types for the configuration cascade.

use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// A config file's content did not conform to JSON or INI.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("INI content is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    #[error("invalid INI at line {line}: {message}")]
    Ini { line: usize, message: String },
}

impl ParseError {
    pub fn ini(line: usize, message: impl Into<String>) -> Self {
        Self::Ini {
            line,
            message: message.into(),
        }
    }
}

/// Fatal errors that abort a cascade.
///
/// A missing or unreadable candidate file is never an error; it is skipped.
#[derive(Debug, Error)]
pub enum RcError {
    #[error("invalid application name {0:?}")]
    InvalidAppName(String),

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("configuration cascade failed: {0}")]
    Internal(String),
}

impl RcError {
    pub fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Convert a caught panic payload into an error.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "unknown panic".to_string(),
            },
        };
        Self::Internal(message)
    }
}

/// Result type for cascade operations.
pub type Result<T> = std::result::Result<T, RcError>;
