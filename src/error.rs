use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store could not be reached (pool exhausted, file missing).
    #[error("connection error: {0}")]
    Connection(String),

    /// The backing store rejected a read or write.
    #[error("database error: {0}")]
    Database(String),

    /// A persisted row could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// True for failures of the persistence layer itself, as opposed to
    /// data it holds but cannot decode.
    #[must_use]
    pub const fn is_store_io(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Database(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_io_classification() {
        assert!(Error::Connection("pool timed out".into()).is_store_io());
        assert!(Error::Database("disk I/O error".into()).is_store_io());
        assert!(!Error::Parse("bad timestamp".into()).is_store_io());
        assert!(!Error::Domain(DomainError::EmptyPostId).is_store_io());
    }

    #[test]
    fn config_error_messages_name_the_field() {
        let err: Error = ConfigError::InvalidValue {
            field: "top_n",
            reason: "must be between 1 and 100".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid value for top_n: must be between 1 and 100"
        );

        let err: Error = ConfigError::MissingField {
            field: "api_tokens",
        }
        .into();
        assert_eq!(err.to_string(), "missing required field: api_tokens");
    }
}
