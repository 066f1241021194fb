//! Kernel error type

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string could not be read back as an identifier
    #[error("Invalid {kind} identifier: {value}")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// A setting is out of its allowed range
    #[error("Configuration error: {key} {message}")]
    Configuration { key: String, message: String },
}

impl CoreError {
    pub fn invalid_identifier(kind: &'static str, value: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            kind,
            value: value.into(),
        }
    }

    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }
}
