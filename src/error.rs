// src/error.rs

//! Unified error handling for the PCT sync application.

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Message used whenever the data payload is missing or unusable.
pub const EMPTY_PAYLOAD_MESSAGE: &str = "Empty or invalid JSON content received.";

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote service answered with a non-success status
    #[error("{status} for url: {url}")]
    Transport {
        url: String,
        status: reqwest::StatusCode,
    },

    /// HTTP request failed before a status was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Data response had no usable `value` collection
    #[error("{message}")]
    EmptyPayload { message: String },

    /// User input could not be read as an identifier
    #[error("invalid literal for PCTID: '{input}'")]
    InputParse { input: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Broad error classes, used to pick the message printed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Payload,
    Unexpected,
}

impl AppError {
    /// Create an empty payload error with the standard message.
    pub fn empty_payload() -> Self {
        Self::EmptyPayload {
            message: EMPTY_PAYLOAD_MESSAGE.to_string(),
        }
    }

    /// Create an input parse error for the given raw text.
    pub fn input_parse(input: impl Into<String>) -> Self {
        Self::InputParse {
            input: input.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport { .. } | Self::Http(_) => ErrorCategory::Transport,
            Self::EmptyPayload { .. } => ErrorCategory::Payload,
            _ => ErrorCategory::Unexpected,
        }
    }

    /// Render the error the way the command line reports it.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Error during HTTP request: {self}"),
            ErrorCategory::Payload => format!("Error: {self}"),
            ErrorCategory::Unexpected => format!("An unexpected error occurred: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message() {
        let err = AppError::Transport {
            url: "https://example.com/odata/$metadata".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(
            err.user_message(),
            "Error during HTTP request: 404 Not Found for url: https://example.com/odata/$metadata"
        );
    }

    #[test]
    fn test_payload_message() {
        let err = AppError::empty_payload();
        assert_eq!(err.category(), ErrorCategory::Payload);
        assert_eq!(
            err.user_message(),
            "Error: Empty or invalid JSON content received."
        );
    }

    #[test]
    fn test_input_parse_is_unexpected() {
        let err = AppError::input_parse("abc");
        assert_eq!(err.category(), ErrorCategory::Unexpected);
        assert!(err.user_message().starts_with("An unexpected error occurred:"));
        assert!(err.user_message().contains("'abc'"));
    }
}
