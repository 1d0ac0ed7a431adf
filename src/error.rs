// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the formtoken client
//!
//! Construction-time failures (bad configuration, missing form fields) are
//! unrecoverable and must be fixed by the integrator. Runtime tokenization
//! failures (transport, API rejection) are recoverable per submission.

use thiserror::Error;

use crate::tokenizer::FieldRole;

/// Result type alias for formtoken operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the formtoken client
#[derive(Error, Debug)]
pub enum Error {
    /// Bad construction input (missing API key, unresolvable form, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required payment field is absent from the form
    #[error("No {role} input field found in the payment form")]
    MissingField { role: FieldRole },

    /// Transport failure: no response, or a non-success HTTP status
    #[error("Connection error: {reason}")]
    Connection {
        reason: String,
        status: Option<u16>,
    },

    /// The tokenization service rejected the request
    #[error("API error {code}: {description}")]
    Api { code: u32, description: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// DOM operation failed
    #[error("DOM error: {0}")]
    Dom(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new DOM error
    pub fn dom<S: Into<String>>(msg: S) -> Self {
        Error::Dom(msg.into())
    }

    /// Create a connection error without a status
    pub fn connection<S: Into<String>>(reason: S) -> Self {
        Error::Connection {
            reason: reason.into(),
            status: None,
        }
    }

    /// Create a connection error with an HTTP status
    pub fn connection_with_status(reason: impl Into<String>, status: u16) -> Self {
        Error::Connection {
            reason: reason.into(),
            status: Some(status),
        }
    }

    /// Create an API error
    pub fn api(code: u32, description: impl Into<String>) -> Self {
        Error::Api {
            code,
            description: description.into(),
        }
    }

    /// Check if this is a construction-time error
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::MissingField { .. })
    }

    /// Check if this is recoverable (the user can retry the submission)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Api { .. } | Error::Http(_)
        )
    }

    /// Get the API error code if available
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Connection { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Dom(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_fatal() {
        let err = Error::config("no public API key found");
        assert!(err.is_config());
        assert!(!err.is_recoverable());

        let err = Error::MissingField {
            role: FieldRole::ExpiryMonth,
        };
        assert!(err.is_config());
        assert!(err.to_string().contains("expiry month"));
    }

    #[test]
    fn test_api_error() {
        let err = Error::api(302, "invalid card");
        assert!(err.is_recoverable());
        assert_eq!(err.code(), Some(302));
        assert_eq!(err.to_string(), "API error 302: invalid card");
    }

    #[test]
    fn test_connection_error() {
        let err = Error::connection_with_status("tokenization endpoint returned 503", 503);
        assert!(err.is_recoverable());
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.code(), None);
    }
}
