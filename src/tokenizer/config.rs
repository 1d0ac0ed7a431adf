// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tokenizer configuration
//!
//! Options are merged over the defaults at construction time and are
//! immutable afterwards. Both handlers default to no-ops, mirroring the
//! hosted client shipped to merchants; integrators who want visible
//! failures must install their own [`ErrorHandler`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Marker attribute identifying a payment input's logical role
pub const ROLE_ATTRIBUTE: &str = "data-tokenform";

/// Default tokenization endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.formtoken.fi/v1/cards/tokens";

/// The two kinds of runtime tokenization failure surfaced to merchants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Transport failure: no response or a non-success HTTP status
    Connection,
    /// The tokenization service rejected the request
    Api,
}

impl ErrorType {
    /// Numeric code recorded in the diagnostic hidden fields
    pub fn code(self) -> u8 {
        match self {
            ErrorType::Connection => 1,
            ErrorType::Api => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::Connection => "connection_error",
            ErrorType::Api => "api_error",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchant-supplied error handler: (type, code, description).
/// Code and description are absent for connection errors.
pub type ErrorHandler = Arc<dyn Fn(ErrorType, Option<u32>, Option<&str>) + Send + Sync>;

/// Merchant-supplied token callback. When set, the form is never
/// auto-resubmitted; the callback owns what happens next.
pub type TokenCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration for a [`FormTokenizer`](crate::tokenizer::FormTokenizer)
#[derive(Clone)]
pub struct TokenizerConfig {
    /// Public API key identifying the merchant, required and non-empty
    pub public_api_key: String,
    /// Tokenization endpoint URL
    pub endpoint: String,
    /// Request timeout for the tokenization exchange
    pub timeout: Duration,

    /// Role name marking the card number input
    pub card_number_role: String,
    /// Role name marking the expiry month input
    pub expiry_month_role: String,
    /// Role name marking the expiry year input
    pub expiry_year_role: String,
    /// Role name marking the CVV input (optional per merchant)
    pub security_code_role: String,
    /// Role name marking the cardholder name input
    pub card_holder_role: String,

    /// Name of the hidden input recording the error type
    pub error_type_input: String,
    /// Name of the hidden input recording the error code
    pub error_code_input: String,
    /// Name of the hidden input recording the error description
    pub error_description_input: String,

    /// Reserved element id of the hidden token input
    pub token_input_id: String,
    /// Name of the hidden token input
    pub token_input_name: String,

    /// Error handler invoked on every tokenization failure
    pub error_handler: ErrorHandler,
    /// Token callback; `None` means the default resubmission behavior
    pub callback_handler: Option<TokenCallback>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            public_api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),

            card_number_role: "cc-number".to_string(),
            expiry_month_role: "cc-expiry-month".to_string(),
            expiry_year_role: "cc-expiry-year".to_string(),
            security_code_role: "cc-cvv".to_string(),
            card_holder_role: "cc-name-on-card".to_string(),

            error_type_input: "formtoken_error_type".to_string(),
            error_code_input: "formtoken_error_code".to_string(),
            error_description_input: "formtoken_error_description".to_string(),

            token_input_id: "formtoken-token".to_string(),
            token_input_name: "formtoken_token".to_string(),

            error_handler: Arc::new(|_, _, _| {}),
            callback_handler: None,
        }
    }
}

impl TokenizerConfig {
    /// Create a config with the given public API key
    pub fn new(public_api_key: impl Into<String>) -> Self {
        Self {
            public_api_key: public_api_key.into(),
            ..Default::default()
        }
    }

    /// Set the tokenization endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the error handler
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(ErrorType, Option<u32>, Option<&str>) + Send + Sync + 'static,
    {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Set a custom token callback, disabling auto-resubmission
    pub fn on_token<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callback_handler = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for TokenizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerConfig")
            .field("public_api_key", &self.public_api_key)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("card_number_role", &self.card_number_role)
            .field("expiry_month_role", &self.expiry_month_role)
            .field("expiry_year_role", &self.expiry_year_role)
            .field("security_code_role", &self.security_code_role)
            .field("card_holder_role", &self.card_holder_role)
            .field("token_input_id", &self.token_input_id)
            .field("token_input_name", &self.token_input_name)
            .field("callback_handler", &self.callback_handler.is_some())
            .finish_non_exhaustive()
    }
}
