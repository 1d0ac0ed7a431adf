// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tokenization request and response payloads
//!
//! The request is transient: built at submit time, consumed by one
//! form-encoded POST, never stored. Its `Debug` output redacts the
//! card fields so raw card data cannot leak through logging.

use std::fmt;

use serde::Deserialize;

use super::fields::FieldSet;

/// Form-encoded request sent to the tokenization endpoint
#[derive(Clone)]
pub struct TokenRequest {
    pub public_api_key: String,
    pub card_number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub name_on_card: String,
    pub card_code: Option<String>,
}

impl TokenRequest {
    /// Build the payload from the API key and current field values
    pub fn from_fields(public_api_key: &str, fields: &FieldSet) -> Self {
        Self {
            public_api_key: public_api_key.to_string(),
            card_number: fields.card_number(),
            expiration_month: fields.expiry_month(),
            expiration_year: fields.expiry_year(),
            name_on_card: fields.card_holder(),
            card_code: fields.security_code(),
        }
    }

    /// Consume the payload into form fields, in wire order
    pub fn into_form(self) -> Vec<(String, String)> {
        let mut form = vec![
            ("public_api_key".to_string(), self.public_api_key),
            ("card_number".to_string(), self.card_number),
            ("expiration_month".to_string(), self.expiration_month),
            ("expiration_year".to_string(), self.expiration_year),
            ("name_on_card".to_string(), self.name_on_card),
        ];
        if let Some(code) = self.card_code {
            form.push(("card_code".to_string(), code));
        }
        form
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("public_api_key", &self.public_api_key)
            .field("card_number", &"[redacted]")
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("name_on_card", &"[redacted]")
            .field("card_code", &self.card_code.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// JSON response returned by the tokenization endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Whether tokenization succeeded
    pub success: bool,
    /// One-time token, present on success
    #[serde(default)]
    pub token: Option<String>,
    /// Error details, present on failure
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Error body of a rejected tokenization request
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error_number: u32,
    pub error_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::tokenizer::config::TokenizerConfig;

    fn fields(html: &str) -> FieldSet {
        let form = parse_html(html).unwrap().forms().pop().unwrap();
        FieldSet::discover(&form, &TokenizerConfig::default()).unwrap()
    }

    const FORM: &str = r#"
        <form>
            <input data-tokenform="cc-number" value="4111111111111111">
            <input data-tokenform="cc-expiry-month" value="11">
            <input data-tokenform="cc-expiry-year" value="2029">
            <input data-tokenform="cc-cvv" value="123">
            <input data-tokenform="cc-name-on-card" value="John Doe">
        </form>
    "#;

    #[test]
    fn test_into_form() {
        let payload = TokenRequest::from_fields("pk_test", &fields(FORM));
        let form = payload.into_form();

        assert_eq!(form[0], ("public_api_key".to_string(), "pk_test".to_string()));
        assert_eq!(
            form[1],
            ("card_number".to_string(), "4111111111111111".to_string())
        );
        assert_eq!(form[5], ("card_code".to_string(), "123".to_string()));
    }

    #[test]
    fn test_card_code_omitted_when_absent() {
        let html = r#"
            <form>
                <input data-tokenform="cc-number" value="4111111111111111">
                <input data-tokenform="cc-expiry-month" value="11">
                <input data-tokenform="cc-expiry-year" value="2029">
                <input data-tokenform="cc-name-on-card" value="John Doe">
            </form>
        "#;
        let payload = TokenRequest::from_fields("pk_test", &fields(html));
        let form = payload.into_form();
        assert!(form.iter().all(|(k, _)| k != "card_code"));
    }

    #[test]
    fn test_debug_redacts_card_data() {
        let payload = TokenRequest::from_fields("pk_test", &fields(FORM));
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123"));
        assert!(!debug.contains("John Doe"));
        assert!(debug.contains("pk_test"));
    }

    #[test]
    fn test_response_parsing() {
        let ok: TokenResponse =
            serde_json::from_str(r#"{"success": true, "token": "tok_abc"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.token.as_deref(), Some("tok_abc"));

        let err: TokenResponse = serde_json::from_str(
            r#"{"success": false, "error": {"error_number": 302, "error_description": "invalid card"}}"#,
        )
        .unwrap();
        assert!(!err.success);
        let body = err.error.unwrap();
        assert_eq!(body.error_number, 302);
        assert_eq!(body.error_description, "invalid card");
    }
}
