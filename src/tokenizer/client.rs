// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! The form tokenization client
//!
//! `FormTokenizer` attaches to a payment form inside a parsed document,
//! discovers the card inputs, and on submit exchanges their values for
//! a one-time token before the form data ever leaves for the merchant's
//! server.

use tracing::{debug, warn};
use url::Url;

use super::config::{ErrorType, TokenizerConfig};
use super::fields::FieldSet;
use super::payload::{TokenRequest, TokenResponse};
use crate::dom::{Document, Element};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, Request, Response};

/// How to locate the payment form within the document
#[derive(Debug, Clone)]
pub enum FormRef {
    /// Look the form up by element id
    ById(String),
    /// Use a form element directly
    ByElement(Element),
}

impl From<&str> for FormRef {
    fn from(id: &str) -> Self {
        FormRef::ById(id.to_string())
    }
}

impl From<Element> for FormRef {
    fn from(element: Element) -> Self {
        FormRef::ByElement(element)
    }
}

/// Diagnostic record of one failed tokenization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizationFailure {
    pub error_type: ErrorType,
    /// API error code; absent for connection errors
    pub code: Option<u32>,
    /// API error description; absent for connection errors
    pub description: Option<String>,
}

impl TokenizationFailure {
    /// Convert the failure into the crate error type
    pub fn into_error(self) -> Error {
        match self.error_type {
            ErrorType::Connection => Error::connection("tokenization request failed"),
            ErrorType::Api => Error::api(
                self.code.unwrap_or_default(),
                self.description.unwrap_or_default(),
            ),
        }
    }
}

/// Outcome of one submit cycle
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Token obtained; the caller-supplied callback was invoked and now
    /// owns what happens next
    Callback { token: String },
    /// Token obtained and the form was natively resubmitted with the
    /// token attached
    Resubmitted { token: String, response: Response },
    /// Tokenization failed; diagnostics were embedded in the form and
    /// the error handler invoked
    Failed { failure: TokenizationFailure },
    /// The already-resubmitted form passed through without interception
    PassedThrough { response: Response },
}

impl SubmitOutcome {
    /// The token, when this outcome produced one
    pub fn token(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Callback { token } => Some(token),
            SubmitOutcome::Resubmitted { token, .. } => Some(token),
            _ => None,
        }
    }
}

/// Client coordinating the tokenization flow for one payment form
#[derive(Debug)]
pub struct FormTokenizer {
    config: TokenizerConfig,
    client: HttpClient,
    document: Document,
    form: Element,
    fields: FieldSet,
    /// Whether the caller overrode the default token callback
    callback_overridden: bool,
    /// Set exactly once, when the form is programmatically resubmitted
    resubmitted: bool,
}

impl FormTokenizer {
    /// Attach a tokenizer to a payment form.
    ///
    /// Fails with [`Error::Config`] when the API key is empty, the
    /// endpoint is malformed, the form reference does not resolve, or
    /// the resolved element is not a `<form>`; with
    /// [`Error::MissingField`] when a required payment input is absent.
    pub fn attach(
        document: Document,
        form: impl Into<FormRef>,
        config: TokenizerConfig,
    ) -> Result<Self> {
        if config.public_api_key.is_empty() {
            return Err(Error::config("no public API key found"));
        }
        Url::parse(&config.endpoint)
            .map_err(|e| Error::config(format!("malformed endpoint URL: {e}")))?;

        let form = match form.into() {
            FormRef::ById(id) => {
                if id.is_empty() {
                    return Err(Error::config("empty payment form id"));
                }
                document
                    .get_element_by_id(&id)
                    .ok_or_else(|| Error::config(format!("no element with id '{id}'")))?
            }
            FormRef::ByElement(element) => element,
        };

        if form.local_name() != "form" {
            return Err(Error::config(format!(
                "payment form reference resolved to a <{}> element",
                form.local_name()
            )));
        }

        let fields = FieldSet::discover(&form, &config)?;

        let client = HttpClient::with_config(HttpClientConfig {
            timeout: config.timeout,
            ..Default::default()
        })?;

        let callback_overridden = config.callback_handler.is_some();

        debug!(
            endpoint = %config.endpoint,
            callback_overridden,
            "attached to payment form"
        );

        Ok(Self {
            config,
            client,
            document,
            form,
            fields,
            callback_overridden,
            resubmitted: false,
        })
    }

    /// Handle a submit of the payment form.
    ///
    /// With the default callback, the first submit is intercepted and
    /// tokenized, and the second (programmatic) submit passes through
    /// natively with the token attached. With a custom callback every
    /// submit is intercepted, since the client never resubmits itself.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.callback_overridden && self.resubmitted {
            let response = self.native_submit().await?;
            return Ok(SubmitOutcome::PassedThrough { response });
        }
        self.tokenize().await
    }

    /// Exchange the current field values for a one-time token
    async fn tokenize(&mut self) -> Result<SubmitOutcome> {
        let payload = TokenRequest::from_fields(&self.config.public_api_key, &self.fields);
        let form = payload.into_form();

        let request = Request::post(&self.config.endpoint)?
            .form(form.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "tokenization request failed");
                return Ok(self.fail(ErrorType::Connection, None, None));
            }
        };

        if !response.is_success() {
            debug!(
                status = response.status_code(),
                "tokenization endpoint returned non-success status"
            );
            return Ok(self.fail(ErrorType::Connection, None, None));
        }

        let body: TokenResponse = match response.json() {
            Ok(body) => body,
            Err(_) => {
                debug!("tokenization endpoint returned a malformed body");
                return Ok(self.fail(ErrorType::Connection, None, None));
            }
        };

        if body.success {
            match body.token {
                Some(token) => self.handle_token(token).await,
                // success without a token is a broken response
                None => Ok(self.fail(ErrorType::Connection, None, None)),
            }
        } else {
            let (code, description) = match body.error {
                Some(e) => (Some(e.error_number), Some(e.error_description)),
                None => (None, None),
            };
            Ok(self.fail(ErrorType::Api, code, description))
        }
    }

    /// Write the token into the reserved hidden field and either invoke
    /// the custom callback or resubmit the form natively.
    async fn handle_token(&mut self, token: String) -> Result<SubmitOutcome> {
        let token_field = match self.document.get_element_by_id(&self.config.token_input_id) {
            Some(field) => field,
            None => {
                let field =
                    self.append_hidden_input(&self.config.token_input_name, &token);
                field.set_attribute("id", &self.config.token_input_id);
                field
            }
        };
        token_field.set_value(&token);

        if let Some(ref callback) = self.config.callback_handler {
            callback(&token);
            return Ok(SubmitOutcome::Callback { token });
        }

        self.resubmitted = true;
        let response = self.native_submit().await?;
        Ok(SubmitOutcome::Resubmitted { token, response })
    }

    /// Trigger an error event: invoke the configured handler and embed
    /// the diagnostics as hidden fields, so a native fallback submit
    /// still carries them to the merchant backend.
    fn fail(
        &self,
        error_type: ErrorType,
        code: Option<u32>,
        description: Option<String>,
    ) -> SubmitOutcome {
        warn!(%error_type, ?code, ?description, "tokenization failed");

        (self.config.error_handler)(error_type, code, description.as_deref());

        self.append_hidden_input(
            &self.config.error_type_input,
            &error_type.code().to_string(),
        );
        self.append_hidden_input(
            &self.config.error_code_input,
            &code.map(|c| c.to_string()).unwrap_or_default(),
        );
        self.append_hidden_input(
            &self.config.error_description_input,
            description.as_deref().unwrap_or(""),
        );

        SubmitOutcome::Failed {
            failure: TokenizationFailure {
                error_type,
                code,
                description,
            },
        }
    }

    /// Append a hidden input field to the payment form
    fn append_hidden_input(&self, name: &str, value: &str) -> Element {
        let input = self.document.create_element("input");
        input.set_attribute("type", "hidden");
        input.set_attribute("name", name);
        input.set_attribute("value", value);
        self.form.append_child(&input);
        input
    }

    /// Submit the form natively: POST (or GET) the remaining named
    /// fields to the resolved form action. The stripped card inputs
    /// carry no name, so their values are not part of this submission.
    async fn native_submit(&self) -> Result<Response> {
        let action = self.resolve_action()?;

        let data: Vec<(String, String)> = self
            .form
            .inputs()
            .into_iter()
            .filter(|input| !input.disabled())
            .filter_map(|input| {
                input
                    .name()
                    .map(|name| (name, input.value().unwrap_or_default()))
            })
            .collect();

        let method = self
            .form
            .get_attribute("method")
            .unwrap_or_default()
            .to_lowercase();

        let request = if method == "post" {
            Request::post(&action)?
                .form(data.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        } else {
            let mut url = Url::parse(&action)?;
            for (key, value) in &data {
                url.query_pairs_mut().append_pair(key, value);
            }
            Request::get(url.as_str())?
        };

        debug!(action = %action, fields = data.len(), "native form submission");
        self.client.execute(request).await
    }

    /// Resolve the form action against the document URL
    fn resolve_action(&self) -> Result<String> {
        let action = self.form.get_attribute("action").unwrap_or_default();

        if action.is_empty() {
            // Submit to the current document URL
            self.document
                .url
                .as_ref()
                .map(|u| u.to_string())
                .ok_or_else(|| Error::dom("no base URL for form submission"))
        } else if action.starts_with("http://") || action.starts_with("https://") {
            Ok(action)
        } else if let Some(ref base) = self.document.url {
            base.join(&action)
                .map(|u| u.to_string())
                .map_err(|e| Error::dom(e.to_string()))
        } else {
            Err(Error::dom("cannot resolve relative form action"))
        }
    }

    /// Get the attached form element
    pub fn form(&self) -> &Element {
        &self.form
    }

    /// Get the document holding the form
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the configuration
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Whether the form was already programmatically resubmitted
    pub fn was_resubmitted(&self) -> bool {
        self.resubmitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    const PAYMENT_FORM: &str = r#"
        <form id="payment" action="https://shop.example/checkout" method="post">
            <input data-tokenform="cc-number" name="number" value="4111111111111111">
            <input data-tokenform="cc-expiry-month" name="month" value="11">
            <input data-tokenform="cc-expiry-year" name="year" value="2029">
            <input data-tokenform="cc-cvv" name="cvv" value="123">
            <input data-tokenform="cc-name-on-card" name="holder" value="John Doe">
        </form>
    "#;

    #[test]
    fn test_attach_by_id() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let tokenizer =
            FormTokenizer::attach(doc, "payment", TokenizerConfig::new("pk_test")).unwrap();
        assert!(!tokenizer.was_resubmitted());
    }

    #[test]
    fn test_attach_by_element() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let form = doc.forms().pop().unwrap();
        assert!(FormTokenizer::attach(doc, form, TokenizerConfig::new("pk_test")).is_ok());
    }

    #[test]
    fn test_attach_requires_api_key() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let err =
            FormTokenizer::attach(doc, "payment", TokenizerConfig::default()).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_attach_rejects_unknown_id() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let err =
            FormTokenizer::attach(doc, "missing", TokenizerConfig::new("pk_test")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_attach_rejects_non_form_element() {
        let doc = parse_html("<div id=\"payment\"></div>").unwrap();
        let err =
            FormTokenizer::attach(doc, "payment", TokenizerConfig::new("pk_test")).unwrap_err();
        assert!(err.to_string().contains("<div>"));
    }

    #[test]
    fn test_attach_rejects_malformed_endpoint() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let config = TokenizerConfig::new("pk_test").endpoint("not a url");
        let err = FormTokenizer::attach(doc, "payment", config).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_field_names_stripped_on_attach() {
        let doc = parse_html(PAYMENT_FORM).unwrap();
        let tokenizer =
            FormTokenizer::attach(doc, "payment", TokenizerConfig::new("pk_test")).unwrap();

        for input in tokenizer.form().inputs() {
            assert_eq!(input.name(), None);
        }
    }

    #[test]
    fn test_failure_into_error() {
        let failure = TokenizationFailure {
            error_type: ErrorType::Api,
            code: Some(302),
            description: Some("invalid card".to_string()),
        };
        let err = failure.into_error();
        assert!(err.is_recoverable());
        assert_eq!(err.code(), Some(302));
    }

    #[test]
    fn test_resolve_relative_action() {
        let url = Url::parse("https://shop.example/pay").unwrap();
        let html = PAYMENT_FORM.replace("https://shop.example/checkout", "/checkout");
        let doc = crate::dom::parse_html_with_url(&html, Some(url)).unwrap();
        let tokenizer =
            FormTokenizer::attach(doc, "payment", TokenizerConfig::new("pk_test")).unwrap();

        assert_eq!(
            tokenizer.resolve_action().unwrap(),
            "https://shop.example/checkout"
        );
    }
}
