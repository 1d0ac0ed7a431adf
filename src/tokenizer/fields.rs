// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Payment field discovery
//!
//! Inputs are matched by the role marker attribute, never by their
//! `name`. As a side effect of discovery every matched field has its
//! `name` attribute stripped so a native submit cannot leak raw card
//! data to the merchant's server.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::config::{TokenizerConfig, ROLE_ATTRIBUTE};
use crate::dom::Element;
use crate::error::{Error, Result};

/// Logical role of a payment input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    CardNumber,
    ExpiryMonth,
    ExpiryYear,
    /// CVV / CVC, optional per merchant configuration
    SecurityCode,
    CardHolder,
}

impl FieldRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::CardNumber => "card number",
            FieldRole::ExpiryMonth => "expiry month",
            FieldRole::ExpiryYear => "expiry year",
            FieldRole::SecurityCode => "security code",
            FieldRole::CardHolder => "cardholder name",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The discovered payment inputs of one form
#[derive(Debug, Clone)]
pub struct FieldSet {
    card_number: Element,
    expiry_month: Element,
    expiry_year: Element,
    security_code: Option<Element>,
    card_holder: Element,
}

impl FieldSet {
    /// Discover the payment fields within a form element.
    ///
    /// Every input carrying the role marker attribute is collected; the
    /// configured role names are then resolved against that set. All
    /// roles except the security code must be present.
    pub fn discover(form: &Element, config: &TokenizerConfig) -> Result<Self> {
        let mut by_role: HashMap<String, Element> = HashMap::new();
        for input in form.inputs() {
            if let Some(role) = input.get_attribute(ROLE_ATTRIBUTE) {
                by_role.insert(role, input);
            }
        }

        fn take(
            by_role: &mut HashMap<String, Element>,
            role_name: &str,
            role: FieldRole,
        ) -> Result<Element> {
            by_role
                .remove(role_name)
                .ok_or(Error::MissingField { role })
        }

        let fields = Self {
            card_number: take(&mut by_role, &config.card_number_role, FieldRole::CardNumber)?,
            expiry_month: take(&mut by_role, &config.expiry_month_role, FieldRole::ExpiryMonth)?,
            expiry_year: take(&mut by_role, &config.expiry_year_role, FieldRole::ExpiryYear)?,
            security_code: by_role.remove(&config.security_code_role),
            card_holder: take(&mut by_role, &config.card_holder_role, FieldRole::CardHolder)?,
        };

        // Strip names so field values never ride along on a native submit
        for field in fields.all() {
            field.remove_attribute("name");
        }

        debug!(
            security_code = fields.security_code.is_some(),
            "discovered payment fields"
        );

        Ok(fields)
    }

    fn all(&self) -> Vec<&Element> {
        let mut fields = vec![
            &self.card_number,
            &self.expiry_month,
            &self.expiry_year,
            &self.card_holder,
        ];
        if let Some(ref cvv) = self.security_code {
            fields.push(cvv);
        }
        fields
    }

    /// Current value of the card number input
    pub fn card_number(&self) -> String {
        self.card_number.value().unwrap_or_default()
    }

    /// Current value of the expiry month input
    pub fn expiry_month(&self) -> String {
        self.expiry_month.value().unwrap_or_default()
    }

    /// Current value of the expiry year input
    pub fn expiry_year(&self) -> String {
        self.expiry_year.value().unwrap_or_default()
    }

    /// Current value of the security code input, if the form has one
    pub fn security_code(&self) -> Option<String> {
        self.security_code
            .as_ref()
            .map(|f| f.value().unwrap_or_default())
    }

    /// Current value of the cardholder name input
    pub fn card_holder(&self) -> String {
        self.card_holder.value().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn full_form_html() -> &'static str {
        r#"
            <form id="payment">
                <input data-tokenform="cc-number" name="number" value="4111111111111111">
                <input data-tokenform="cc-expiry-month" name="month" value="11">
                <input data-tokenform="cc-expiry-year" name="year" value="2029">
                <input data-tokenform="cc-cvv" name="cvv" value="123">
                <input data-tokenform="cc-name-on-card" name="holder" value="John Doe">
                <input type="hidden" name="order_id" value="42">
            </form>
        "#
    }

    fn form(html: &str) -> Element {
        parse_html(html).unwrap().forms().pop().unwrap()
    }

    #[test]
    fn test_discovery() {
        let config = TokenizerConfig::default();
        let fields = FieldSet::discover(&form(full_form_html()), &config).unwrap();

        assert_eq!(fields.card_number(), "4111111111111111");
        assert_eq!(fields.expiry_month(), "11");
        assert_eq!(fields.expiry_year(), "2029");
        assert_eq!(fields.security_code(), Some("123".to_string()));
        assert_eq!(fields.card_holder(), "John Doe");
    }

    #[test]
    fn test_names_stripped_after_discovery() {
        let config = TokenizerConfig::default();
        let form = form(full_form_html());
        FieldSet::discover(&form, &config).unwrap();

        for input in form.inputs() {
            if input.has_attribute(ROLE_ATTRIBUTE) {
                assert_eq!(input.name(), None, "{:?}", input.outer_html());
            }
        }
        // non-payment inputs keep their name
        let order = form
            .inputs()
            .into_iter()
            .find(|i| !i.has_attribute(ROLE_ATTRIBUTE))
            .unwrap();
        assert_eq!(order.name(), Some("order_id".to_string()));
    }

    #[test]
    fn test_missing_role_names_the_field() {
        let config = TokenizerConfig::default();
        let html = r#"
            <form>
                <input data-tokenform="cc-number">
                <input data-tokenform="cc-expiry-month">
                <input data-tokenform="cc-name-on-card">
            </form>
        "#;
        let err = FieldSet::discover(&form(html), &config).unwrap_err();
        match err {
            Error::MissingField { role } => assert_eq!(role, FieldRole::ExpiryYear),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_cvv_is_not_an_error() {
        let config = TokenizerConfig::default();
        let html = r#"
            <form>
                <input data-tokenform="cc-number">
                <input data-tokenform="cc-expiry-month">
                <input data-tokenform="cc-expiry-year">
                <input data-tokenform="cc-name-on-card">
            </form>
        "#;
        let fields = FieldSet::discover(&form(html), &config).unwrap();
        assert_eq!(fields.security_code(), None);
    }
}
