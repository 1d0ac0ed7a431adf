// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Formtoken - Payment Form Tokenization Client
//!
//! A headless client that intercepts a merchant's payment form,
//! exchanges the raw card fields for a one-time token via the
//! tokenization API, and re-injects the token before resubmission -
//! so sensitive card data never reaches the merchant's own server.
//!
//! ## Features
//!
//! - Field discovery: payment inputs are matched by a role marker
//!   attribute (`data-tokenform`), independent of their `name`
//! - Leak protection: discovered fields have their `name` stripped, so
//!   a native submit cannot carry raw card data
//! - Idempotent token injection: the hidden token field is reused by
//!   its reserved element id, never duplicated
//! - Error embedding: failed attempts record type, code and description
//!   as hidden fields for the merchant backend
//! - Custom callbacks: take over token handling instead of letting the
//!   client resubmit the form
//!
//! ## Example
//!
//! ```rust,no_run
//! use formtoken::{parse_html, FormTokenizer, TokenizerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = parse_html(r#"
//!         <form id="payment" action="https://shop.example/checkout" method="post">
//!             <input data-tokenform="cc-number" value="4111111111111111">
//!             <input data-tokenform="cc-expiry-month" value="11">
//!             <input data-tokenform="cc-expiry-year" value="2029">
//!             <input data-tokenform="cc-cvv" value="123">
//!             <input data-tokenform="cc-name-on-card" value="John Doe">
//!         </form>
//!     "#)?;
//!
//!     let config = TokenizerConfig::new("pk_live_example");
//!     let mut tokenizer = FormTokenizer::attach(document, "payment", config)?;
//!
//!     let outcome = tokenizer.submit().await?;
//!     println!("token: {:?}", outcome.token());
//!
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod http;
pub mod tokenizer;

// Re-exports for convenience

// Tokenizer
pub use tokenizer::{
    ErrorHandler, ErrorType, FieldRole, FieldSet, FormRef, FormTokenizer, SubmitOutcome,
    TokenCallback, TokenizationFailure, TokenizerConfig,
};

// DOM
pub use dom::{parse_html, parse_html_with_url, Document, Element, Node};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

/// Formtoken version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
