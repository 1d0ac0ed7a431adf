// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! The tokenization client
//!
//! Coordinates the whole flow: field discovery, submit interception,
//! the request/response exchange with the tokenization endpoint, and
//! token injection or error embedding before resubmission.

mod client;
mod config;
mod fields;
mod payload;

pub use client::{FormRef, FormTokenizer, SubmitOutcome, TokenizationFailure};
pub use config::{
    ErrorHandler, ErrorType, TokenCallback, TokenizerConfig, DEFAULT_ENDPOINT, ROLE_ATTRIBUTE,
};
pub use fields::{FieldRole, FieldSet};
pub use payload::{ApiErrorBody, TokenRequest, TokenResponse};
