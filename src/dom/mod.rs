// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM engine for HTML parsing and manipulation
//!
//! Provides a small DOM-like interface built on top of html5ever,
//! covering what a payment form needs: attribute access, input
//! discovery, hidden field injection, and serialization.

mod document;
mod element;
mod node;
mod parser;

pub use document::Document;
pub use element::Element;
pub use node::{Node, NodeId, NodeType};
pub use parser::{parse_html, parse_html_with_url};
