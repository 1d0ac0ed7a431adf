// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use url::Url;

use super::document::Document;
use super::node::{NodeData, NodeId, NodeType};
use crate::error::{Error, Result};

/// Parse an HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with_url(html, None)
}

/// Parse an HTML string with a base URL for resolving form actions
pub fn parse_html_with_url(html: &str, url: Option<Url>) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let doc = match url {
        Some(u) => Document::with_url(u),
        None => Document::new(),
    };

    let root_id = doc.root().id;
    convert_children(&doc, &dom.document, root_id);

    Ok(doc)
}

/// Convert html5ever children into our node storage
fn convert_children(doc: &Document, handle: &Handle, parent_id: NodeId) {
    for child in handle.children.borrow().iter() {
        convert_node(doc, child, parent_id);
    }
}

fn convert_node(doc: &Document, handle: &Handle, parent_id: NodeId) {
    let data = match handle.data {
        RcNodeData::Document => {
            // The document node already exists on our side
            convert_children(doc, handle, parent_id);
            return;
        }
        RcNodeData::Doctype { .. } => {
            let mut data = NodeData::document();
            data.node_type = NodeType::DocumentType;
            data
        }
        RcNodeData::Text { ref contents } => {
            let text = contents.borrow().to_string();
            // Skip whitespace-only text nodes
            if text.trim().is_empty() {
                return;
            }
            NodeData::text(text)
        }
        RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
        RcNodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut data = NodeData::element(name.local.to_string());
            for attr in attrs.borrow().iter() {
                data.attributes
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            data
        }
        RcNodeData::ProcessingInstruction { .. } => return,
    };

    let node_id = NodeId::new();
    {
        let mut nodes = doc.nodes.write();
        let mut data = data;
        data.parent = Some(parent_id);
        nodes.insert(node_id, data);
        if let Some(parent) = nodes.get_mut(&parent_id) {
            parent.children.push(node_id);
        }
    }

    convert_children(doc, handle, node_id);
}
