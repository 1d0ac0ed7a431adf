// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM node types

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <form>, <input>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name (for elements, lowercase)
    pub tag_name: Option<String>,
    /// Text content (for text/comment nodes)
    pub text_content: Option<String>,
    /// Attributes (for elements)
    pub attributes: HashMap<String, String>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs, in document order
    pub children: Vec<NodeId>,
}

impl NodeData {
    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Element,
            tag_name: Some(tag_name.into().to_lowercase()),
            text_content: None,
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text,
            tag_name: None,
            text_content: Some(content.into()),
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Comment,
            tag_name: None,
            text_content: Some(content.into()),
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            tag_name: None,
            text_content: None,
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Shared node storage for a document tree
pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Reference to the document's node storage
    nodes: NodeStore,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, nodes: NodeStore) -> Self {
        Self { id, nodes }
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name in lowercase
    pub fn local_name(&self) -> Option<String> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.tag_name.clone())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.attributes.get(&name.to_lowercase()).cloned())
    }

    /// Set an attribute value
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            node.attributes
                .insert(name.into().to_lowercase(), value.into());
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            node.attributes.remove(&name.to_lowercase());
        }
    }

    /// Check if has an attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.contains_key(&name.to_lowercase()))
            .unwrap_or(false)
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| Node::new(id, self.nodes.clone()))
    }

    /// Get child nodes
    pub fn children(&self) -> Vec<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&id| Node::new(id, self.nodes.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Get the concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        let nodes = self.nodes.read();
        collect_text(&nodes, self.id)
    }

    /// Append a child node, detaching it from any previous parent
    pub fn append_child(&self, child: &Node) {
        let mut nodes = self.nodes.write();

        let old_parent_id = nodes.get(&child.id).and_then(|d| d.parent);
        if let Some(old_pid) = old_parent_id {
            if let Some(old_parent) = nodes.get_mut(&old_pid) {
                old_parent.children.retain(|&id| id != child.id);
            }
        }

        if let Some(child_data) = nodes.get_mut(&child.id) {
            child_data.parent = Some(self.id);
        }

        if let Some(parent_data) = nodes.get_mut(&self.id) {
            parent_data.children.push(child.id);
        }
    }

    /// Serialize this node and its subtree to HTML
    pub fn outer_html(&self) -> String {
        let nodes = self.nodes.read();
        serialize(&nodes, self.id)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

/// Recursively collect text content
fn collect_text(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId) -> String {
    match nodes.get(&node_id) {
        Some(node) => match node.node_type {
            NodeType::Text => node.text_content.clone().unwrap_or_default(),
            NodeType::Element | NodeType::Document => node
                .children
                .iter()
                .map(|&child_id| collect_text(nodes, child_id))
                .collect(),
            _ => String::new(),
        },
        None => String::new(),
    }
}

/// Serialize a node subtree to an HTML string
fn serialize(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId) -> String {
    let Some(node) = nodes.get(&node_id) else {
        return String::new();
    };

    match node.node_type {
        NodeType::Text => node.text_content.clone().unwrap_or_default(),
        NodeType::Comment => {
            format!("<!--{}-->", node.text_content.as_deref().unwrap_or(""))
        }
        NodeType::Element => {
            let tag = node.tag_name.as_deref().unwrap_or("div");
            let mut attrs: Vec<(&String, &String)> = node.attributes.iter().collect();
            attrs.sort_by_key(|(k, _)| k.as_str());
            let attrs: String = attrs
                .into_iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        format!(" {}", k)
                    } else {
                        format!(" {}=\"{}\"", k, html_escape(v))
                    }
                })
                .collect();

            // Void elements have no closing tag
            const VOID: &[&str] = &[
                "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
                "param", "source", "track", "wbr",
            ];

            if VOID.contains(&tag) {
                format!("<{}{}>", tag, attrs)
            } else {
                let children: String = node
                    .children
                    .iter()
                    .map(|&id| serialize(nodes, id))
                    .collect();
                format!("<{}{}>{}</{}>", tag, attrs, children, tag)
            }
        }
        NodeType::Document => node
            .children
            .iter()
            .map(|&id| serialize(nodes, id))
            .collect(),
        NodeType::DocumentType => "<!DOCTYPE html>".to_string(),
    }
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_uniqueness() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_node_data() {
        let element = NodeData::element("INPUT");
        assert_eq!(element.tag_name, Some("input".to_string()));
        assert_eq!(element.node_type, NodeType::Element);

        let text = NodeData::text("Hello");
        assert_eq!(text.text_content, Some("Hello".to_string()));
        assert_eq!(text.node_type, NodeType::Text);
    }
}
