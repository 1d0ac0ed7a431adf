// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use super::element::Element;
use super::node::{Node, NodeData, NodeId, NodeStore, NodeType};

/// HTML document holding the node tree for one page
#[derive(Debug, Clone)]
pub struct Document {
    /// Document URL, used to resolve relative form actions
    pub url: Option<Url>,
    /// Root node ID
    root_id: NodeId,
    /// Node storage
    pub(crate) nodes: NodeStore,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            url: None,
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Create a document with URL
    pub fn with_url(url: Url) -> Self {
        let mut doc = Self::new();
        doc.url = Some(url);
        doc
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        Node::new(self.root_id, self.nodes.clone())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.find_first(|data| {
            data.attributes.get("id").map(String::as_str) == Some(id)
        })
    }

    /// Get all elements with a given tag name, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<Element> {
        let tag = tag.to_lowercase();
        self.find_all(|data| data.tag_name.as_deref() == Some(tag.as_str()))
    }

    /// Get all forms
    pub fn forms(&self) -> Vec<Element> {
        self.elements_by_tag("form")
    }

    /// Get all input elements
    pub fn inputs(&self) -> Vec<Element> {
        self.elements_by_tag("input")
    }

    /// Create a new, detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::element(tag));
        Element::from_id(id, self.nodes.clone())
            .unwrap_or_else(|| unreachable!("freshly created node is an element"))
    }

    /// Get the document's HTML
    pub fn outer_html(&self) -> String {
        self.root().outer_html()
    }

    /// Find the first element matching a predicate, in document order
    fn find_first<F>(&self, pred: F) -> Option<Element>
    where
        F: Fn(&NodeData) -> bool,
    {
        self.walk(&pred, false).into_iter().next()
    }

    /// Find all elements matching a predicate, in document order
    fn find_all<F>(&self, pred: F) -> Vec<Element>
    where
        F: Fn(&NodeData) -> bool,
    {
        self.walk(&pred, true)
    }

    fn walk<F>(&self, pred: &F, find_all: bool) -> Vec<Element>
    where
        F: Fn(&NodeData) -> bool,
    {
        // Collect IDs under the read guard, build Elements after it is
        // released: Element construction re-reads the node store.
        let mut matches = Vec::new();
        {
            let nodes = self.nodes.read();
            walk_subtree(&nodes, self.root_id, pred, &mut matches, find_all);
        }
        matches
            .into_iter()
            .filter_map(|id| Element::from_id(id, self.nodes.clone()))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn walk_subtree<F>(
    nodes: &HashMap<NodeId, NodeData>,
    node_id: NodeId,
    pred: &F,
    results: &mut Vec<NodeId>,
    find_all: bool,
) where
    F: Fn(&NodeData) -> bool,
{
    let Some(data) = nodes.get(&node_id) else {
        return;
    };

    if data.node_type == NodeType::Element && pred(data) {
        results.push(node_id);
        if !find_all {
            return;
        }
    }

    for &child_id in &data.children {
        if !find_all && !results.is_empty() {
            return;
        }
        walk_subtree(nodes, child_id, pred, results, find_all);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.url.is_none());
        assert!(doc.forms().is_empty());
    }

    #[test]
    fn test_create_element() {
        let doc = Document::new();
        let input = doc.create_element("INPUT");
        assert_eq!(input.local_name(), "input");
    }

    #[test]
    fn test_get_element_by_id() {
        let doc =
            parse_html("<html><body><form id=\"payment\"></form></body></html>").unwrap();
        let elem = doc.get_element_by_id("payment");
        assert!(elem.is_some());
        assert_eq!(elem.unwrap().local_name(), "form");
        assert!(doc.get_element_by_id("missing").is_none());
    }

    #[test]
    fn test_lookup_while_attributes_are_written() {
        let doc = parse_html("<form id=\"payment\"><input id=\"number\"></form>").unwrap();

        let writer = {
            let doc = doc.clone();
            std::thread::spawn(move || {
                let input = doc.get_element_by_id("number").unwrap();
                for i in 0..500 {
                    input.set_attribute("value", i.to_string());
                }
            })
        };

        for _ in 0..500 {
            assert!(doc.get_element_by_id("payment").is_some());
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_appended_element_is_reachable() {
        let doc = parse_html("<form id=\"f\"></form>").unwrap();
        let form = doc.get_element_by_id("f").unwrap();

        let input = doc.create_element("input");
        input.set_attribute("id", "token");
        form.append_child(&input);

        assert!(doc.get_element_by_id("token").is_some());
        assert_eq!(form.inputs().len(), 1);
    }
}
