// Copyright (c) 2026 Formtoken Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use super::node::{Node, NodeId, NodeStore, NodeType};

/// Element node with extended operations
#[derive(Debug, Clone)]
pub struct Element {
    /// Inner node reference
    pub node: Node,
}

impl Element {
    /// Create a new element from a node
    pub fn new(node: Node) -> Option<Self> {
        if node.node_type() == NodeType::Element {
            Some(Self { node })
        } else {
            None
        }
    }

    /// Create element from node ID
    pub(crate) fn from_id(id: NodeId, nodes: NodeStore) -> Option<Self> {
        Self::new(Node::new(id, nodes))
    }

    /// Get the tag name (lowercase)
    pub fn local_name(&self) -> String {
        self.node.local_name().unwrap_or_default()
    }

    /// Get element ID
    pub fn id(&self) -> Option<String> {
        self.node.get_attribute("id")
    }

    /// Get an attribute
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }

    /// Set an attribute
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.node.set_attribute(name, value);
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        self.node.remove_attribute(name);
    }

    /// Check if has attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.has_attribute(name)
    }

    /// Get the input name, if any
    pub fn name(&self) -> Option<String> {
        self.node.get_attribute("name")
    }

    /// Get parent element
    pub fn parent_element(&self) -> Option<Element> {
        self.node.parent().and_then(Element::new)
    }

    /// Get child elements (only element nodes)
    pub fn children(&self) -> Vec<Element> {
        self.node
            .children()
            .into_iter()
            .filter_map(Element::new)
            .collect()
    }

    /// Get all descendant elements, in document order
    pub fn descendants(&self) -> Vec<Element> {
        let mut results = Vec::new();
        collect_descendants(self, &mut results);
        results
    }

    /// Get descendant elements with a given tag name
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<Element> {
        let tag = tag.to_lowercase();
        self.descendants()
            .into_iter()
            .filter(|e| e.local_name() == tag)
            .collect()
    }

    /// Get all input elements within this element
    pub fn inputs(&self) -> Vec<Element> {
        self.descendants_by_tag("input")
    }

    /// Append a child element
    pub fn append_child(&self, child: &Element) {
        self.node.append_child(&child.node);
    }

    /// Get text content
    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    /// Get value for form elements
    pub fn value(&self) -> Option<String> {
        match self.local_name().as_str() {
            "input" | "textarea" | "select" => self.get_attribute("value"),
            _ => None,
        }
    }

    /// Set value for form elements
    pub fn set_value(&self, value: impl Into<String>) {
        if matches!(self.local_name().as_str(), "input" | "textarea" | "select") {
            self.set_attribute("value", value);
        }
    }

    /// Check if element is disabled
    pub fn disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    /// Get outer HTML
    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }
}

fn collect_descendants(element: &Element, results: &mut Vec<Element>) {
    for child in element.children() {
        results.push(child.clone());
        collect_descendants(&child, results);
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_element_value() {
        let doc = parse_html("<input type=\"text\" value=\"4111\">").unwrap();
        let input = doc.elements_by_tag("input").pop().unwrap();
        assert_eq!(input.value(), Some("4111".to_string()));

        input.set_value("4222");
        assert_eq!(input.value(), Some("4222".to_string()));
    }

    #[test]
    fn test_descendants_by_tag() {
        let html = r#"
            <form>
                <div><input name="a"></div>
                <input name="b">
                <button>Go</button>
            </form>
        "#;
        let doc = parse_html(html).unwrap();
        let form = doc.forms().pop().unwrap();
        assert_eq!(form.inputs().len(), 2);
    }

    #[test]
    fn test_name_stripping() {
        let doc = parse_html("<input name=\"cc\" value=\"x\">").unwrap();
        let input = doc.elements_by_tag("input").pop().unwrap();
        assert_eq!(input.name(), Some("cc".to_string()));
        input.remove_attribute("name");
        assert_eq!(input.name(), None);
    }
}
