//! Telegraph content nodes.
//!
//! Page content is an ordered list of [`Node`]s. A node is either a plain
//! string or a [`NodeElement`] with a tag, optional attributes and optional
//! children. On the wire a text node is a JSON string and an element is an
//! object shaped as `{"tag": ..., "attrs"?: {...}, "children"?: [...]}`.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::{Node, NodeElement};
//!
//! let link = NodeElement::new("a").with_attr("href", "https://telegra.ph").with_child("Telegraph");
//! let nodes = vec![Node::from("Read on "), Node::from(link)];
//!
//! let json = serde_json::to_string(&nodes).unwrap();
//! assert_eq!(json, r#"["Read on ",{"tag":"a","attrs":{"href":"https://telegra.ph"},"children":["Telegraph"]}]"#);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One unit of publishable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Literal text.
    Text(String),
    /// A tagged element with attributes and children.
    Element(NodeElement),
}

/// An element node.
///
/// Attributes are kept in a [`BTreeMap`] so they always encode in the same
/// (sorted) order. Empty attribute maps and empty child lists are omitted from
/// the encoded form and default to empty when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeElement {
    /// Tag name, e.g. `p`, `a`, `img`.
    pub tag: String,
    /// Attribute name to value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub attrs: BTreeMap<String, String>,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub children: Vec<Node>,
}

/// The API sends `null` for absent collections on some records.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Creates an element node with no attributes and no children.
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(NodeElement::new(tag))
    }

    /// Returns the string if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Returns the element if this is an element node.
    pub fn as_element(&self) -> Option<&NodeElement> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => Some(element),
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl NodeElement {
    /// Creates an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: BTreeMap::new(), children: Vec::new() }
    }

    /// Adds (or replaces) an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<NodeElement> for Node {
    fn from(value: NodeElement) -> Self {
        Node::Element(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_serializes_as_string() {
        let json = serde_json::to_string(&Node::text("plain text")).unwrap();
        assert_eq!(json, r#""plain text""#);
    }

    #[test]
    fn test_empty_attrs_and_children_omitted() {
        let json = serde_json::to_string(&Node::element("br")).unwrap();
        assert_eq!(json, r#"{"tag":"br"}"#);
    }

    #[test]
    fn test_attrs_encode_sorted() {
        let img = NodeElement::new("img").with_attr("src", "/file/a.jpg").with_attr("alt", "A");
        let json = serde_json::to_string(&Node::from(img)).unwrap();
        assert_eq!(json, r#"{"tag":"img","attrs":{"alt":"A","src":"/file/a.jpg"}}"#);
    }

    #[test]
    fn test_deserialize_mixed_content() {
        let nodes: Vec<Node> =
            serde_json::from_str(r#"["Hi ",{"tag":"b","children":["there"]},{"tag":"hr"}]"#).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].as_text(), Some("Hi "));
        let bold = nodes[1].as_element().unwrap();
        assert_eq!(bold.tag, "b");
        assert_eq!(bold.children, vec![Node::text("there")]);
        assert!(nodes[2].as_element().unwrap().children.is_empty());
    }

    #[test]
    fn test_deserialize_null_collections() {
        let node: Node = serde_json::from_str(r#"{"tag":"p","attrs":null,"children":null}"#).unwrap();
        assert_eq!(node, Node::element("p"));
    }

    #[test]
    fn test_text_content_walks_subtree() {
        let node = Node::from(
            NodeElement::new("p")
                .with_child("Hi ")
                .with_child(NodeElement::new("b").with_child("there")),
        );
        assert_eq!(node.text_content(), "Hi there");
    }

    #[test]
    fn test_attr_lookup() {
        let link = NodeElement::new("a").with_attr("href", "/x");
        assert_eq!(link.attr("href"), Some("/x"));
        assert_eq!(link.attr("title"), None);
    }
}
