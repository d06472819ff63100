//! HTML to content-node conversion.
//!
//! Converts an HTML fragment into the [`Node`] list accepted by the Telegraph
//! API. The fragment is treated as the children of a document body; every
//! parsed child becomes one node, in document order.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::{Node, NodeElement, html_to_nodes};
//!
//! let nodes = html_to_nodes("<p>Hi <b>there</b></p>").unwrap();
//! let expected = NodeElement::new("p")
//!     .with_child("Hi ")
//!     .with_child(NodeElement::new("b").with_child("there"));
//!
//! assert_eq!(nodes, vec![Node::from(expected)]);
//! ```

use scraper::node::Element;
use scraper::{ElementRef, Node as MarkupNode};

use crate::node::{Node, NodeElement};
use crate::parse::Document;
use crate::{Result, TelegraphError};

/// Elements that flow inline with the surrounding text.
const PHRASING_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "i", "img", "ins", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// How to treat text nodes that contain only whitespace.
///
/// Such nodes have neither a tag nor publishable text. They usually come from
/// line breaks between block elements that survive [`prepare_html`].
///
/// Whitespace between two inline elements, as in `<b>a</b> <i>b</i>`, is
/// not affected by this setting: it always becomes a single `" "` text node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankText {
    /// Drop the node. The dropped whitespace does not appear in the output.
    #[default]
    Skip,
    /// Fail the conversion with [`TelegraphError::EmptyTag`].
    Reject,
}

/// Configuration for HTML conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Handling of whitespace-only text nodes
    pub blank_text: BlankText,
}

/// Strips pretty-printing artifacts before parsing.
///
/// CRLF pairs become a single space, then every run of two spaces is removed.
/// This is one left-to-right pass per replacement, so an odd-length run of
/// spaces keeps one space and lone `\n` characters are left alone.
pub fn prepare_html(html: &str) -> String {
    html.replace("\r\n", " ").replace("  ", "")
}

/// Converts an HTML fragment into content nodes using the default configuration.
pub fn html_to_nodes(html: &str) -> Result<Vec<Node>> {
    html_to_nodes_with_config(html, &ConvertConfig::default())
}

/// Converts an HTML fragment into content nodes.
///
/// # Errors
///
/// Returns [`TelegraphError::HtmlParseError`] if the markup has no body and
/// [`TelegraphError::EmptyTag`] if a blank text node is found while
/// `config.blank_text` is [`BlankText::Reject`].
pub fn html_to_nodes_with_config(html: &str, config: &ConvertConfig) -> Result<Vec<Node>> {
    let prepared = prepare_html(html);
    let doc = Document::parse(&prepared)?;
    let body = doc.body()?;

    let nodes = convert_children(body, config)?;
    tracing::debug!(input_len = html.len(), nodes = nodes.len(), "converted html to nodes");

    Ok(nodes)
}

/// Converts the children of `parent`, one output node per publishable child.
fn convert_children(parent: ElementRef<'_>, config: &ConvertConfig) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for child in parent.children() {
        match child.value() {
            MarkupNode::Text(text) => {
                let value: &str = &text.text;

                if value.trim().is_empty() {
                    let after_inline = child
                        .prev_sibling()
                        .and_then(|s| s.value().as_element())
                        .is_some_and(is_phrasing);
                    let before_inline = child
                        .next_sibling()
                        .and_then(|s| s.value().as_element())
                        .is_some_and(is_phrasing);

                    if after_inline && before_inline {
                        nodes.push(Node::text(" "));
                        continue;
                    }
                    match config.blank_text {
                        BlankText::Skip => {
                            tracing::debug!(len = value.len(), "dropping blank text node");
                            continue;
                        }
                        BlankText::Reject => return Err(TelegraphError::EmptyTag),
                    }
                }

                // Formatters tend to leave one space in front of the first text.
                let value = match value.strip_prefix(' ') {
                    Some(rest) if nodes.is_empty() => rest,
                    _ => value,
                };
                nodes.push(Node::Text(value.to_string()));
            }
            MarkupNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    nodes.push(Node::Element(convert_element(element, config)?));
                }
            }
            _ => {}
        }
    }

    Ok(nodes)
}

fn is_phrasing(element: &Element) -> bool {
    PHRASING_TAGS.contains(&element.name())
}

fn convert_element(element: ElementRef<'_>, config: &ConvertConfig) -> Result<NodeElement> {
    let attrs = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let children = convert_children(element, config)?;

    Ok(NodeElement { tag: element.value().name().to_string(), attrs, children })
}
