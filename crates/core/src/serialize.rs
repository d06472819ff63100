//! Wire encoding of content nodes.
//!
//! The `content` field of the Telegraph API is a JSON array whose items are
//! strings (text nodes) or `{"tag", "attrs"?, "children"?}` objects (element
//! nodes). Empty `attrs` and `children` are left out. Attribute keys are
//! written in sorted order, so a given node list always encodes to the same
//! string.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::{html_to_nodes, nodes_to_json};
//!
//! let nodes = html_to_nodes("<p>Hi <b>there</b></p>").unwrap();
//! let json = nodes_to_json(&nodes).unwrap();
//!
//! assert_eq!(json, r#"[{"tag":"p","children":["Hi ",{"tag":"b","children":["there"]}]}]"#);
//! ```

use crate::Result;
use crate::convert::{ConvertConfig, html_to_nodes_with_config};
use crate::node::Node;

/// Encodes nodes as a compact JSON array.
pub fn nodes_to_json(nodes: &[Node]) -> Result<String> {
    Ok(serde_json::to_string(nodes)?)
}

/// Encodes nodes as an indented JSON array, for display.
pub fn nodes_to_json_pretty(nodes: &[Node]) -> Result<String> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

/// Decodes a JSON array of nodes, as found in the `content` field of a page.
pub fn json_to_nodes(json: &str) -> Result<Vec<Node>> {
    Ok(serde_json::from_str(json)?)
}

/// Converts an HTML fragment straight to its wire encoding.
pub fn html_to_json(html: &str, config: &ConvertConfig) -> Result<String> {
    let nodes = html_to_nodes_with_config(html, config)?;
    nodes_to_json(&nodes)
}
