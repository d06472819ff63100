//! Error types for Telegraph operations.
//!
//! This module defines the main error type [`TelegraphError`] which represents
//! all possible errors that can occur during HTML conversion, request
//! encoding, and calls to the Telegraph API.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::{BlankText, ConvertConfig, TelegraphError, html_to_nodes_with_config};
//!
//! let strict = ConvertConfig { blank_text: BlankText::Reject };
//! let result = html_to_nodes_with_config("<p>a</p>\n<p>b</p>", &strict);
//!
//! assert!(matches!(result, Err(TelegraphError::EmptyTag)));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Telegraph operations.
///
/// # Example
///
/// ```rust
/// use telegraph_core::{TelegraphError, html_to_nodes};
///
/// match html_to_nodes("<p>Hello</p>") {
///     Ok(nodes) => println!("{} nodes", nodes.len()),
///     Err(TelegraphError::EmptyTag) => println!("blank markup node"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum TelegraphError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "client")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a base URL cannot be parsed or a route cannot be joined onto it.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when the markup cannot be turned into a document with a body.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A markup node had no tag and no text to publish.
    ///
    /// Only returned when conversion runs with [`BlankText::Reject`](crate::BlankText::Reject).
    #[error("Markup node has neither a tag nor text content")]
    EmptyTag,

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with `ok: false`.
    #[error("Telegraph API error: {0}")]
    Api(String),

    /// The API answered with `ok: true` but carried no result.
    #[error("Telegraph API response is missing its result")]
    MissingResult,

    /// The upload endpoint rejected the file or returned no sources.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for TelegraphError.
///
/// This is a convenience alias for `std::result::Result<T, TelegraphError>`.
pub type Result<T> = std::result::Result<T, TelegraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TelegraphError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_api_error_carries_message() {
        let err = TelegraphError::Api("ACCESS_TOKEN_INVALID".to_string());
        assert_eq!(err.to_string(), "Telegraph API error: ACCESS_TOKEN_INVALID");
    }

    #[test]
    fn test_timeout_error() {
        let err = TelegraphError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_json_error_from() {
        let err: TelegraphError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, TelegraphError::Json(_)));
    }
}
