//! HTML parsing.
//!
//! This module wraps `scraper` (html5ever) as the markup parser feeding the
//! content-node conversion. Input fragments are parsed as full documents so
//! that the conversion can start from the children of `<body>`.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::parse::Document;
//!
//! let doc = Document::parse("<p>Hello</p><p>World</p>").unwrap();
//! let body = doc.body().unwrap();
//! assert_eq!(body.children().count(), 2);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, TelegraphError};

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so this only records the
    /// parser's diagnostics (logged at `debug`) instead of failing on them.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);

        for error in &html.errors {
            tracing::debug!(%error, "html parser diagnostic");
        }

        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`TelegraphError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| TelegraphError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).collect())
    }

    /// Gets the `<body>` element.
    ///
    /// # Errors
    ///
    /// Returns [`TelegraphError::HtmlParseError`] if the document has no body.
    pub fn body(&'_ self) -> Result<ElementRef<'_>> {
        self.select("body")?
            .into_iter()
            .next()
            .ok_or_else(|| TelegraphError::HtmlParseError("document has no body".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_lands_in_body() {
        let doc = Document::parse("<b>bold</b> tail").unwrap();
        let body = doc.body().unwrap();

        assert_eq!(body.children().count(), 2);
        assert_eq!(body.inner_html(), "<b>bold</b> tail");
    }

    #[test]
    fn test_malformed_markup_recovers() {
        let doc = Document::parse("<p>unclosed <i>italic").unwrap();
        let paragraphs = doc.select("p").unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text().collect::<String>(), "unclosed italic");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse("<p>x</p>").unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(TelegraphError::HtmlParseError(_))));
    }

    #[test]
    fn test_empty_input_still_has_body() {
        let doc = Document::parse("").unwrap();
        assert_eq!(doc.body().unwrap().children().count(), 0);
    }
}
