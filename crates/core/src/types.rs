//! Records returned by the Telegraph API.
//!
//! The API leaves out fields it was not asked for (for example `content` on a
//! page fetched without `return_content`), so every field defaults when absent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// A Telegraph account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Account name, shown above the Edit/Publish button.
    pub short_name: String,
    /// Default author name for new pages.
    pub author_name: String,
    /// Default profile link for new pages.
    pub author_url: String,
    /// Only returned by `createAccount` and `revokeAccessToken`.
    pub access_token: String,
    /// One-time login link for a browser, valid for five minutes.
    pub auth_url: String,
    /// Number of pages belonging to the account.
    pub page_count: i64,
}

/// A page of an account's page list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageList {
    /// Total number of pages belonging to the account.
    pub total_count: i64,
    /// Requested pages.
    pub pages: Vec<Page>,
}

/// A Telegraph page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Path to the page, e.g. `Sample-Page-12-15`.
    pub path: String,
    /// Full URL of the page.
    pub url: String,
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub author_url: String,
    pub image_url: String,
    /// Only present when the page was requested with `return_content`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    pub views: i64,
    /// Whether the requesting account may edit the page.
    pub can_edit: bool,
}

/// View count of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageViews {
    pub views: i64,
}

/// Account fields that `getAccountInfo` can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    ShortName,
    AuthorName,
    AuthorUrl,
    AuthUrl,
    PageCount,
}

impl AccountField {
    /// Every field, in the order the API documents them.
    pub const ALL: [AccountField; 5] = [
        AccountField::ShortName,
        AccountField::AuthorName,
        AccountField::AuthorUrl,
        AccountField::AuthUrl,
        AccountField::PageCount,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountField::ShortName => "short_name",
            AccountField::AuthorName => "author_name",
            AccountField::AuthorUrl => "author_url",
            AccountField::AuthUrl => "auth_url",
            AccountField::PageCount => "page_count",
        }
    }
}

impl fmt::Display for AccountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountField::ALL
            .into_iter()
            .find(|field| field.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Invalid account field: {}. Valid options: short_name, author_name, author_url, auth_url, page_count",
                    s
                )
            })
    }
}

/// Kind of media accepted by the upload endpoint.
///
/// Animations are uploaded as video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

impl MediaKind {
    /// Name of the multipart form field.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// File name sent with the multipart part.
    pub fn file_name(&self) -> &'static str {
        match self {
            MediaKind::Photo => "file.jpg",
            MediaKind::Video => "file.mp4",
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photo" | "image" => Ok(Self::Photo),
            "video" | "animation" => Ok(Self::Video),
            _ => Err(format!("Invalid media kind: {}. Valid options: photo, video", s)),
        }
    }
}
