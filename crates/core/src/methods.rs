//! Request options for each Telegraph API method.
//!
//! Every method is a plain struct implementing [`Method`]. The mapping from
//! struct fields to wire parameter names is written out per method in
//! [`Method::params`]; empty strings, unset numbers and `false` flags are not
//! sent.
//!
//! # Example
//!
//! ```rust
//! use telegraph_core::{ConvertConfig, CreatePage, Method, PageContent};
//!
//! let page = CreatePage::new("token", "Hello", PageContent::Html("<p>Hi</p>".into()));
//! let params = page.params(&ConvertConfig::default()).unwrap();
//!
//! assert!(params.contains(&("content", r#"[{"tag":"p","children":["Hi"]}]"#.to_string())));
//! ```

use serde::de::DeserializeOwned;

use crate::Result;
use crate::convert::{ConvertConfig, html_to_nodes_with_config};
use crate::node::Node;
use crate::serialize::nodes_to_json;
use crate::types::{Account, AccountField, Page, PageList, PageViews};

/// Wire parameters in the order they are sent.
pub type Params = Vec<(&'static str, String)>;

/// HTTP verb a method is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// Parameters in the query string.
    Get,
    /// Parameters as a url-encoded form body.
    Post,
}

/// A Telegraph API method.
pub trait Method {
    /// Route appended to the API base URL.
    const NAME: &'static str;
    /// How the parameters travel.
    const VERB: HttpVerb;
    /// Type of the `result` field of a successful response.
    type Output: DeserializeOwned;

    /// Builds the wire parameters.
    ///
    /// `convert` is used by methods that accept HTML content.
    fn params(&self, convert: &ConvertConfig) -> Result<Params>;
}

/// Content of a page being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Ready-made content nodes.
    Nodes(Vec<Node>),
    /// An HTML fragment, converted to nodes before sending.
    Html(String),
}

impl Default for PageContent {
    fn default() -> Self {
        PageContent::Nodes(Vec::new())
    }
}

impl PageContent {
    /// Resolves the content to nodes, converting HTML if needed.
    pub fn into_nodes(self, convert: &ConvertConfig) -> Result<Vec<Node>> {
        match self {
            PageContent::Nodes(nodes) => Ok(nodes),
            PageContent::Html(html) => html_to_nodes_with_config(&html, convert),
        }
    }

    fn to_wire(&self, convert: &ConvertConfig) -> Result<String> {
        match self {
            PageContent::Nodes(nodes) => nodes_to_json(nodes),
            PageContent::Html(html) => nodes_to_json(&html_to_nodes_with_config(html, convert)?),
        }
    }
}

impl From<Vec<Node>> for PageContent {
    fn from(nodes: Vec<Node>) -> Self {
        PageContent::Nodes(nodes)
    }
}

fn push_str(params: &mut Params, name: &'static str, value: &str) {
    if !value.is_empty() {
        params.push((name, value.to_string()));
    }
}

fn push_opt_str(params: &mut Params, name: &'static str, value: Option<&String>) {
    if let Some(value) = value {
        push_str(params, name, value);
    }
}

fn push_num(params: &mut Params, name: &'static str, value: Option<u32>) {
    if let Some(value) = value.filter(|v| *v != 0) {
        params.push((name, value.to_string()));
    }
}

fn push_flag(params: &mut Params, name: &'static str, value: bool) {
    if value {
        params.push((name, "true".to_string()));
    }
}

/// `createAccount`: creates a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccount {
    /// Required. Account name, 1-32 characters.
    pub short_name: String,
    /// Default author name for new pages.
    pub author_name: Option<String>,
    /// Default profile link for new pages.
    pub author_url: Option<String>,
}

impl CreateAccount {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self { short_name: short_name.into(), ..Default::default() }
    }
}

impl Method for CreateAccount {
    const NAME: &'static str = "createAccount";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = Account;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "short_name", &self.short_name);
        push_opt_str(&mut params, "author_name", self.author_name.as_ref());
        push_opt_str(&mut params, "author_url", self.author_url.as_ref());
        Ok(params)
    }
}

/// `editAccountInfo`: updates account details. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditAccountInfo {
    pub access_token: String,
    pub short_name: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
}

impl EditAccountInfo {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), ..Default::default() }
    }
}

impl Method for EditAccountInfo {
    const NAME: &'static str = "editAccountInfo";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = Account;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        push_opt_str(&mut params, "short_name", self.short_name.as_ref());
        push_opt_str(&mut params, "author_name", self.author_name.as_ref());
        push_opt_str(&mut params, "author_url", self.author_url.as_ref());
        Ok(params)
    }
}

/// `getAccountInfo`: reads account details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccountInfo {
    pub access_token: String,
    /// Fields to return. The API defaults to short_name, author_name and author_url.
    pub fields: Vec<AccountField>,
}

impl GetAccountInfo {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), fields: Vec::new() }
    }
}

impl Method for GetAccountInfo {
    const NAME: &'static str = "getAccountInfo";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = Account;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        if !self.fields.is_empty() {
            params.push(("fields", serde_json::to_string(&self.fields)?));
        }
        Ok(params)
    }
}

/// `revokeAccessToken`: invalidates the current token and issues a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevokeAccessToken {
    pub access_token: String,
}

impl RevokeAccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into() }
    }
}

impl Method for RevokeAccessToken {
    const NAME: &'static str = "revokeAccessToken";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = Account;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        Ok(params)
    }
}

/// `createPage`: publishes a new page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePage {
    pub access_token: String,
    /// Required. Page title, 1-256 characters.
    pub title: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// Required. Page body, up to 64 KB once encoded.
    pub content: PageContent,
    /// Return the content of the created page.
    pub return_content: bool,
}

impl CreatePage {
    pub fn new(access_token: impl Into<String>, title: impl Into<String>, content: PageContent) -> Self {
        Self { access_token: access_token.into(), title: title.into(), content, ..Default::default() }
    }
}

impl Method for CreatePage {
    const NAME: &'static str = "createPage";
    const VERB: HttpVerb = HttpVerb::Post;
    type Output = Page;

    fn params(&self, convert: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        push_str(&mut params, "title", &self.title);
        push_opt_str(&mut params, "author_name", self.author_name.as_ref());
        push_opt_str(&mut params, "author_url", self.author_url.as_ref());
        params.push(("content", self.content.to_wire(convert)?));
        push_flag(&mut params, "return_content", self.return_content);
        Ok(params)
    }
}

/// `editPage`: replaces the title and content of an existing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPage {
    pub access_token: String,
    /// Required. Path of the page to edit.
    pub path: String,
    pub title: String,
    pub content: PageContent,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub return_content: bool,
}

impl EditPage {
    pub fn new(
        access_token: impl Into<String>, path: impl Into<String>, title: impl Into<String>, content: PageContent,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            path: path.into(),
            title: title.into(),
            content,
            ..Default::default()
        }
    }
}

impl Method for EditPage {
    const NAME: &'static str = "editPage";
    const VERB: HttpVerb = HttpVerb::Post;
    type Output = Page;

    fn params(&self, convert: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        push_str(&mut params, "path", &self.path);
        push_str(&mut params, "title", &self.title);
        params.push(("content", self.content.to_wire(convert)?));
        push_opt_str(&mut params, "author_name", self.author_name.as_ref());
        push_opt_str(&mut params, "author_url", self.author_url.as_ref());
        push_flag(&mut params, "return_content", self.return_content);
        Ok(params)
    }
}

/// `getPage`: reads a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPage {
    /// Everything after `https://telegra.ph/`.
    pub path: String,
    pub return_content: bool,
}

impl GetPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), return_content: false }
    }
}

impl Method for GetPage {
    const NAME: &'static str = "getPage";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = Page;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "path", &self.path);
        push_flag(&mut params, "return_content", self.return_content);
        Ok(params)
    }
}

/// `getPageList`: lists the pages of an account, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPageList {
    pub access_token: String,
    /// Index of the first page to return.
    pub offset: Option<u32>,
    /// Number of pages to return, 0-200 (API default 50).
    pub limit: Option<u32>,
}

impl GetPageList {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), ..Default::default() }
    }
}

impl Method for GetPageList {
    const NAME: &'static str = "getPageList";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = PageList;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "access_token", &self.access_token);
        push_num(&mut params, "offset", self.offset);
        push_num(&mut params, "limit", self.limit);
        Ok(params)
    }
}

/// `getViews`: reads the view count of a page, optionally narrowed to a period.
///
/// Each narrower unit requires the wider ones (a day needs a month and a year).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetViews {
    pub path: String,
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
}

impl GetViews {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }
}

impl Method for GetViews {
    const NAME: &'static str = "getViews";
    const VERB: HttpVerb = HttpVerb::Get;
    type Output = PageViews;

    fn params(&self, _: &ConvertConfig) -> Result<Params> {
        let mut params = Params::new();
        push_str(&mut params, "path", &self.path);
        push_num(&mut params, "year", self.year);
        push_num(&mut params, "month", self.month);
        push_num(&mut params, "day", self.day);
        push_num(&mut params, "hour", self.hour);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeElement;

    fn params_of<M: Method>(method: &M) -> Params {
        method.params(&ConvertConfig::default()).unwrap()
    }

    fn p(name: &'static str, value: &str) -> (&'static str, String) {
        (name, value.to_string())
    }

    #[test]
    fn test_create_account_skips_unset() {
        let params = params_of(&CreateAccount::new("Sandbox"));
        assert_eq!(params, vec![p("short_name", "Sandbox")]);
    }

    #[test]
    fn test_create_account_all_fields() {
        let method = CreateAccount {
            short_name: "Sandbox".into(),
            author_name: Some("Anonymous".into()),
            author_url: Some("https://t.me/x".into()),
        };
        assert_eq!(
            params_of(&method),
            vec![
                p("short_name", "Sandbox"),
                p("author_name", "Anonymous"),
                p("author_url", "https://t.me/x")
            ]
        );
    }

    #[test]
    fn test_empty_optional_string_skipped() {
        let method = EditAccountInfo { author_name: Some(String::new()), ..EditAccountInfo::new("tok") };
        assert_eq!(params_of(&method), vec![p("access_token", "tok")]);
    }

    #[test]
    fn test_account_fields_as_json_array() {
        let method = GetAccountInfo {
            access_token: "tok".into(),
            fields: vec![AccountField::ShortName, AccountField::PageCount],
        };
        assert_eq!(
            params_of(&method),
            vec![p("access_token", "tok"), p("fields", r#"["short_name","page_count"]"#)]
        );
    }

    #[test]
    fn test_create_page_from_nodes() {
        let nodes = vec![Node::from(NodeElement::new("p").with_child("Hello, world!"))];
        let mut method = CreatePage::new("tok", "Sample Page", nodes.into());
        method.return_content = true;

        assert_eq!(
            params_of(&method),
            vec![
                p("access_token", "tok"),
                p("title", "Sample Page"),
                p("content", r#"[{"tag":"p","children":["Hello, world!"]}]"#),
                p("return_content", "true"),
            ]
        );
    }

    #[test]
    fn test_edit_page_from_html() {
        let method = EditPage::new("tok", "Sample-Page-12-15", "Sample", PageContent::Html("<b>x</b>".into()));
        let params = params_of(&method);

        assert_eq!(params[1], p("path", "Sample-Page-12-15"));
        assert_eq!(params[3], p("content", r#"[{"tag":"b","children":["x"]}]"#));
        assert!(!params.iter().any(|(name, _)| *name == "return_content"));
    }

    #[test]
    fn test_html_content_honors_convert_config() {
        use crate::{BlankText, TelegraphError};

        let method = CreatePage::new("tok", "t", PageContent::Html("<p>a</p>\n<p>b</p>".into()));
        let strict = ConvertConfig { blank_text: BlankText::Reject };

        assert!(matches!(method.params(&strict), Err(TelegraphError::EmptyTag)));
    }

    #[test]
    fn test_empty_content_still_sent() {
        let params = params_of(&CreatePage::new("tok", "t", PageContent::default()));
        assert!(params.contains(&p("content", "[]")));
    }

    #[test]
    fn test_views_numbers() {
        let method = GetViews { year: Some(2016), month: Some(12), day: Some(0), ..GetViews::new("Sample") };
        assert_eq!(
            params_of(&method),
            vec![p("path", "Sample"), p("year", "2016"), p("month", "12")]
        );
    }

    #[test]
    fn test_page_list_paging() {
        let method = GetPageList { limit: Some(3), ..GetPageList::new("tok") };
        assert_eq!(params_of(&method), vec![p("access_token", "tok"), p("limit", "3")]);
    }

    #[test]
    fn test_into_nodes() {
        let nodes = PageContent::Html("<i>x</i>".into()).into_nodes(&ConvertConfig::default()).unwrap();
        assert_eq!(nodes, vec![Node::from(NodeElement::new("i").with_child("x"))]);
    }

    #[test]
    fn test_verbs() {
        assert_eq!(CreatePage::VERB, HttpVerb::Post);
        assert_eq!(EditPage::VERB, HttpVerb::Post);
        assert_eq!(GetPage::VERB, HttpVerb::Get);
        assert_eq!(GetViews::NAME, "getViews");
    }
}
