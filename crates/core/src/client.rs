//! Async client for the Telegraph API.
//!
//! [`Telegraph`] sends one HTTP request per call and maps the JSON envelope
//! `{"ok": ..., "result": ..., "error": ...}` to typed records. Endpoints,
//! timeout and user agent come from [`ClientConfig`], so several clients with
//! different settings can live side by side.
//!
//! # Example
//!
//! ```rust,no_run
//! use telegraph_core::{CreatePage, PageContent, Telegraph};
//!
//! # async fn example() -> telegraph_core::Result<()> {
//! let client = Telegraph::new()?;
//! let account = client.create_account(&telegraph_core::CreateAccount::new("Sandbox")).await?;
//!
//! let page = CreatePage::new(account.access_token, "Hello", PageContent::Html("<p>Hi <b>there</b></p>".into()));
//! let page = client.create_page(&page).await?;
//! println!("{}", page.url);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::convert::ConvertConfig;
use crate::methods::{
    CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo, GetPage, GetPageList, GetViews, HttpVerb,
    Method, RevokeAccessToken,
};
use crate::types::{Account, MediaKind, Page, PageList, PageViews};
use crate::{Result, TelegraphError};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.telegra.ph/";

/// Default media upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://telegra.ph/upload";

/// Client configuration.
///
/// # Example
///
/// ```rust
/// use telegraph_core::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8080/")
///     .timeout(5)
///     .build();
/// assert_eq!(config.timeout, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; method names are appended to it.
    pub base_url: String,
    /// Media upload URL.
    pub upload_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header.
    pub user_agent: String,
    /// Conversion settings for HTML page content.
    pub convert: ConvertConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            timeout: 30,
            user_agent: format!("telegraph-core/{}", env!("CARGO_PKG_VERSION")),
            convert: ConvertConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig.
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ClientConfig::default() }
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.base_url = value.into();
        self
    }

    /// Sets the upload URL.
    pub fn upload_url(mut self, value: impl Into<String>) -> Self {
        self.config.upload_url = value.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Sets the HTML conversion settings.
    pub fn convert(mut self, value: ConvertConfig) -> Self {
        self.config.convert = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Telegraph API client.
#[derive(Debug, Clone)]
pub struct Telegraph {
    http: Client,
    base_url: Url,
    upload_url: Url,
    config: ClientConfig,
}

impl Telegraph {
    /// Creates a client for the public Telegraph endpoints.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TelegraphError::InvalidUrl`] if either endpoint does not parse
    /// and [`TelegraphError::HttpError`] if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = parse_url(&base)?;
        let upload_url = parse_url(&config.upload_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TelegraphError::HttpError)?;

        Ok(Self { http, base_url, upload_url, config })
    }

    /// Sends any API method and decodes its result.
    pub async fn call<M: Method>(&self, method: &M) -> Result<M::Output> {
        let url = self.endpoint(M::NAME)?;
        let params = method.params(&self.config.convert)?;

        tracing::debug!(method = M::NAME, params = params.len(), "calling telegraph api");

        let request = match M::VERB {
            HttpVerb::Get => self.http.get(url).query(&params),
            HttpVerb::Post => self.http.post(url).form(&params),
        };
        let body = self.send(request).await?;

        decode_response(&body)
    }

    pub async fn create_account(&self, method: &CreateAccount) -> Result<Account> {
        self.call(method).await
    }

    pub async fn edit_account_info(&self, method: &EditAccountInfo) -> Result<Account> {
        self.call(method).await
    }

    pub async fn get_account_info(&self, method: &GetAccountInfo) -> Result<Account> {
        self.call(method).await
    }

    /// Revokes the access token. The returned account carries the new token.
    pub async fn revoke_access_token(&self, method: &RevokeAccessToken) -> Result<Account> {
        self.call(method).await
    }

    /// Creates a page. HTML content is converted to nodes before sending.
    pub async fn create_page(&self, method: &CreatePage) -> Result<Page> {
        self.call(method).await
    }

    /// Edits a page. HTML content is converted to nodes before sending.
    pub async fn edit_page(&self, method: &EditPage) -> Result<Page> {
        self.call(method).await
    }

    pub async fn get_page(&self, method: &GetPage) -> Result<Page> {
        self.call(method).await
    }

    pub async fn get_page_list(&self, method: &GetPageList) -> Result<PageList> {
        self.call(method).await
    }

    pub async fn get_views(&self, method: &GetViews) -> Result<PageViews> {
        self.call(method).await
    }

    /// Uploads a photo or video and returns its source path, e.g. `/file/abc.jpg`.
    pub async fn upload(&self, data: Vec<u8>, kind: MediaKind) -> Result<String> {
        tracing::debug!(bytes = data.len(), kind = kind.field_name(), "uploading media");

        let part = Part::bytes(data)
            .file_name(kind.file_name())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(kind.field_name(), part);

        let request = self.http.post(self.upload_url.clone()).multipart(form);
        let body = self.send(request).await?;

        decode_upload(&body)
    }

    /// Reads a local file and uploads it.
    ///
    /// Callers should validate and sanitize the path when accepting user input.
    pub async fn upload_file(&self, path: impl AsRef<Path>, kind: MediaKind) -> Result<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TelegraphError::FileNotFound(PathBuf::from(path)));
        }

        let data = tokio::fs::read(path).await?;
        self.upload(data, kind).await
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url.join(name).map_err(|e| TelegraphError::InvalidUrl(e.to_string()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(status = %response.status(), "telegraph response");

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> TelegraphError {
        if err.is_timeout() {
            TelegraphError::Timeout { timeout: self.config.timeout }
        } else {
            TelegraphError::HttpError(err)
        }
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| TelegraphError::InvalidUrl(format!("{}: {}", url, e)))
}

#[derive(Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

/// Decodes an API response body.
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;

    if !envelope.ok {
        return Err(TelegraphError::Api(
            envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    envelope.result.ok_or(TelegraphError::MissingResult)
}

#[derive(Deserialize)]
struct Source {
    src: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UploadResponse {
    Sources(Vec<Source>),
    Error { error: String },
}

/// Decodes an upload response body.
fn decode_upload(body: &str) -> Result<String> {
    match serde_json::from_str(body)? {
        UploadResponse::Sources(sources) => sources
            .into_iter()
            .next()
            .map(|source| source.src)
            .ok_or_else(|| TelegraphError::Upload("no sources returned".to_string())),
        UploadResponse::Error { error } => Err(TelegraphError::Upload(error)),
    }
}
