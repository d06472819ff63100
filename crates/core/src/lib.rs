#[cfg(feature = "client")]
pub mod client;
pub mod convert;
pub mod error;
pub mod methods;
pub mod node;
pub mod parse;
pub mod serialize;
pub mod types;

#[cfg(feature = "client")]
pub use client::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_UPLOAD_URL, Telegraph};
pub use convert::{BlankText, ConvertConfig, html_to_nodes, html_to_nodes_with_config, prepare_html};
pub use error::{Result, TelegraphError};
pub use methods::{
    CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo, GetPage, GetPageList, GetViews, HttpVerb,
    Method, PageContent, Params, RevokeAccessToken,
};
pub use node::{Node, NodeElement};
#[doc(hidden)]
pub use parse::Document;
pub use serialize::{html_to_json, json_to_nodes, nodes_to_json, nodes_to_json_pretty};
pub use types::{Account, AccountField, MediaKind, Page, PageList, PageViews};
