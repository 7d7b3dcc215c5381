//! Plugin Marketplace Client Library
//!
//! A Rust client for the plugin marketplace backend: typed stores for
//! listings, categories, comments, requests and contact messages, the session
//! gate, and a headless view layer that renders pages into an in-memory
//! [`view::Document`].

pub mod app;
pub mod attachment;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod config;
pub mod contact;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod plugins;
pub mod requests;
pub mod ui;
pub mod view;

use reqwest::Client;

use crate::auth::AuthClient;
use crate::categories::CategoryStore;
use crate::comments::CommentStore;
use crate::config::ClientOptions;
use crate::contact::ContactStore;
use crate::error::Result;
use crate::plugins::PluginStore;
use crate::requests::RequestStore;

/// The main entry point for the marketplace client
#[derive(Clone)]
pub struct Marketplace {
    /// The API base URL
    pub url: String,
    /// HTTP client used for requests; holds the session cookie
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl Marketplace {
    /// Create a new client for the given API base
    ///
    /// # Example
    ///
    /// ```
    /// use market_client::Marketplace;
    ///
    /// let market = Marketplace::new("http://localhost:5000/api").unwrap();
    /// let plugins = market.plugins();
    /// ```
    pub fn new(api_base: &str) -> Result<Self> {
        Self::new_with_options(ClientOptions::default().with_api_base(api_base))
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use market_client::{Marketplace, config::ClientOptions};
    ///
    /// let market = Marketplace::new_with_options(ClientOptions::for_host("localhost")).unwrap();
    /// assert_eq!(market.url, "http://localhost:5000/api");
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        let http_client = fetch::build_client(&options)?;

        Ok(Self {
            url: options.api_base.clone(),
            http_client,
            options,
        })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// Listings
    pub fn plugins(&self) -> PluginStore {
        PluginStore::new(&self.url, self.http_client.clone())
    }

    /// Categories
    pub fn categories(&self) -> CategoryStore {
        CategoryStore::new(&self.url, self.http_client.clone())
    }

    /// Comments
    pub fn comments(&self) -> CommentStore {
        CommentStore::new(&self.url, self.http_client.clone())
    }

    /// Feature requests
    pub fn requests(&self) -> RequestStore {
        RequestStore::new(&self.url, self.http_client.clone())
    }

    /// Contact messages
    pub fn contact(&self) -> ContactStore {
        ContactStore::new(&self.url, self.http_client.clone())
    }

    /// Authentication
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(&self.url, self.http_client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::plugins::{Plugin, PluginFilter, Reaction};
    pub use crate::view::Document;
    pub use crate::Marketplace;
}
