//! Configuration options for the marketplace client

use std::time::Duration;

use crate::error::{Error, Result};

/// Production API base, used whenever the page is not served from a loopback host
pub const PRODUCTION_API_BASE: &str = "https://fmp-backend-wrdc.onrender.com/api";

/// Port the backend listens on during local development
pub const LOCAL_API_PORT: u16 = 5000;

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Resolve the API base URL for a page served from `host`.
///
/// Loopback hosts talk to a backend on the same host name (keeping the session
/// cookie same-site), everything else goes to production.
///
/// # Example
///
/// ```
/// use market_client::config::api_base_for_host;
///
/// assert_eq!(api_base_for_host("localhost"), "http://localhost:5000/api");
/// assert_eq!(
///     api_base_for_host("market.example.com"),
///     "https://fmp-backend-wrdc.onrender.com/api"
/// );
/// ```
pub fn api_base_for_host(host: &str) -> String {
    if LOOPBACK_HOSTS.contains(&host) {
        // IPv6 literals need brackets in a URL authority
        let authority = if host.contains(':') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        format!("http://{}:{}/api", authority, LOCAL_API_PORT)
    } else {
        PRODUCTION_API_BASE.to_string()
    }
}

/// Configuration options for the marketplace client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub api_base: String,

    /// The request timeout. `None` means a request may wait forever
    pub request_timeout: Option<Duration>,

    /// Value sent as `User-Agent`
    pub user_agent: String,

    /// Page the auth gate sends non-admins to
    pub login_page: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: PRODUCTION_API_BASE.to_string(),
            request_timeout: None,
            user_agent: format!("market-client/{}", env!("CARGO_PKG_VERSION")),
            login_page: "login.html".to_string(),
        }
    }
}

impl ClientOptions {
    /// Options for a page served from `host`
    pub fn for_host(host: &str) -> Self {
        Self::default().with_api_base(&api_base_for_host(host))
    }

    /// Read options from the environment.
    ///
    /// `MARKETPLACE_API_BASE` wins when set; otherwise the base is derived from
    /// `MARKETPLACE_PAGE_HOST`. With neither set the production base is used.
    pub fn from_env() -> Result<Self> {
        if let Ok(base) = std::env::var("MARKETPLACE_API_BASE") {
            if base.trim().is_empty() {
                return Err(Error::general(
                    "MARKETPLACE_API_BASE is set but empty",
                ));
            }
            url::Url::parse(&base)?;
            return Ok(Self::default().with_api_base(&base));
        }
        match std::env::var("MARKETPLACE_PAGE_HOST") {
            Ok(host) => Ok(Self::for_host(&host)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, value: &str) -> Self {
        self.api_base = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }

    /// Set the login page used for gate redirects
    pub fn with_login_page(mut self, value: &str) -> Self {
        self.login_page = value.to_string();
        self
    }
}
