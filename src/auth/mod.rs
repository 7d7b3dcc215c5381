//! Authentication against the marketplace backend
//!
//! The backend keeps the session in a cookie; this client only issues the
//! calls and reports who is signed in.

mod gate;
mod session;
mod types;

use reqwest::Client;

use crate::error::{Error, Result};
use crate::fetch::Fetch;

pub use gate::*;
pub use session::*;
pub use types::*;

/// Client for the `/auth` endpoints
#[derive(Clone)]
pub struct AuthClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests; its cookie store holds the session
    client: Client,
}

impl AuthClient {
    /// Create a new AuthClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.url, path)
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }
        let body = LoginCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = Fetch::post(&self.client, &self.get_auth_url("/user-login"))
            .json(&body)?
            .execute_value()
            .await?;
        user_from_payload(payload).ok_or_else(|| Error::general("Login response had no user"))
    }

    /// Register a new account
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("Name, email and password are required"));
        }
        let body = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = Fetch::post(&self.client, &self.get_auth_url("/user-register"))
            .json(&body)?
            .execute_value()
            .await?;
        user_from_payload(payload)
            .ok_or_else(|| Error::general("Registration response had no user"))
    }

    /// Exchange a Google identity token for a backend session
    pub async fn google(&self, id_token: &str) -> Result<User> {
        let payload = Fetch::post(&self.client, &self.get_auth_url("/google"))
            .bearer_auth(id_token)
            .execute_value()
            .await?;
        user_from_payload(payload).ok_or_else(|| Error::general("Google login had no user"))
    }

    /// Who is signed in, according to the session cookie. `None` for anonymous.
    pub async fn me(&self) -> Result<Option<User>> {
        let payload = Fetch::get(&self.client, &self.get_auth_url("/me"))
            .execute_value()
            .await?;
        Ok(user_from_payload(payload))
    }

    /// End the backend session
    pub async fn logout(&self) -> Result<()> {
        Fetch::post(&self.client, &self.get_auth_url("/logout"))
            .execute_unit()
            .await
    }
}
