//! Feature / custom work requests

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::{Error, Result};
use crate::fetch::Fetch;

/// A request submitted through the "request a plugin" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub text: String,
    /// Attachment as a data URL or an uploaded asset reference
    #[serde(default)]
    pub file: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload for submitting a request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl NewRequest {
    /// Validate form input and build the payload
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        text: &str,
        attachment: Option<&Attachment>,
    ) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::validation("Describe what you need"));
        }
        if email.trim().is_empty() {
            return Err(Error::validation("Email is required"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            text: text.trim().to_string(),
            file: attachment.map(Attachment::to_data_url),
        })
    }
}

/// Client for the `/requests` resource
#[derive(Clone)]
pub struct RequestStore {
    url: String,
    client: Client,
}

impl RequestStore {
    /// Create a new RequestStore
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/requests{}", self.url, path)
    }

    /// All requests (admin)
    pub async fn list(&self) -> Result<Vec<Request>> {
        Fetch::get(&self.client, &self.get_url(""))
            .execute::<Vec<Request>>()
            .await
    }

    /// A single request (admin)
    pub async fn get(&self, id: &str) -> Result<Request> {
        Fetch::get(&self.client, &self.get_url(&format!("/{}", id)))
            .execute::<Request>()
            .await
    }

    /// Submit a request
    pub async fn create(&self, payload: &NewRequest) -> Result<Request> {
        Fetch::post(&self.client, &self.get_url(""))
            .json(payload)?
            .execute::<Request>()
            .await
    }

    /// Delete a request (admin)
    pub async fn remove(&self, id: &str) -> Result<()> {
        Fetch::delete(&self.client, &self.get_url(&format!("/{}", id)))
            .execute_unit()
            .await
    }
}
