//! Contact form messages

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::Fetch;

/// A message left through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(alias = "msg", default)]
    pub message: String,
    #[serde(alias = "createdAt", default)]
    pub created: Option<serde_json::Value>,
}

/// Payload for the contact form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContact {
    pub email: String,
    pub message: String,
}

impl NewContact {
    /// Validate form input and build the payload
    pub fn new(email: &str, message: &str) -> Result<Self> {
        if email.trim().is_empty() || message.trim().is_empty() {
            return Err(Error::validation("Email and message are required"));
        }
        Ok(Self {
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        })
    }
}

/// Client for the `/contact` resource
#[derive(Clone)]
pub struct ContactStore {
    url: String,
    client: Client,
}

impl ContactStore {
    /// Create a new ContactStore
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/contact{}", self.url, path)
    }

    /// All messages (admin)
    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        Fetch::get(&self.client, &self.get_url(""))
            .execute::<Vec<ContactMessage>>()
            .await
    }

    /// One message by id (admin)
    pub async fn get(&self, id: &str) -> Result<ContactMessage> {
        Fetch::get(&self.client, &self.get_url(&format!("/{}", id)))
            .execute::<ContactMessage>()
            .await
    }

    /// Send a message
    pub async fn create(&self, payload: &NewContact) -> Result<ContactMessage> {
        Fetch::post(&self.client, &self.get_url(""))
            .json(payload)?
            .execute::<ContactMessage>()
            .await
    }

    /// Delete a message (admin)
    pub async fn remove(&self, id: &str) -> Result<()> {
        Fetch::delete(&self.client, &self.get_url(&format!("/{}", id)))
            .execute_unit()
            .await
    }
}
