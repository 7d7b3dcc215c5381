//! Comments on listings

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::Fetch;

/// A comment on a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The comment ID
    #[serde(alias = "_id", default)]
    pub id: String,

    /// The listing this comment belongs to
    #[serde(rename = "pluginId", default)]
    pub plugin_id: String,

    /// Comment body (plain text)
    #[serde(default)]
    pub content: String,

    /// Author display name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Author email
    #[serde(default)]
    pub user_email: Option<String>,

    /// Creation timestamp
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,

    /// Moderation flag, if the backend reports one. Not interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl Comment {
    /// Name to show, falling back to "Guest"
    pub fn author(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Guest")
    }
}

#[derive(Serialize)]
struct NewComment<'a> {
    content: &'a str,
}

/// Client for comments, both per-listing and the admin-wide list
#[derive(Clone)]
pub struct CommentStore {
    url: String,
    client: Client,
}

impl CommentStore {
    /// Create a new CommentStore
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Comments for one listing
    pub async fn list_for_plugin(&self, plugin_id: &str) -> Result<Vec<Comment>> {
        let url = format!("{}/plugins/{}/comments", self.url, plugin_id);
        Fetch::get(&self.client, &url).execute::<Vec<Comment>>().await
    }

    /// Post a comment as the signed-in user. The author is taken from the
    /// session cookie by the backend.
    pub async fn create_for_plugin(&self, plugin_id: &str, content: &str) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::validation("Write something"));
        }
        let url = format!("{}/plugins/{}/comments", self.url, plugin_id);
        Fetch::post(&self.client, &url)
            .json(&NewComment { content })?
            .execute::<Comment>()
            .await
    }

    /// All comments (admin)
    pub async fn list(&self) -> Result<Vec<Comment>> {
        let url = format!("{}/comments", self.url);
        Fetch::get(&self.client, &url).execute::<Vec<Comment>>().await
    }

    /// One comment by id (admin)
    pub async fn get(&self, id: &str) -> Result<Comment> {
        let url = format!("{}/comments/{}", self.url, id);
        Fetch::get(&self.client, &url).execute::<Comment>().await
    }

    /// Delete a comment (admin)
    pub async fn remove(&self, id: &str) -> Result<()> {
        let url = format!("{}/comments/{}", self.url, id);
        Fetch::delete(&self.client, &url).execute_unit().await
    }
}
