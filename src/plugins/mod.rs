//! Plugin listings: browsing, admin CRUD and reactions

mod filter;
mod types;

use log::debug;
use reqwest::Client;

use crate::error::Result;
use crate::fetch::Fetch;

pub use filter::*;
pub use types::*;

/// Client for the `/plugins` resource
#[derive(Clone)]
pub struct PluginStore {
    /// The API base URL
    url: String,

    /// HTTP client
    client: Client,
}

impl PluginStore {
    /// Create a new PluginStore
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/plugins{}", self.url, path)
    }

    /// List listings matching `filter`. Filtering happens on the backend only.
    pub async fn list(&self, filter: &PluginFilter) -> Result<Vec<Plugin>> {
        let url = self.get_url("");
        let mut request = Fetch::get(&self.client, &url);
        for (key, value) in filter.to_query_pairs() {
            request = request.query(key, &value);
        }
        request.execute::<Vec<Plugin>>().await
    }

    /// Fetch a single listing
    pub async fn get(&self, id: &str) -> Result<Plugin> {
        let url = self.get_url(&format!("/{}", id));
        Fetch::get(&self.client, &url).execute::<Plugin>().await
    }

    /// Create a listing
    pub async fn create(&self, payload: &NewPlugin) -> Result<Plugin> {
        let url = self.get_url("");
        Fetch::post(&self.client, &url)
            .json(payload)?
            .execute::<Plugin>()
            .await
    }

    /// Apply a partial update; fields absent from `patch` are untouched
    pub async fn update(&self, id: &str, patch: &PluginPatch) -> Result<Plugin> {
        let url = self.get_url(&format!("/{}", id));
        Fetch::patch(&self.client, &url)
            .json(patch)?
            .execute::<Plugin>()
            .await
    }

    /// Hide a listing without purging it
    pub async fn soft_delete(&self, id: &str) -> Result<()> {
        let url = self.get_url(&format!("/{}", id));
        Fetch::delete(&self.client, &url).execute_unit().await
    }

    /// Undo a soft delete
    pub async fn restore(&self, id: &str) -> Result<Plugin> {
        let url = self.get_url(&format!("/{}/restore", id));
        Fetch::post(&self.client, &url).execute::<Plugin>().await
    }

    /// Add one to a reaction counter.
    ///
    /// This reads the current value and writes back `current + 1`. It is not
    /// atomic: two overlapping increments of the same counter can both read
    /// the same value and one of them is lost. Fixing that needs an atomic
    /// increment endpoint on the backend.
    pub async fn inc(&self, id: &str, reaction: Reaction) -> Result<Plugin> {
        let current = self.get(id).await?.reaction_count(reaction);
        debug!("{} {} -> {}", id, reaction.field(), current + 1);
        self.update(id, &PluginPatch::reaction(reaction, current + 1))
            .await
    }
}
