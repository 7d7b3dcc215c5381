//! Categories and their subcategories

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::Fetch;

/// A category with its ordered subcategories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category ID
    #[serde(alias = "_id", default)]
    pub id: String,

    /// Unique name
    #[serde(default)]
    pub name: String,

    /// Subcategory names, unique within the category
    #[serde(default)]
    pub subs: Vec<String>,
}

impl Category {
    /// Whether `sub` belongs to this category
    pub fn has_sub(&self, sub: &str) -> bool {
        self.subs.iter().any(|s| s == sub)
    }
}

/// Find a category by name
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

/// Payload for creating a category
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub subs: Vec<String>,
}

impl NewCategory {
    /// Build a payload, trimming the name and dropping blank or repeated subs
    pub fn new(name: &str, subs: &[&str]) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Category name is required"));
        }
        let mut unique: Vec<String> = Vec::new();
        for sub in subs.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !unique.iter().any(|u| u == sub) {
                unique.push(sub.to_string());
            }
        }
        Ok(Self {
            name: name.to_string(),
            subs: unique,
        })
    }
}

/// Partial update for a category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subs: Option<Vec<String>>,
}

/// Client for the `/categories` resource
#[derive(Clone)]
pub struct CategoryStore {
    url: String,
    client: Client,
}

impl CategoryStore {
    /// Create a new CategoryStore
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/categories{}", self.url, path)
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        Fetch::get(&self.client, &self.get_url(""))
            .execute::<Vec<Category>>()
            .await
    }

    /// Create a category
    pub async fn create(&self, payload: &NewCategory) -> Result<Category> {
        Fetch::post(&self.client, &self.get_url(""))
            .json(payload)?
            .execute::<Category>()
            .await
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, patch: &CategoryPatch) -> Result<Category> {
        Fetch::patch(&self.client, &self.get_url(&format!("/{}", id)))
            .json(patch)?
            .execute::<Category>()
            .await
    }

    /// Delete a category
    pub async fn remove(&self, id: &str) -> Result<()> {
        Fetch::delete(&self.client, &self.get_url(&format!("/{}", id)))
            .execute_unit()
            .await
    }

    /// Append a subcategory. Adding one that already exists sends nothing and
    /// returns the category unchanged.
    pub async fn add_subcategory(&self, category: &Category, sub: &str) -> Result<Category> {
        let sub = sub.trim();
        if sub.is_empty() {
            return Err(Error::validation("Subcategory name is required"));
        }
        if category.has_sub(sub) {
            return Ok(category.clone());
        }
        let mut subs = category.subs.clone();
        subs.push(sub.to_string());
        let patch = CategoryPatch {
            name: None,
            subs: Some(subs),
        };
        self.update(&category.id, &patch).await
    }
}
