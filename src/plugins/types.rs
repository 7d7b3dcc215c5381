//! Types for plugin listings

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;

/// Placeholder shown on cards when a listing has no usable screenshot
pub const CARD_PLACEHOLDER: &str = "https://placehold.co/400x220?text=Screenshot";

/// A screenshot reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Image URL (remote or `data:`)
    pub url: String,
}

impl Screenshot {
    /// Create a screenshot from a URL
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }

    /// Create a screenshot from an uploaded file
    pub fn from_attachment(file: &Attachment) -> Self {
        Self { url: file.to_data_url() }
    }
}

/// A plugin listing as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PluginRecord")]
pub struct Plugin {
    /// The listing ID
    pub id: String,

    /// Title
    pub title: String,

    /// Short description
    pub desc: String,

    /// Full HTML description
    pub desc_text: String,

    /// Category name
    pub category: String,

    /// Subcategory name, empty when unset
    pub subcategory: String,

    /// Tags in insertion order
    pub tags: Vec<String>,

    /// Screenshots; the first one is the main image
    pub screenshots: Vec<Screenshot>,

    /// Video URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,

    /// External application link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_link: Option<String>,

    /// Heart reactions
    pub hearts: u64,

    /// Like reactions
    pub likes: u64,

    /// Ok reactions
    pub oks: u64,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Plugin {
    /// URL of the first non-empty screenshot, if any
    pub fn first_screenshot(&self) -> Option<&str> {
        self.screenshots
            .iter()
            .map(|s| s.url.as_str())
            .find(|url| !url.is_empty())
    }

    /// "category • subcategory", or just the category without a subcategory
    pub fn category_label(&self) -> String {
        if self.subcategory.is_empty() {
            self.category.clone()
        } else {
            format!("{} • {}", self.category, self.subcategory)
        }
    }

    /// Current value of a reaction counter
    pub fn reaction_count(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Heart => self.hearts,
            Reaction::Like => self.likes,
            Reaction::Ok => self.oks,
        }
    }
}

/// Wire shape of a listing. Mongo-backed responses carry `_id`, some also a
/// virtual `id`; any field may be `null`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PluginRecord {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    title: Option<String>,
    desc: Option<String>,
    desc_text: Option<String>,
    category: Option<String>,
    subcategory: Option<String>,
    tags: Option<Vec<String>>,
    screenshots: Option<Vec<Screenshot>>,
    video: Option<String>,
    app_link: Option<String>,
    hearts: Option<u64>,
    likes: Option<u64>,
    oks: Option<u64>,
    created_at: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<PluginRecord> for Plugin {
    fn from(raw: PluginRecord) -> Self {
        Self {
            id: raw.mongo_id.or(raw.id).unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            desc: raw.desc.unwrap_or_default(),
            desc_text: raw.desc_text.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            subcategory: raw.subcategory.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
            screenshots: raw.screenshots.unwrap_or_default(),
            video: non_empty(raw.video),
            app_link: non_empty(raw.app_link),
            hearts: raw.hearts.unwrap_or(0),
            likes: raw.likes.unwrap_or(0),
            oks: raw.oks.unwrap_or(0),
            created_at: raw.created_at,
        }
    }
}

/// Reaction kinds a visitor can add to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    Heart,
    Like,
    Ok,
}

impl Reaction {
    /// All reactions, in display order
    pub const ALL: [Reaction; 3] = [Reaction::Heart, Reaction::Like, Reaction::Ok];

    /// Parse the `data-act` value of a reaction button
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "heart" => Some(Reaction::Heart),
            "like" => Some(Reaction::Like),
            "ok" => Some(Reaction::Ok),
            _ => None,
        }
    }

    /// The `data-act` value
    pub fn action(&self) -> &'static str {
        match self {
            Reaction::Heart => "heart",
            Reaction::Like => "like",
            Reaction::Ok => "ok",
        }
    }

    /// The counter field on the listing
    pub fn field(&self) -> &'static str {
        match self {
            Reaction::Heart => "hearts",
            Reaction::Like => "likes",
            Reaction::Ok => "oks",
        }
    }

    /// Button glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Reaction::Heart => "❤",
            Reaction::Like => "👍",
            Reaction::Ok => "👌",
        }
    }
}

/// Payload for creating a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlugin {
    pub title: String,
    pub desc: String,
    pub desc_text: String,
    pub tags: Vec<String>,
    pub category: String,
    pub subcategory: String,
    pub screenshots: Vec<Screenshot>,
    pub video: String,
    pub app_link: String,
}

/// Partial update for a listing. Fields left `None` are not sent and stay
/// untouched on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<Screenshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearts: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oks: Option<u64>,
}

impl PluginPatch {
    /// A patch touching a single reaction counter
    pub fn reaction(reaction: Reaction, value: u64) -> Self {
        let mut patch = Self::default();
        match reaction {
            Reaction::Heart => patch.hearts = Some(value),
            Reaction::Like => patch.likes = Some(value),
            Reaction::Ok => patch.oks = Some(value),
        }
        patch
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// How newly uploaded screenshots combine with the existing ones on edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenshotEdit {
    /// Keep the existing list and add the new ones after it
    #[default]
    Append,
    /// Drop the existing list
    Replace,
}

impl ScreenshotEdit {
    /// Combine `existing` and `uploaded`. Returns `None` when nothing was
    /// uploaded, meaning the screenshot list must not be sent at all.
    pub fn resolve(
        &self,
        existing: &[Screenshot],
        uploaded: Vec<Screenshot>,
    ) -> Option<Vec<Screenshot>> {
        if uploaded.is_empty() {
            return None;
        }
        match self {
            ScreenshotEdit::Replace => Some(uploaded),
            ScreenshotEdit::Append => {
                let mut all = existing.to_vec();
                all.extend(uploaded);
                Some(all)
            }
        }
    }
}

/// Split a comma-separated tag input into trimmed, non-empty tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
