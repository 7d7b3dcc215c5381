//! Renderers that rebuild page containers from backend data
//!
//! Every renderer owns its container for the duration of a rebuild: it writes
//! a loading placeholder, awaits the store, then replaces the whole container
//! with the result or an inline error. Nothing is patched in place, so calling
//! a renderer again is always safe. Two overlapping renders of one container
//! are not ordered; whichever response arrives last is what stays on screen.

mod admin;
mod detail;
mod document;
pub mod html;
mod listing;
mod sidebar;

use crate::ui::{ToastLevel, ToastStack};
use crate::Marketplace;

pub use admin::*;
pub use detail::*;
pub use document::*;
pub use listing::*;
pub use sidebar::*;

/// Home page grid
pub const HOME_GRID: &str = "pluginsContainer";
/// Listing page results
pub const LISTING: &str = "listContainer";
/// Detail page body
pub const DETAIL: &str = "pluginDetail";
/// Detail page related listings
pub const RELATED: &str = "relatedPlugins";
/// Detail page category list
pub const DETAIL_CATEGORIES: &str = "detailCategories";
/// Detail page tag cloud
pub const DETAIL_TAGS: &str = "detailTags";
/// Home page category list
pub const CATEGORY_LIST: &str = "categoryList";
/// Home page tag cloud
pub const TAG_LIST: &str = "tagList";
/// Listing page category select
pub const CATEGORY_FILTER: &str = "categoryFilter";
/// Listing page subcategory select
pub const SUBCATEGORY_FILTER: &str = "subcatFilter";
/// Admin listing table
pub const ADMIN_PLUGINS: &str = "adminPlugins";
/// Admin category list
pub const ADMIN_CATEGORIES: &str = "adminCats";
/// Admin request list
pub const ADMIN_REQUESTS: &str = "adminRequests";
/// Admin comment list
pub const ADMIN_COMMENTS: &str = "adminComments";
/// Admin contact message list
pub const ADMIN_CONTACTS: &str = "adminContacts";

const LOADING: &str = "<p class=\"muted\">Loading...</p>";

/// What a render call ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The container is not on this page; nothing was fetched
    Skipped,
    /// Rendered this many items
    Items(usize),
    /// The fetch failed; the container shows the message
    Failed(String),
}

/// Link to a listing's detail page
pub fn detail_href(id: &str) -> String {
    format!("detail.html?id={}", urlencoding::encode(id))
}

/// Link to the listing page for a search
pub fn search_href(q: &str) -> String {
    format!("listing.html?q={}", urlencoding::encode(q))
}

/// Link to the listing page for a tag
pub fn tag_href(tag: &str) -> String {
    format!("listing.html?tag={}", urlencoding::encode(tag))
}

/// Link to the listing page for a category
pub fn category_href(cat: &str) -> String {
    format!("listing.html?cat={}", urlencoding::encode(cat))
}

/// Renders pages for one document
#[derive(Clone)]
pub struct Views {
    doc: Document,
    market: Marketplace,
    toasts: ToastStack,
}

impl Views {
    /// Create renderers writing into `doc`
    pub fn new(doc: Document, market: Marketplace, toasts: ToastStack) -> Self {
        Self { doc, market, toasts }
    }

    /// The document being rendered into
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Put the loading placeholder up. False if the container is not mounted.
    fn begin(&self, container_id: &str) -> bool {
        self.doc.set_html(container_id, LOADING.to_string())
    }

    /// Replace the container with an inline error and optionally toast it
    fn fail(&self, container_id: &str, inline: &str, toast: Option<String>) -> Rendered {
        self.doc.set_html(container_id, html::error(inline));
        if let Some(message) = toast {
            self.toasts.show(&message, ToastLevel::Error);
        }
        Rendered::Failed(inline.to_string())
    }
}
