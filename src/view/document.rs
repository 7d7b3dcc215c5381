//! In-memory page model
//!
//! Renderers write markup into containers identified by element id; the gate
//! and modals toggle attributes. A browser binding mirrors these writes into
//! the real DOM. The lock is never held across an await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use url::Url;

/// A navigation requested by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Target, relative to the site root
    pub href: String,

    /// Replace the current history entry instead of pushing one
    pub replace: bool,
}

/// Where the bytes of a download come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    /// Fetched from a URL
    Url(String),
    /// Generated in the page
    Inline { content_type: String, body: String },
}

/// A file download started by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub source: DownloadSource,
}

/// A link handed to the platform share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Default)]
struct Page {
    location: Option<Url>,
    containers: HashMap<String, String>,
    attributes: HashMap<String, HashMap<String, String>>,
    focused: Option<String>,
    navigations: Vec<Navigation>,
    opened_tabs: Vec<String>,
    can_share: bool,
    shares: Vec<Share>,
    prompts: Vec<(String, String)>,
    downloads: Vec<Download>,
}

/// Shared handle to the current page
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<Mutex<Page>>,
}

impl Document {
    /// An empty page with no containers mounted
    pub fn new() -> Self {
        Self::default()
    }

    /// A page at `location` (e.g. `https://host/detail.html?id=...`)
    pub fn at(location: &str) -> Self {
        let doc = Self::new();
        doc.page().location = Url::parse(location).ok();
        doc
    }

    fn page(&self) -> MutexGuard<'_, Page> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Value of a query parameter of the page location
    pub fn query_param(&self, name: &str) -> Option<String> {
        let page = self.page();
        let location = page.location.as_ref()?;
        let value = location
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned());
        value
    }

    /// Full page URL, if known
    pub fn location(&self) -> Option<String> {
        self.page().location.as_ref().map(Url::to_string)
    }

    /// Last path segment of the page location, e.g. `listing.html`
    pub fn page_name(&self) -> Option<String> {
        let page = self.page();
        let location = page.location.as_ref()?;
        let name = location
            .path_segments()
            .and_then(|mut s| s.next_back().map(str::to_string));
        name
    }

    /// Mount an empty container
    pub fn mount(&self, id: &str) {
        self.page().containers.entry(id.to_string()).or_default();
    }

    /// Remove a container and its attributes
    pub fn unmount(&self, id: &str) {
        let mut page = self.page();
        page.containers.remove(id);
        page.attributes.remove(id);
    }

    /// Whether a container is on the page
    pub fn is_mounted(&self, id: &str) -> bool {
        self.page().containers.contains_key(id)
    }

    /// Replace a container's contents. Returns false if it is not mounted.
    pub fn set_html(&self, id: &str, html: String) -> bool {
        match self.page().containers.get_mut(id) {
            Some(slot) => {
                *slot = html;
                true
            }
            None => false,
        }
    }

    /// A container's current contents
    pub fn html(&self, id: &str) -> Option<String> {
        self.page().containers.get(id).cloned()
    }

    /// Set an attribute on an element
    pub fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.page()
            .attributes
            .entry(id.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&self, id: &str, name: &str) {
        if let Some(attrs) = self.page().attributes.get_mut(id) {
            attrs.remove(name);
        }
    }

    /// An element's attribute
    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.page()
            .attributes
            .get(id)
            .and_then(|attrs| attrs.get(name).cloned())
    }

    /// Move focus to an element
    pub fn focus(&self, id: &str) {
        self.page().focused = Some(id.to_string());
    }

    /// The focused element
    pub fn focused(&self) -> Option<String> {
        self.page().focused.clone()
    }

    /// Navigate away, pushing a history entry
    pub fn navigate(&self, href: &str) {
        self.page().navigations.push(Navigation {
            href: href.to_string(),
            replace: false,
        });
    }

    /// Navigate away, replacing the current history entry
    pub fn replace_location(&self, href: &str) {
        self.page().navigations.push(Navigation {
            href: href.to_string(),
            replace: true,
        });
    }

    /// Navigations requested so far, oldest first
    pub fn navigations(&self) -> Vec<Navigation> {
        self.page().navigations.clone()
    }

    /// Open a URL in a new tab
    pub fn open_tab(&self, url: &str) {
        self.page().opened_tabs.push(url.to_string());
    }

    /// URLs opened in new tabs so far
    pub fn opened_tabs(&self) -> Vec<String> {
        self.page().opened_tabs.clone()
    }

    /// Declare whether the platform offers a native share sheet
    pub fn set_can_share(&self, can_share: bool) {
        self.page().can_share = can_share;
    }

    /// Hand a link to the share sheet. False (and nothing recorded) if the
    /// platform has none.
    pub fn share(&self, title: &str, url: &str) -> bool {
        let mut page = self.page();
        if !page.can_share {
            return false;
        }
        page.shares.push(Share {
            title: title.to_string(),
            url: url.to_string(),
        });
        true
    }

    /// Links shared so far
    pub fn shares(&self) -> Vec<Share> {
        self.page().shares.clone()
    }

    /// Show a prompt with a prefilled value
    pub fn prompt(&self, label: &str, value: &str) {
        self.page()
            .prompts
            .push((label.to_string(), value.to_string()));
    }

    /// Prompts shown so far, as (label, value)
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.page().prompts.clone()
    }

    /// Start a file download
    pub fn download(&self, download: Download) {
        self.page().downloads.push(download);
    }

    /// Downloads started so far
    pub fn downloads(&self) -> Vec<Download> {
        self.page().downloads.clone()
    }
}
