//! Share and download buttons of the detail page

use log::debug;

use crate::app::App;
use crate::ui::ToastLevel;
use crate::view::{Download, DownloadSource, MAIN_SCREENSHOT};

/// What a detail page button ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Handed to the share sheet
    Shared,
    /// No share sheet; the link was shown in a prompt
    Prompted,
    /// The listing's application was opened in a new tab
    OpenedApp(String),
    /// A download was started under this file name
    Downloaded(String),
    /// Nothing to act on; a warning is showing
    Unavailable,
}

fn title_or<'a>(title: Option<&'a str>, fallback: &'a str) -> &'a str {
    title.filter(|t| !t.is_empty()).unwrap_or(fallback)
}

impl App {
    /// Share the current page
    pub fn share_current(&self) -> DetailAction {
        let Some(url) = self.document().location() else {
            self.toast("Nothing to share", ToastLevel::Warning);
            return DetailAction::Unavailable;
        };
        let title = self.state().shown().map(|p| p.title).unwrap_or_default();
        if self.document().share(&title, &url) {
            debug!("shared {}", url);
            return DetailAction::Shared;
        }
        self.document().prompt("Share link", &url);
        self.toast("Link copied prompt shown", ToastLevel::Info);
        DetailAction::Prompted
    }

    /// The share sheet was dismissed without sharing
    pub fn share_cancelled(&self) {
        self.toast("Share cancelled", ToastLevel::Info);
    }

    /// Open the listing's application, or download its description as HTML
    pub fn download_description(&self) -> DetailAction {
        let Some(plugin) = self.state().shown() else {
            self.toast("No plugin loaded", ToastLevel::Warning);
            return DetailAction::Unavailable;
        };
        if let Some(link) = plugin.app_link.as_deref().filter(|l| !l.is_empty()) {
            self.document().open_tab(link);
            return DetailAction::OpenedApp(link.to_string());
        }
        let body = if plugin.desc_text.trim().is_empty() {
            plugin.desc.clone()
        } else {
            plugin.desc_text.clone()
        };
        let file_name = format!("{}-description.html", title_or(Some(plugin.title.as_str()), "plugin"));
        self.document().download(Download {
            file_name: file_name.clone(),
            source: DownloadSource::Inline {
                content_type: "text/html".to_string(),
                body,
            },
        });
        self.toast("Description downloaded", ToastLevel::Success);
        DetailAction::Downloaded(file_name)
    }

    /// Download the image currently in the main screenshot slot
    pub fn download_screenshot(&self) -> DetailAction {
        let Some(src) = self
            .document()
            .attribute(MAIN_SCREENSHOT, "src")
            .filter(|s| !s.is_empty())
        else {
            self.toast("No screenshot to download", ToastLevel::Warning);
            return DetailAction::Unavailable;
        };
        let title = self.state().shown().map(|p| p.title);
        let file_name = format!("{}.png", title_or(title.as_deref(), "screenshot"));
        self.document().download(Download {
            file_name: file_name.clone(),
            source: DownloadSource::Url(src),
        });
        self.toast("Screenshot download started", ToastLevel::Info);
        DetailAction::Downloaded(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fallback() {
        assert_eq!(title_or(Some("Tab Saver"), "plugin"), "Tab Saver");
        assert_eq!(title_or(Some(""), "plugin"), "plugin");
        assert_eq!(title_or(None, "screenshot"), "screenshot");
    }
}
