//! Detail page, related listings and screenshot gallery

use log::warn;
use std::collections::HashSet;

use super::html::escape;
use super::listing::{category_line, reaction_buttons};
use super::{detail_href, Rendered, Views, DETAIL_CATEGORIES, DETAIL_TAGS, RELATED};
use crate::comments::Comment;
use crate::plugins::{Plugin, PluginFilter};

/// Fallback for a main screenshot that fails to load
pub const MAIN_PLACEHOLDER: &str = "https://placehold.co/800x420?text=Screenshot";
/// Fallback for a thumbnail that fails to load
pub const THUMB_PLACEHOLDER: &str = "https://placehold.co/120x80?text=Shot";
/// Image shown for related listings without a screenshot
pub const RELATED_PLACEHOLDER: &str = "https://placehold.co/120x80?text=Screenshot";
/// Id of the main screenshot image
pub const MAIN_SCREENSHOT: &str = "mainScreenshotImg";
/// Most related listings shown
pub const MAX_RELATED: usize = 6;

/// Rewrite a YouTube watch URL into its embeddable form
///
/// # Example
///
/// ```
/// use market_client::view::embed_video_url;
///
/// assert_eq!(
///     embed_video_url("https://www.youtube.com/watch?v=abc123"),
///     "https://www.youtube.com/embed/abc123"
/// );
/// ```
pub fn embed_video_url(url: &str) -> String {
    url.replacen("watch?v=", "embed/", 1)
}

fn comments_markup(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "<p>No comments yet.</p>".to_string();
    }
    comments
        .iter()
        .map(|c| {
            format!(
                "<div class=\"card\" data-comment=\"{}\"><strong>{}</strong><p>{}</p></div>",
                escape(&c.id),
                escape(c.author()),
                escape(&c.content)
            )
        })
        .collect()
}

fn composer_markup(signed_in: bool) -> String {
    if signed_in {
        concat!(
            "<div id=\"commentFormWrap\"><div id=\"addCommentArea\">",
            "<textarea id=\"commentText\" placeholder=\"Write your comment\"></textarea>",
            "<button id=\"submitComment\" class=\"btn small\">Submit</button>",
            "</div></div>"
        )
        .to_string()
    } else {
        "<div id=\"commentFormWrap\"><button id=\"btnSignIn\" class=\"btn small\">Sign in to comment</button></div>"
            .to_string()
    }
}

fn gallery_markup(plugin: &Plugin) -> String {
    let Some(first) = plugin.first_screenshot() else {
        return String::new();
    };
    let thumbs: String = plugin
        .screenshots
        .iter()
        .filter(|s| !s.url.is_empty())
        .enumerate()
        .map(|(idx, s)| {
            format!(
                "<a href=\"{url}\" data-scr=\"{url}\" data-idx=\"{idx}\" class=\"screenshot-link\"><img src=\"{url}\" alt=\"screenshot {n}\" onerror=\"this.src='{fallback}'\"></a>",
                url = escape(&s.url),
                idx = idx,
                n = idx + 1,
                fallback = THUMB_PLACEHOLDER
            )
        })
        .collect();
    format!(
        "<div id=\"mainScreenshot\"><img id=\"{id}\" src=\"{src}\" alt=\"main screenshot\" onerror=\"this.src='{fallback}'\"><button id=\"downloadScreenshot\" class=\"btn small\">Download screenshot</button></div><div class=\"screenshots\">{thumbs}</div>",
        id = MAIN_SCREENSHOT,
        src = escape(first),
        fallback = MAIN_PLACEHOLDER,
        thumbs = thumbs
    )
}

/// The detail page body. `desc_text` is admin-authored HTML and is inserted as is.
pub fn detail_markup(plugin: &Plugin, comments: &[Comment], signed_in: bool) -> String {
    let video = plugin
        .video
        .as_deref()
        .map(|v| {
            format!(
                "<iframe width=\"100%\" height=\"180\" src=\"{}\" frameborder=\"0\" allowfullscreen></iframe>",
                escape(&embed_video_url(v))
            )
        })
        .unwrap_or_default();
    let app_link = plugin
        .app_link
        .as_deref()
        .map(|link| {
            format!(
                "<div class=\"app-link\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn\">Open Application</a></div>",
                escape(link)
            )
        })
        .unwrap_or_default();
    let description = if plugin.desc_text.trim().is_empty() {
        "<p>No detailed description provided.</p>"
    } else {
        plugin.desc_text.as_str()
    };

    format!(
        concat!(
            "<div class=\"plugin-detail\">",
            "<div class=\"plugin-meta\"><div class=\"plugin-summary\">",
            "<h1>{title}</h1><p class=\"muted\">{desc}</p><p>Category: {category}</p>",
            "<div class=\"meta-actions\">{reactions}<button id=\"shareBtn\">Share</button></div>",
            "</div><div class=\"plugin-video\">{video}</div></div>",
            "{gallery}{app_link}<button id=\"downloadDescBtn\" class=\"btn ghost\">Download description</button>",
            "<hr/><h2>Full Description</h2><div id=\"fullDescription\">{description}</div>",
            "<hr/><h3>Comments</h3><div id=\"commentsArea\">{comments}</div>{composer}",
            "</div>"
        ),
        title = escape(&plugin.title),
        desc = escape(&plugin.desc),
        category = category_line(plugin),
        reactions = reaction_buttons(plugin),
        video = video,
        gallery = gallery_markup(plugin),
        app_link = app_link,
        description = description,
        comments = comments_markup(comments),
        composer = composer_markup(signed_in),
    )
}

/// Merge the by-category and by-tag results: drop `current`, keep the first
/// occurrence of each id, at most [`MAX_RELATED`] entries.
pub fn related_listings(current: &Plugin, by_category: Vec<Plugin>, by_tags: Vec<Plugin>) -> Vec<Plugin> {
    let mut seen = HashSet::new();
    by_category
        .into_iter()
        .chain(by_tags)
        .filter(|p| p.id != current.id)
        .filter(|p| seen.insert(p.id.clone()))
        .take(MAX_RELATED)
        .collect()
}

/// Related listings sidebar items
pub fn related_markup(related: &[Plugin]) -> String {
    if related.is_empty() {
        return "<li>No related plugins.</li>".to_string();
    }
    related
        .iter()
        .map(|r| {
            format!(
                "<li><a href=\"{}\"><img src=\"{}\" alt=\"\" onerror=\"this.src='{}'\"><span>{}</span></a></li>",
                escape(&detail_href(&r.id)),
                escape(r.first_screenshot().unwrap_or(RELATED_PLACEHOLDER)),
                THUMB_PLACEHOLDER,
                escape(&r.title)
            )
        })
        .collect()
}

/// Modifier state of a thumbnail click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Views {
    /// Rebuild the detail page for `id`. The comment composer is shown only
    /// when `signed_in`, which callers take from the session gate.
    pub async fn render_detail(&self, container_id: &str, id: Option<&str>, signed_in: bool) -> Rendered {
        self.load_detail(container_id, id, signed_in).await.0
    }

    /// [`Views::render_detail`], also returning the listing that was shown
    pub async fn load_detail(
        &self,
        container_id: &str,
        id: Option<&str>,
        signed_in: bool,
    ) -> (Rendered, Option<Plugin>) {
        if !self.doc.is_mounted(container_id) {
            return (Rendered::Skipped, None);
        }
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.doc.set_html(container_id, "<p>Plugin not found</p>".to_string());
            return (Rendered::Failed("Plugin not found".to_string()), None);
        };

        self.begin(container_id);
        let plugin = match self.market.plugins().get(id).await {
            Ok(plugin) => plugin,
            Err(e) => {
                let message = e.to_string();
                let failed = self.fail(
                    container_id,
                    &message,
                    Some(format!("Failed to load plugin: {}", message)),
                );
                return (failed, None);
            }
        };
        let comments = match self.market.comments().list_for_plugin(id).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("comments for {} unavailable: {}", id, e);
                Vec::new()
            }
        };

        self.doc
            .set_html(container_id, detail_markup(&plugin, &comments, signed_in));
        match plugin.first_screenshot() {
            Some(first) => self.doc.set_attribute(MAIN_SCREENSHOT, "src", first),
            None => self.doc.remove_attribute(MAIN_SCREENSHOT, "src"),
        }

        self.render_related(RELATED, &plugin).await;
        self.render_category_list(DETAIL_CATEGORIES).await;
        self.render_tag_cloud(DETAIL_TAGS).await;
        (Rendered::Items(1), Some(plugin))
    }

    /// Rebuild the related listings sidebar for `plugin`
    pub async fn render_related(&self, container_id: &str, plugin: &Plugin) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        let store = self.market.plugins();
        let by_category = match store
            .list(&PluginFilter::new().category(&plugin.category))
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!("related listings unavailable: {}", e);
                return self.fail(container_id, &e.to_string(), None);
            }
        };
        let by_tags = if plugin.tags.is_empty() {
            Vec::new()
        } else {
            store
                .list(&PluginFilter::new().tags(plugin.tags.iter().cloned()))
                .await
                .unwrap_or_else(|e| {
                    warn!("related-by-tag query failed: {}", e);
                    Vec::new()
                })
        };
        let related = related_listings(plugin, by_category, by_tags);
        self.doc.set_html(container_id, related_markup(&related));
        Rendered::Items(related.len())
    }

    /// A gallery thumbnail was clicked: swap the main screenshot, and with
    /// ctrl/cmd held also open the full image in a new tab
    pub fn thumbnail_click(&self, url: &str, modifiers: ClickModifiers) {
        self.doc.set_attribute(MAIN_SCREENSHOT, "src", url);
        if modifiers.ctrl || modifiers.meta {
            self.doc.open_tab(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::Screenshot;

    fn plugin(id: &str) -> Plugin {
        serde_json::from_value(serde_json::json!({
            "_id": id, "title": format!("Plugin {}", id), "category": "Wordpress"
        }))
        .unwrap()
    }

    #[test]
    fn test_zero_screenshots_omit_gallery() {
        let html = detail_markup(&plugin("a"), &[], false);
        assert!(!html.contains("mainScreenshot"));
        assert!(!html.contains("screenshot-link"));
        assert!(!html.contains("placehold.co"));
        assert!(html.contains("No detailed description provided."));
        assert!(html.contains("Sign in to comment"));
        assert!(!html.contains("commentText"));
    }

    #[test]
    fn test_gallery_and_extras() {
        let mut p = plugin("a");
        p.screenshots = vec![Screenshot::new("one.png"), Screenshot::new("two.png")];
        p.video = Some("https://www.youtube.com/watch?v=xyz".into());
        p.app_link = Some("https://app.example.com".into());
        p.desc_text = "<p><b>Rich</b></p>".into();
        let html = detail_markup(&p, &[], true);
        assert!(html.contains("<img id=\"mainScreenshotImg\" src=\"one.png\""));
        assert!(html.contains("data-scr=\"two.png\" data-idx=\"1\""));
        assert!(html.contains("https://www.youtube.com/embed/xyz"));
        assert!(html.contains("Open Application"));
        assert!(html.contains("<p><b>Rich</b></p>"));
        assert!(html.contains("commentText"));
    }

    #[test]
    fn test_gallery_skips_empty_urls() {
        let mut p = plugin("a");
        p.screenshots = vec![Screenshot::new(""), Screenshot::new("one.png"), Screenshot::new("")];
        let html = detail_markup(&p, &[], false);
        assert!(html.contains("<img id=\"mainScreenshotImg\" src=\"one.png\""));
        assert_eq!(html.matches("class=\"screenshot-link\"").count(), 1);
        assert!(html.contains("data-scr=\"one.png\" data-idx=\"0\""));
        assert!(!html.contains("data-scr=\"\""));
    }

    #[test]
    fn test_related_dedup_exclude_and_truncate() {
        let current = plugin("a");
        let by_cat = vec![plugin("a"), plugin("b"), plugin("c"), plugin("b")];
        let by_tags = vec![plugin("c"), plugin("d"), plugin("e"), plugin("f"), plugin("g"), plugin("h")];
        let ids: Vec<String> = related_listings(&current, by_cat, by_tags)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_comments_render_author_fallback() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "_id": "c1", "pluginId": "a", "content": "Nice <3"
        }))
        .unwrap();
        let html = detail_markup(&plugin("a"), &[comment], false);
        assert!(html.contains("<strong>Guest</strong><p>Nice &lt;3</p>"));
    }
}
