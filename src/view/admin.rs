//! Admin panel tables

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::html::escape;
use super::listing::category_line;
use super::{detail_href, Rendered, Views};
use crate::categories::Category;
use crate::comments::Comment;
use crate::contact::ContactMessage;
use crate::plugins::{Plugin, PluginFilter};
use crate::requests::Request;

/// Display a backend timestamp: strings as is, epoch milliseconds as `YYYY-MM-DD HH:MM` UTC
pub fn format_created(created: Option<&Value>) -> String {
    match created {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| n.to_string()),
        _ => String::new(),
    }
}

/// One row of the admin listing table
pub fn admin_plugin_markup(plugin: &Plugin) -> String {
    let id = escape(&plugin.id);
    let app = plugin
        .app_link
        .as_deref()
        .map(|link| {
            format!(
                "<div class=\"app-link\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"btn ghost small\">Open App</a></div>",
                escape(link)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"card\"><strong>{title}</strong><p class=\"muted\">{category}</p>{app}<button data-id=\"{id}\" class=\"editPlugin small\">Edit</button><button data-id=\"{id}\" class=\"delPlugin small\">Delete</button><a href=\"{href}\">View</a></div>",
        title = escape(&plugin.title),
        category = category_line(plugin),
        app = app,
        id = id,
        href = escape(&detail_href(&plugin.id)),
    )
}

/// Admin category list
pub fn admin_categories_markup(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "<li>No categories</li>".to_string();
    }
    categories
        .iter()
        .map(|c| {
            let subs = if c.subs.is_empty() {
                String::new()
            } else {
                format!(
                    "<div class=\"subs\">Subs: {}</div>",
                    escape(&c.subs.join(", "))
                )
            };
            format!(
                "<li>{} <button data-del=\"{}\" class=\"small delCatBtn\" title=\"Delete category\">Delete</button>{}</li>",
                escape(&c.name),
                escape(&c.id),
                subs
            )
        })
        .collect()
}

/// Admin request list
pub fn admin_requests_markup(requests: &[Request]) -> String {
    if requests.is_empty() {
        return "<p>No requests</p>".to_string();
    }
    requests
        .iter()
        .map(|r| {
            let file = r
                .file
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(|f| format!("<a href=\"{}\" download class=\"small\">Attachment</a>", escape(f)))
                .unwrap_or_default();
            format!(
                "<div class=\"card\"><strong>{}</strong><p>{}</p><div class=\"muted\">{} • {}</div>{}<button data-rid=\"{}\" class=\"small\">Delete</button></div>",
                escape(&r.name),
                escape(&r.text),
                escape(&r.email),
                escape(&format_created(r.created.as_ref())),
                file,
                escape(&r.id)
            )
        })
        .collect()
}

/// Admin comment list
pub fn admin_comments_markup(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "<p>No comments</p>".to_string();
    }
    comments
        .iter()
        .map(|c| {
            format!(
                "<div class=\"card\"><strong>{}</strong><p>{}</p><div class=\"muted\">{}</div><a href=\"{}\">View listing</a><button data-delc=\"{}\" class=\"small\">Delete</button></div>",
                escape(c.author()),
                escape(&c.content),
                escape(c.created_at.as_deref().unwrap_or_default()),
                escape(&detail_href(&c.plugin_id)),
                escape(&c.id)
            )
        })
        .collect()
}

/// Admin contact message list
pub fn admin_contacts_markup(messages: &[ContactMessage]) -> String {
    if messages.is_empty() {
        return "<p>No messages</p>".to_string();
    }
    messages
        .iter()
        .map(|m| {
            format!(
                "<div class=\"card\"><strong>{}</strong><p>{}</p><div class=\"muted\">{}</div><button data-mid=\"{}\" class=\"small\">Delete</button></div>",
                escape(&m.email),
                escape(&m.message),
                escape(&format_created(m.created.as_ref())),
                escape(&m.id)
            )
        })
        .collect()
}

impl Views {
    /// Rebuild the admin listing table
    pub async fn render_admin_plugins(&self, container_id: &str) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        match self.market.plugins().list(&PluginFilter::new()).await {
            Ok(items) if items.is_empty() => {
                self.doc.set_html(container_id, "<p>No plugins</p>".to_string());
                Rendered::Items(0)
            }
            Ok(items) => {
                self.doc.set_html(
                    container_id,
                    items.iter().map(admin_plugin_markup).collect(),
                );
                Rendered::Items(items.len())
            }
            Err(e) => {
                let message = e.to_string();
                self.fail(container_id, &message, Some(format!("Failed to load plugins: {}", message)))
            }
        }
    }

    /// Rebuild the admin category list; returns the categories for the selects
    pub async fn render_admin_categories(&self, container_id: &str) -> (Rendered, Vec<Category>) {
        if !self.begin(container_id) {
            return (Rendered::Skipped, Vec::new());
        }
        match self.market.categories().list().await {
            Ok(categories) => {
                self.doc
                    .set_html(container_id, admin_categories_markup(&categories));
                (Rendered::Items(categories.len()), categories)
            }
            Err(e) => {
                let message = e.to_string();
                let rendered = self.fail(
                    container_id,
                    &message,
                    Some(format!("Failed to load categories: {}", message)),
                );
                (rendered, Vec::new())
            }
        }
    }

    /// Rebuild the admin request list
    pub async fn render_admin_requests(&self, container_id: &str) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        match self.market.requests().list().await {
            Ok(items) => {
                self.doc.set_html(container_id, admin_requests_markup(&items));
                Rendered::Items(items.len())
            }
            Err(e) => self.fail(container_id, &e.to_string(), None),
        }
    }

    /// Rebuild the admin comment list
    pub async fn render_admin_comments(&self, container_id: &str) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        match self.market.comments().list().await {
            Ok(items) => {
                self.doc.set_html(container_id, admin_comments_markup(&items));
                Rendered::Items(items.len())
            }
            Err(e) => self.fail(container_id, &e.to_string(), None),
        }
    }

    /// Rebuild the admin contact message list
    pub async fn render_admin_contacts(&self, container_id: &str) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        match self.market.contact().list().await {
            Ok(items) => {
                self.doc.set_html(container_id, admin_contacts_markup(&items));
                Rendered::Items(items.len())
            }
            Err(e) => self.fail(container_id, &e.to_string(), None),
        }
    }
}
