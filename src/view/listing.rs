//! Listing grid

use super::html::{escape, muted};
use super::{detail_href, Rendered, Views};
use crate::plugins::{Plugin, PluginFilter, Reaction, CARD_PLACEHOLDER};

/// Reaction buttons with the counts exactly as fetched
pub fn reaction_buttons(plugin: &Plugin) -> String {
    Reaction::ALL
        .iter()
        .map(|r| {
            format!(
                "<button data-act=\"{}\" data-id=\"{}\">{} {}</button>",
                r.action(),
                escape(&plugin.id),
                r.glyph(),
                plugin.reaction_count(*r)
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Category line, with the subcategory only when there is one
pub fn category_line(plugin: &Plugin) -> String {
    if plugin.subcategory.is_empty() {
        escape(&plugin.category)
    } else {
        format!(
            "{} • <span class=\"muted\">{}</span>",
            escape(&plugin.category),
            escape(&plugin.subcategory)
        )
    }
}

/// One card of the grid
pub fn card_markup(plugin: &Plugin) -> String {
    let href = escape(&detail_href(&plugin.id));
    let shot = plugin.first_screenshot().unwrap_or(CARD_PLACEHOLDER);
    format!(
        concat!(
            "<article class=\"card\" data-id=\"{id}\">",
            "<a href=\"{href}\"><img src=\"{shot}\" alt=\"\" onerror=\"this.src='{fallback}'\"></a>",
            "<h4><a href=\"{href}\">{title}</a></h4>",
            "<p class=\"muted\">{desc}</p>",
            "<div class=\"muted category-name\">{category}</div>",
            "<div class=\"meta-actions\">{reactions}<a href=\"{href}\">View →</a></div>",
            "</article>"
        ),
        id = escape(&plugin.id),
        href = href,
        shot = escape(shot),
        fallback = CARD_PLACEHOLDER,
        title = escape(&plugin.title),
        desc = escape(&plugin.desc),
        category = category_line(plugin),
        reactions = reaction_buttons(plugin),
    )
}

/// The whole grid, or the empty message
pub fn listing_markup(items: &[Plugin]) -> String {
    if items.is_empty() {
        return muted("No plugins found.");
    }
    items.iter().map(card_markup).collect()
}

impl Views {
    /// Rebuild a listing grid from the backend
    pub async fn render_listing(&self, container_id: &str, filter: &PluginFilter) -> Rendered {
        if !self.begin(container_id) {
            return Rendered::Skipped;
        }
        match self.market.plugins().list(filter).await {
            Ok(items) => {
                self.doc.set_html(container_id, listing_markup(&items));
                Rendered::Items(items.len())
            }
            Err(e) => self.fail(container_id, &format!("Failed to load: {}", e), None),
        }
    }
}
