//! Tag cloud, category lists and category selects

use log::warn;

use super::html::{escape, muted, option};
use super::{category_href, tag_href, Rendered, Views};
use crate::categories::{find_by_name, Category};
use crate::plugins::{Plugin, PluginFilter};

/// Most tags shown in a cloud
pub const MAX_TAGS: usize = 20;

/// Distinct tags across `plugins` in first-seen order, at most `limit`
pub fn top_tags(plugins: &[Plugin], limit: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in plugins.iter().flat_map(|p| p.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags.truncate(limit);
    tags
}

/// Tag cloud buttons, each linking to the listing page for its tag
pub fn tag_cloud_markup(tags: &[String]) -> String {
    tags.iter()
        .map(|t| {
            format!(
                "<button class=\"tag\" data-href=\"{}\">{}</button>",
                escape(&tag_href(t)),
                escape(t)
            )
        })
        .collect()
}

/// Category links
pub fn category_list_markup(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| {
            format!(
                "<li><button class=\"link-btn\" data-cat=\"{}\" data-href=\"{}\">{}</button></li>",
                escape(&c.name),
                escape(&category_href(&c.name)),
                escape(&c.name)
            )
        })
        .collect()
}

/// `<option>`s for a category select, led by a placeholder
pub fn category_options(categories: &[Category], placeholder: &str, selected: &str) -> String {
    let mut html = option("", placeholder, selected.is_empty());
    for c in categories {
        html.push_str(&option(&c.name, &c.name, c.name == selected));
    }
    html
}

/// `<option>`s for a subcategory select: exactly the subs of `category`
pub fn subcategory_options(category: Option<&Category>, placeholder: &str, selected: &str) -> String {
    let mut html = option("", placeholder, selected.is_empty());
    for sub in category.map(|c| c.subs.as_slice()).unwrap_or_default() {
        html.push_str(&option(sub, sub, sub == selected));
    }
    html
}

impl Views {
    /// Rebuild a tag cloud from all listings
    pub async fn render_tag_cloud(&self, container_id: &str) -> Rendered {
        if !self.doc.set_html(container_id, String::new()) {
            return Rendered::Skipped;
        }
        match self.market.plugins().list(&PluginFilter::new()).await {
            Ok(all) => {
                let tags = top_tags(&all, MAX_TAGS);
                self.doc.set_html(container_id, tag_cloud_markup(&tags));
                Rendered::Items(tags.len())
            }
            Err(e) => {
                warn!("tag cloud unavailable: {}", e);
                self.doc.set_html(container_id, muted("Tags unavailable"));
                Rendered::Failed(e.to_string())
            }
        }
    }

    /// Rebuild a category link list
    pub async fn render_category_list(&self, container_id: &str) -> Rendered {
        if !self.doc.set_html(container_id, String::new()) {
            return Rendered::Skipped;
        }
        match self.market.categories().list().await {
            Ok(categories) => {
                self.doc
                    .set_html(container_id, category_list_markup(&categories));
                Rendered::Items(categories.len())
            }
            Err(e) => {
                warn!("categories unavailable: {}", e);
                self.doc.set_html(container_id, muted("Categories unavailable"));
                Rendered::Failed(e.to_string())
            }
        }
    }

    /// Fill a category select, keeping `selected` only if it names one of `categories`
    pub fn fill_category_select(
        &self,
        select_id: &str,
        categories: &[Category],
        placeholder: &str,
        selected: &str,
    ) {
        let selected = if find_by_name(categories, selected).is_some() {
            selected
        } else {
            ""
        };
        self.doc.set_html(
            select_id,
            category_options(categories, placeholder, selected),
        );
        self.doc.set_attribute(select_id, "value", selected);
    }

    /// Fill a subcategory select with exactly the subs of `category`. A
    /// `selected` value not among them is cleared. Returns the value left selected.
    pub fn fill_subcategory_select(
        &self,
        select_id: &str,
        category: Option<&Category>,
        placeholder: &str,
        selected: &str,
    ) -> String {
        let selected = match category {
            Some(c) if c.has_sub(selected) => selected,
            _ => "",
        };
        self.doc.set_html(
            select_id,
            subcategory_options(category, placeholder, selected),
        );
        self.doc.set_attribute(select_id, "value", selected);
        selected.to_string()
    }
}
