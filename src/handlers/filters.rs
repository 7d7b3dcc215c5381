//! Listing filters, search and the category/subcategory cascade

use log::{debug, warn};

use crate::app::App;
use crate::categories::find_by_name;
use crate::plugins::PluginFilter;
use crate::ui::{ModalController, ToastLevel};
use crate::view::{search_href, Document, Rendered, CATEGORY_FILTER, SUBCATEGORY_FILTER};

/// Placeholder of the listing category select
pub const ALL_CATEGORIES: &str = "All Categories";
/// Placeholder of the listing subcategory select
pub const ALL_SUBCATEGORIES: &str = "All Subcategories";
/// Mobile filter popup on the listing page
pub const FILTER_POPUP: &str = "filterSidebarModalListing";

/// What the listing page is filtered by. Handlers replace it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub q: String,
    pub cat: String,
    pub sub: String,
    pub tags: Vec<String>,
}

impl FilterState {
    /// Initial filter from the `?q`, `?tag` and `?cat` of the location
    pub fn from_document(doc: &Document) -> Self {
        Self {
            q: doc.query_param("q").unwrap_or_default(),
            cat: doc.query_param("cat").unwrap_or_default(),
            sub: String::new(),
            tags: doc
                .query_param("tag")
                .filter(|t| !t.is_empty())
                .into_iter()
                .collect(),
        }
    }

    /// Same filter with a new search text
    pub fn with_query(&self, q: &str) -> Self {
        Self {
            q: q.trim().to_string(),
            ..self.clone()
        }
    }

    /// Same filter with a new category. The subcategory is dropped since it
    /// belonged to the old category.
    pub fn with_category(&self, cat: &str) -> Self {
        Self {
            cat: cat.to_string(),
            sub: String::new(),
            ..self.clone()
        }
    }

    /// Same filter with a new subcategory
    pub fn with_subcategory(&self, sub: &str) -> Self {
        Self {
            sub: sub.to_string(),
            ..self.clone()
        }
    }

    /// The backend query for this filter
    pub fn to_plugin_filter(&self) -> PluginFilter {
        PluginFilter::new()
            .query(&self.q)
            .category(&self.cat)
            .subcategory(&self.sub)
            .tags(self.tags.iter().cloned())
    }
}

impl App {
    /// Load categories and fill the listing selects from the current filter
    pub async fn load_filter_categories(&self) {
        match self.market().categories().list().await {
            Ok(categories) => self.state().set_categories(categories),
            Err(e) => warn!("categories for filters unavailable: {}", e),
        }
        let filter = self.state().filter();
        self.fill_filter_selects(CATEGORY_FILTER, SUBCATEGORY_FILTER, &filter);
    }

    /// Fill a category/subcategory select pair from `filter`. Returns the
    /// subcategory left selected.
    fn fill_filter_selects(&self, cat_select: &str, sub_select: &str, filter: &FilterState) -> String {
        let categories = self.state().categories();
        self.views()
            .fill_category_select(cat_select, &categories, ALL_CATEGORIES, &filter.cat);
        self.views().fill_subcategory_select(
            sub_select,
            find_by_name(&categories, &filter.cat),
            ALL_SUBCATEGORIES,
            &filter.sub,
        )
    }

    /// The listing category select changed: repopulate the subcategory
    /// select with exactly that category's subs and re-render
    pub async fn on_category_change(&self, cat: &str) -> Rendered {
        let next = self.state().filter().with_category(cat);
        self.fill_filter_selects(CATEGORY_FILTER, SUBCATEGORY_FILTER, &next);
        self.state().set_filter(next);
        self.render_filtered_listing().await
    }

    /// The listing subcategory select changed
    pub async fn on_subcategory_change(&self, sub: &str) -> Rendered {
        let next = self.state().filter().with_subcategory(sub);
        self.state().set_filter(next);
        self.render_filtered_listing().await
    }

    /// The listing search input changed (after debouncing)
    pub async fn on_listing_search(&self, q: &str) -> Rendered {
        let next = self.state().filter().with_query(q);
        self.state().set_filter(next);
        self.render_filtered_listing().await
    }

    /// The home search form was submitted: go to the listing page
    pub fn on_search_submit(&self, q: &str) {
        let href = search_href(q.trim());
        debug!("search -> {}", href);
        self.document().navigate(&href);
    }

    /// Open the mobile filter popup, seeded from the current filter
    pub fn open_filter_popup(&self, cat_select: &str, sub_select: &str) {
        let filter = self.state().filter();
        self.fill_filter_selects(cat_select, sub_select, &filter);
        ModalController::new(self.document(), FILTER_POPUP).open();
    }

    /// The popup's category select changed: cascade into its subcategory select
    pub fn on_popup_category_change(&self, sub_select: &str, cat: &str) {
        let categories = self.state().categories();
        self.views().fill_subcategory_select(
            sub_select,
            find_by_name(&categories, cat),
            ALL_SUBCATEGORIES,
            "",
        );
    }

    /// The popup was submitted: adopt its values, sync the page selects,
    /// close it and re-render
    pub async fn apply_filter_popup(&self, q: &str, cat: &str, sub: &str) -> Rendered {
        let next = self
            .state()
            .filter()
            .with_query(q)
            .with_category(cat)
            .with_subcategory(sub);
        let kept = self.fill_filter_selects(CATEGORY_FILTER, SUBCATEGORY_FILTER, &next);
        if kept != next.sub {
            self.toast("Subcategory does not belong to that category", ToastLevel::Warning);
        }
        let next = next.with_subcategory(&kept);
        self.state().set_filter(next);
        ModalController::new(self.document(), FILTER_POPUP).close();
        self.render_filtered_listing().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_filter_from_location() {
        let doc = Document::at("https://market.example.com/listing.html?q=dark%20mode&cat=Chrome&tag=tabs");
        let filter = FilterState::from_document(&doc);
        assert_eq!(filter.q, "dark mode");
        assert_eq!(filter.cat, "Chrome");
        assert_eq!(filter.tags, vec!["tabs"]);

        let bare = FilterState::from_document(&Document::at("https://market.example.com/listing.html"));
        assert_eq!(bare, FilterState::default());
    }

    #[test]
    fn test_with_category_drops_sub() {
        let filter = FilterState::default()
            .with_category("Wordpress")
            .with_subcategory("Themes")
            .with_query("  seo ");
        assert_eq!(filter.sub, "Themes");
        assert_eq!(filter.q, "seo");
        let moved = filter.with_category("Chrome");
        assert_eq!(moved.sub, "");
        assert_eq!(moved.q, "seo");
    }

    #[test]
    fn test_to_plugin_filter_skips_empty() {
        let filter = FilterState::default().with_category("Chrome");
        let pairs = filter.to_plugin_filter().to_query_pairs();
        assert_eq!(pairs, vec![("category", "Chrome".to_string())]);
    }
}
