//! Listing filters, translated into backend query parameters

/// Filter for listing queries. Empty fields are not sent; the backend
/// applies its own matching semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginFilter {
    /// Free-text search
    pub q: Option<String>,

    /// Category name
    pub cat: Option<String>,

    /// Subcategory name
    pub sub: Option<String>,

    /// Tags, sent comma-joined
    pub tags: Vec<String>,

    /// Minimum rating
    pub min_rating: Option<u32>,
}

impl PluginFilter {
    /// An empty filter (all listings)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search query
    pub fn query(mut self, q: &str) -> Self {
        self.q = Some(q.to_string());
        self
    }

    /// Set the category
    pub fn category(mut self, cat: &str) -> Self {
        self.cat = Some(cat.to_string());
        self
    }

    /// Set the subcategory
    pub fn subcategory(mut self, sub: &str) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set the tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum rating
    pub fn min_rating(mut self, rating: u32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Query parameters in a stable order, empty values omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: Option<&String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                pairs.push((key, v.clone()));
            }
        };
        push("q", self.q.as_ref());
        push("category", self.cat.as_ref());
        push("subcategory", self.sub.as_ref());
        let tags = self.tags.join(",");
        push("tags", Some(&tags));
        if let Some(rating) = self.min_rating.filter(|r| *r > 0) {
            pairs.push(("minRating", rating.to_string()));
        }
        pairs
    }
}
