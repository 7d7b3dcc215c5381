//! Reaction buttons

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::App;
use crate::plugins::{PluginFilter, Reaction};
use crate::ui::ToastLevel;
use crate::view::{DETAIL, HOME_GRID, LISTING};

static OBJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{24}$").expect("object id pattern is valid"));

/// Whether `id` looks like a backend record id (24 hex digits)
///
/// # Example
///
/// ```
/// use market_client::handlers::is_valid_object_id;
///
/// assert!(is_valid_object_id("64b7f0c2a1b2c3d4e5f60718"));
/// assert!(!is_valid_object_id("demo-1"));
/// ```
pub fn is_valid_object_id(id: &str) -> bool {
    OBJECT_ID.is_match(id)
}

/// A click on a reaction button: its `data-act` and `data-id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionClick {
    pub action: String,
    pub id: String,
}

impl ReactionClick {
    pub fn new(action: &str, id: &str) -> Self {
        Self {
            action: action.to_string(),
            id: id.to_string(),
        }
    }
}

/// What a reaction click ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The button does not carry a real record id
    InvalidId,
    /// `data-act` is not a reaction
    UnknownAction,
    /// Another reaction is in flight; the click was dropped
    Busy,
    /// The counter was incremented and the views refreshed
    Applied { reaction: Reaction, count: u64 },
    /// The increment failed; an error toast is showing
    Failed(String),
}

impl App {
    /// Handle a click on a reaction button. At most one reaction is in
    /// flight per page; clicks arriving meanwhile are dropped, not queued.
    /// The slot is released even if this future is dropped before it
    /// completes.
    pub async fn handle_reaction_click(&self, click: &ReactionClick) -> ReactionOutcome {
        if !is_valid_object_id(&click.id) {
            debug!("ignoring reaction on non-record id {:?}", click.id);
            return ReactionOutcome::InvalidId;
        }
        let Some(reaction) = Reaction::from_action(&click.action) else {
            return ReactionOutcome::UnknownAction;
        };
        let Some(_slot) = self.state().try_begin_reaction() else {
            debug!("reaction in flight, dropping {} on {}", click.action, click.id);
            return ReactionOutcome::Busy;
        };

        match self.market().plugins().inc(&click.id, reaction).await {
            Ok(plugin) => {
                self.refresh_counts().await;
                ReactionOutcome::Applied {
                    reaction,
                    count: plugin.reaction_count(reaction),
                }
            }
            Err(e) => {
                warn!("reaction {} on {} failed: {}", reaction.action(), click.id, e);
                self.toast(&format!("Action failed: {}", e), ToastLevel::Error);
                ReactionOutcome::Failed(e.to_string())
            }
        }
    }

    /// Re-render every mounted view that shows reaction counts
    pub async fn refresh_counts(&self) {
        let doc = self.document();
        if doc.is_mounted(HOME_GRID) {
            self.views().render_listing(HOME_GRID, &PluginFilter::new()).await;
        }
        if doc.is_mounted(LISTING) {
            self.render_filtered_listing().await;
        }
        if doc.is_mounted(DETAIL) {
            self.render_current_detail().await;
        }
    }
}
