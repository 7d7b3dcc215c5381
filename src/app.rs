//! Page controller
//!
//! [`App`] ties one page together: the backend client, the document, the
//! renderers, the toast stack and the session gate. Interaction handlers are
//! methods on it (see [`crate::handlers`]); the mutable bits they share live
//! in [`AppState`].

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth::{AuthGate, GateConfig, GateOutcome, GateState, PageEvent, SessionCache};
use crate::categories::Category;
use crate::handlers::{EditDraft, FilterState};
use crate::plugins::{Plugin, PluginFilter};
use crate::ui::confirm::{self, ConfirmHandle, ConfirmInput, ConfirmOptions};
use crate::ui::{ToastLevel, ToastStack};
use crate::view::{
    Document, Rendered, Views, ADMIN_CATEGORIES, ADMIN_COMMENTS, ADMIN_CONTACTS, ADMIN_PLUGINS,
    ADMIN_REQUESTS, CATEGORY_LIST, DETAIL, HOME_GRID, LISTING, TAG_LIST,
};
use crate::Marketplace;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// State shared by the handlers of one page
#[derive(Default)]
pub struct AppState {
    filter: Mutex<FilterState>,
    reaction_busy: AtomicBool,
    categories: Mutex<Vec<Category>>,
    edit: Mutex<Option<EditDraft>>,
    shown: Mutex<Option<Plugin>>,
    pending_confirm: Mutex<Option<ConfirmHandle>>,
}

impl AppState {
    /// Current listing filter
    pub fn filter(&self) -> FilterState {
        locked(&self.filter).clone()
    }

    /// Replace the listing filter
    pub fn set_filter(&self, filter: FilterState) {
        debug!("filter -> {:?}", filter);
        *locked(&self.filter) = filter;
    }

    /// Take the reaction slot. None if a reaction is already in flight.
    /// The slot is released when the returned guard is dropped.
    pub fn try_begin_reaction(&self) -> Option<ReactionSlot<'_>> {
        self.reaction_busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ReactionSlot {
                busy: &self.reaction_busy,
            })
    }

    /// Whether a reaction is in flight
    pub fn reaction_in_flight(&self) -> bool {
        self.reaction_busy.load(Ordering::Acquire)
    }

    /// Categories last loaded for the selects
    pub fn categories(&self) -> Vec<Category> {
        locked(&self.categories).clone()
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        *locked(&self.categories) = categories;
    }

    /// The open edit session, if any
    pub fn edit(&self) -> Option<EditDraft> {
        locked(&self.edit).clone()
    }

    pub fn set_edit(&self, draft: Option<EditDraft>) {
        *locked(&self.edit) = draft;
    }

    /// The listing the detail page last showed
    pub fn shown(&self) -> Option<Plugin> {
        locked(&self.shown).clone()
    }

    fn set_shown(&self, plugin: Option<Plugin>) {
        *locked(&self.shown) = plugin;
    }

    fn set_pending_confirm(&self, handle: Option<ConfirmHandle>) {
        *locked(&self.pending_confirm) = handle;
    }

    fn answer_confirm(&self, input: ConfirmInput) -> bool {
        let pending = locked(&self.pending_confirm).take();
        match pending {
            Some(handle) => {
                handle.input(input);
                true
            }
            None => false,
        }
    }
}

/// The page's single reaction slot, held while an increment is in flight
pub struct ReactionSlot<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ReactionSlot<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// One page of the marketplace
#[derive(Clone)]
pub struct App {
    market: Marketplace,
    doc: Document,
    views: Views,
    toasts: ToastStack,
    gate: AuthGate,
    state: Arc<AppState>,
}

impl App {
    /// Create a page controller with an in-memory session cache
    pub fn new(market: Marketplace, doc: Document, gate: GateConfig) -> Self {
        Self::with_session(market, doc, gate, SessionCache::default())
    }

    /// Create a page controller over the given session cache
    pub fn with_session(
        market: Marketplace,
        doc: Document,
        gate: GateConfig,
        session: SessionCache,
    ) -> Self {
        let toasts = ToastStack::new();
        let views = Views::new(doc.clone(), market.clone(), toasts.clone());
        let gate = AuthGate::new(market.auth(), session, doc.clone(), gate);
        Self {
            market,
            doc,
            views,
            toasts,
            gate,
            state: Arc::new(AppState::default()),
        }
    }

    /// Gate settings for a public page
    pub fn public_page() -> GateConfig {
        GateConfig {
            admin_only: false,
            admin_elements: Vec::new(),
            login_page: "login.html".to_string(),
        }
    }

    /// Gate settings for an admin-only page
    pub fn admin_page(admin_elements: &[&str], login_page: &str) -> GateConfig {
        GateConfig {
            admin_only: true,
            admin_elements: admin_elements.iter().map(|s| s.to_string()).collect(),
            login_page: login_page.to_string(),
        }
    }

    pub fn market(&self) -> &Marketplace {
        &self.market
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether the gate last saw a signed-in user
    pub fn signed_in(&self) -> bool {
        self.gate.state().is_signed_in()
    }

    /// Show a toast with the default lifetime
    pub(crate) fn toast(&self, message: &str, level: ToastLevel) {
        self.toasts.show(message, level);
    }

    /// Forward a page lifecycle event to the gate. On load and show, a page
    /// the gate lets through is rendered.
    pub async fn page_event(&self, event: PageEvent) -> GateOutcome {
        let outcome = self.gate.on_event(event).await;
        if matches!(outcome, GateOutcome::Proceed | GateOutcome::Authorized) {
            self.render_page().await;
        }
        outcome
    }

    /// Render every mounted container of the page
    pub async fn render_page(&self) {
        if self.doc.is_mounted(HOME_GRID) {
            self.views.render_listing(HOME_GRID, &PluginFilter::new()).await;
        }
        if self.doc.is_mounted(CATEGORY_LIST) {
            self.views.render_category_list(CATEGORY_LIST).await;
        }
        if self.doc.is_mounted(TAG_LIST) {
            self.views.render_tag_cloud(TAG_LIST).await;
        }
        if self.doc.is_mounted(LISTING) {
            self.state.set_filter(FilterState::from_document(&self.doc));
            self.load_filter_categories().await;
            self.render_filtered_listing().await;
        }
        if self.doc.is_mounted(DETAIL) {
            self.render_current_detail().await;
        }
        if matches!(self.gate.state(), GateState::AuthenticatedAdmin(_)) {
            self.render_admin().await;
        }
    }

    /// Rebuild the listing page from the current filter
    pub async fn render_filtered_listing(&self) -> Rendered {
        let filter = self.state.filter().to_plugin_filter();
        self.views.render_listing(LISTING, &filter).await
    }

    /// Rebuild the detail page for the `?id` of the location
    pub async fn render_current_detail(&self) -> Rendered {
        let id = self.doc.query_param("id");
        let (rendered, plugin) = self
            .views
            .load_detail(DETAIL, id.as_deref(), self.signed_in())
            .await;
        if rendered != Rendered::Skipped {
            self.state.set_shown(plugin);
        }
        rendered
    }

    /// Rebuild the admin panel tables
    pub async fn render_admin(&self) {
        self.views.render_admin_plugins(ADMIN_PLUGINS).await;
        let (_, categories) = self.views.render_admin_categories(ADMIN_CATEGORIES).await;
        if !categories.is_empty() {
            self.state.set_categories(categories);
            self.fill_admin_selects();
        }
        self.views.render_admin_requests(ADMIN_REQUESTS).await;
        self.views.render_admin_comments(ADMIN_COMMENTS).await;
        self.views.render_admin_contacts(ADMIN_CONTACTS).await;
    }

    /// Ask for confirmation through the confirm dialog. The dialog is
    /// answered through [`App::confirm_input`].
    pub async fn confirm(&self, message: &str) -> bool {
        let (handle, confirmation) = confirm::open(&self.doc, message, &ConfirmOptions::default());
        self.state.set_pending_confirm(Some(handle));
        confirmation.confirmed().await
    }

    /// Deliver input to the open confirm dialog. False if none is open.
    pub fn confirm_input(&self, input: ConfirmInput) -> bool {
        self.state.answer_confirm(input)
    }
}
