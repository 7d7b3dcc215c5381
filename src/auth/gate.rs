//! Page access gate
//!
//! On every load and page-show the gate asks the backend who is signed in and
//! adjusts the page. The session marker is refreshed from that answer but is
//! never consulted for the decision itself.

use log::{debug, warn};
use std::sync::{Arc, Mutex};

use super::session::{SessionCache, SessionMarker};
use super::types::User;
use super::AuthClient;
use crate::view::Document;

/// Element carrying the authorization flag
pub const PAGE_ROOT: &str = "body";

/// Attribute set to `"true"` on [`PAGE_ROOT`] once an admin is confirmed
pub const AUTHORIZED_ATTR: &str = "data-authorized";

/// Where the gate stands for the current page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    /// Nothing checked yet
    #[default]
    Unknown,
    /// The whoami request is in flight
    Checking,
    /// Signed in with the admin role
    AuthenticatedAdmin(User),
    /// Signed in without the admin role
    AuthenticatedUser(User),
    /// Not signed in, or the check failed
    Anonymous,
}

impl GateState {
    /// The signed-in user, admin or not
    pub fn user(&self) -> Option<&User> {
        match self {
            GateState::AuthenticatedAdmin(user) | GateState::AuthenticatedUser(user) => Some(user),
            _ => None,
        }
    }

    /// Whether anyone is signed in
    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    /// Whether an admin is signed in
    pub fn is_admin(&self) -> bool {
        matches!(self, GateState::AuthenticatedAdmin(_))
    }
}

/// Page lifecycle events the gate reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Initial load
    Load,
    /// Page shown again, including restores from the back/forward cache
    Show,
    /// `beforeunload`
    BeforeUnload,
    /// `pagehide`
    PageHide,
    /// Visibility changed to hidden
    VisibilityHidden,
}

/// What the gate did in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The page may render as it is
    Proceed,
    /// Admin confirmed; admin elements revealed
    Authorized,
    /// Sent away; the current history entry was replaced
    Redirected(String),
    /// Marker dropped and a logout fired on the way out
    LoggedOut,
}

/// Per-page gate settings
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// Whether the page is reserved for admins
    pub admin_only: bool,

    /// Elements shown only to admins (hidden until confirmed)
    pub admin_elements: Vec<String>,

    /// Redirect target for non-admins on an admin-only page
    pub login_page: String,
}

/// Verifies the session against the backend on load/show
#[derive(Clone)]
pub struct AuthGate {
    auth: AuthClient,
    cache: SessionCache,
    doc: Document,
    config: GateConfig,
    state: Arc<Mutex<GateState>>,
}

impl AuthGate {
    /// Create a gate for the current page
    pub fn new(auth: AuthClient, cache: SessionCache, doc: Document, config: GateConfig) -> Self {
        Self {
            auth,
            cache,
            doc,
            config,
            state: Arc::new(Mutex::new(GateState::Unknown)),
        }
    }

    /// Current state
    pub fn state(&self) -> GateState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The display marker, advisory only
    pub fn marker(&self) -> Option<SessionMarker> {
        self.cache.load()
    }

    fn set_state(&self, next: GateState) {
        debug!("gate -> {:?}", next);
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    fn hide_admin_ui(&self) {
        self.doc.remove_attribute(PAGE_ROOT, AUTHORIZED_ATTR);
        for id in &self.config.admin_elements {
            self.doc.set_attribute(id, "hidden", "");
        }
    }

    fn reveal_admin_ui(&self) {
        for id in &self.config.admin_elements {
            self.doc.remove_attribute(id, "hidden");
        }
        self.doc.set_attribute(PAGE_ROOT, AUTHORIZED_ATTR, "true");
    }

    /// Handle a page lifecycle event
    pub async fn on_event(&self, event: PageEvent) -> GateOutcome {
        match event {
            PageEvent::Load | PageEvent::Show => self.check().await,
            PageEvent::BeforeUnload | PageEvent::PageHide | PageEvent::VisibilityHidden => {
                self.courtesy_logout();
                GateOutcome::LoggedOut
            }
        }
    }

    /// Ask the backend who is signed in and apply the answer
    pub async fn check(&self) -> GateOutcome {
        // Admin UI stays hidden for the whole check so a non-admin never sees it
        self.hide_admin_ui();
        self.set_state(GateState::Checking);

        let user = match self.auth.me().await {
            Ok(user) => user,
            Err(e) => {
                debug!("whoami failed, treating as anonymous: {}", e);
                None
            }
        };

        match user {
            Some(user) if user.is_admin() => {
                self.cache.save(&SessionMarker::from(&user));
                self.set_state(GateState::AuthenticatedAdmin(user));
                self.reveal_admin_ui();
                GateOutcome::Authorized
            }
            Some(user) => {
                self.cache.save(&SessionMarker::from(&user));
                self.set_state(GateState::AuthenticatedUser(user));
                self.deny_if_admin_only()
            }
            None => {
                self.cache.clear();
                self.set_state(GateState::Anonymous);
                self.deny_if_admin_only()
            }
        }
    }

    /// Record a sign-in completed on this page without another round trip
    pub fn accept(&self, user: User) {
        self.cache.save(&SessionMarker::from(&user));
        if user.is_admin() {
            self.set_state(GateState::AuthenticatedAdmin(user));
            self.reveal_admin_ui();
        } else {
            self.set_state(GateState::AuthenticatedUser(user));
        }
    }

    /// Record an explicit sign-out
    pub fn forget(&self) {
        self.cache.clear();
        self.hide_admin_ui();
        self.set_state(GateState::Anonymous);
    }

    fn deny_if_admin_only(&self) -> GateOutcome {
        if self.config.admin_only {
            self.doc.replace_location(&self.config.login_page);
            GateOutcome::Redirected(self.config.login_page.clone())
        } else {
            GateOutcome::Proceed
        }
    }

    /// Clear the marker and fire a logout without waiting for it.
    ///
    /// Browsers may skip unload handlers entirely, so this is a courtesy; the
    /// backend's session expiry is what actually ends a session.
    pub fn courtesy_logout(&self) {
        self.cache.clear();
        let auth = self.auth.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = auth.logout().await {
                        warn!("logout on page exit failed: {}", e);
                    }
                });
            }
            Err(_) => warn!("no runtime available, skipping logout on page exit"),
        }
    }
}
