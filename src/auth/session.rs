//! Client-held session marker
//!
//! The marker mirrors the backend's cookie session for display only. Access
//! decisions always go back to the backend.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::types::User;

/// Session-scoped storage key holding the marker
pub const SESSION_KEY: &str = "fm_user";

/// Display cache of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for SessionMarker {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Tab-scoped key/value storage (`sessionStorage` in a browser)
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, dropped with the page
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
    }
}

/// Reads and writes the marker in session storage
#[derive(Clone)]
pub struct SessionCache {
    storage: Arc<dyn SessionStorage>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }
}

impl SessionCache {
    /// Create a cache over the given storage
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// The stored marker. A corrupt entry reads as no marker.
    pub fn load(&self) -> Option<SessionMarker> {
        let raw = self.storage.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(marker) => Some(marker),
            Err(e) => {
                warn!("discarding unreadable session marker: {}", e);
                None
            }
        }
    }

    /// Store the marker
    pub fn save(&self, marker: &SessionMarker) {
        match serde_json::to_string(marker) {
            Ok(raw) => self.storage.set(SESSION_KEY, &raw),
            Err(e) => warn!("could not store session marker: {}", e),
        }
    }

    /// Drop the marker
    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}
