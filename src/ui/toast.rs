//! Toast notifications

use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::view::html::escape;

/// How long a toast stays up unless told otherwise
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

/// Toast severity, also its CSS modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

/// A visible toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug, Default)]
struct Stack {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// The single toast stack of a page. Toasts are kept in arrival order and
/// each expires on its own timer.
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    inner: Arc<Mutex<Stack>>,
}

impl ToastStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self) -> MutexGuard<'_, Stack> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Show a toast for [`DEFAULT_TOAST_TTL`]
    pub fn show(&self, message: &str, level: ToastLevel) -> u64 {
        self.show_for(message, level, DEFAULT_TOAST_TTL)
    }

    /// Show a toast for `ttl`; a zero `ttl` keeps it until dismissed
    pub fn show_for(&self, message: &str, level: ToastLevel, ttl: Duration) -> u64 {
        let id = {
            let mut stack = self.stack();
            stack.next_id += 1;
            let id = stack.next_id;
            stack.toasts.push(Toast {
                id,
                message: message.to_string(),
                level,
            });
            id
        };
        debug!("toast {} [{}] {}", id, level.as_str(), message);

        if !ttl.is_zero() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let stack = self.clone();
                    handle.spawn(async move {
                        tokio::time::sleep(ttl).await;
                        stack.dismiss(id);
                    });
                }
                Err(_) => warn!("no runtime available, toast {} will not expire", id),
            }
        }
        id
    }

    /// Remove a toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.stack().toasts.retain(|t| t.id != id);
    }

    /// Visible toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.stack().toasts.clone()
    }

    /// The most recent toast
    pub fn last(&self) -> Option<Toast> {
        self.stack().toasts.last().cloned()
    }

    /// Markup for the fixed-position stack
    pub fn markup(&self) -> String {
        let items: String = self
            .toasts()
            .iter()
            .map(|t| {
                format!(
                    "<div class=\"toast toast-{} show\" data-toast=\"{}\"><div class=\"toast-row\"><div class=\"toast-msg\">{}</div><button class=\"toast-close\" aria-label=\"Close\">&times;</button></div></div>",
                    t.level.as_str(),
                    t.id,
                    escape(&t.message)
                )
            })
            .collect();
        format!("<div class=\"toast-stack\">{}</div>", items)
    }
}
