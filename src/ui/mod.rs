//! Self-contained UI primitives: toasts, confirm dialog, modal auto-close

pub mod confirm;
pub mod modal;
pub mod toast;

pub use confirm::{ConfirmHandle, ConfirmInput, ConfirmOptions, Confirmation};
pub use modal::{ModalController, ModalEvent};
pub use toast::{Toast, ToastLevel, ToastStack, DEFAULT_TOAST_TTL};
