//! Confirm dialog that resolves to a bool instead of blocking

use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::view::html::escape;
use crate::view::Document;

/// Container id of the confirm dialog
pub const CONFIRM_MODAL: &str = "confirmModal";

/// Id of the affirmative button, focused on open
pub const CONFIRM_OK: &str = "confirmOk";

/// Labels for the dialog
#[derive(Debug, Clone)]
pub struct ConfirmOptions {
    pub ok_text: String,
    pub cancel_text: String,
    /// Styles the affirmative button as destructive
    pub danger: bool,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            ok_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
            danger: true,
        }
    }
}

/// User input delivered to an open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmInput {
    /// The affirmative button
    Affirm,
    /// The cancel button
    Cancel,
    /// The close (×) button
    Close,
    /// Mouse down on the backdrop, outside the panel
    Backdrop,
    /// The Escape key
    Escape,
}

/// Handle used to feed input to an open dialog
pub struct ConfirmHandle {
    doc: Document,
    tx: Mutex<Option<oneshot::Sender<bool>>>,
}

/// Resolves once the dialog is answered
pub struct Confirmation {
    rx: oneshot::Receiver<bool>,
}

impl Confirmation {
    /// Wait for the answer. A dialog dropped without an answer counts as `false`.
    pub async fn confirmed(self) -> bool {
        self.rx.await.unwrap_or(false)
    }
}

/// Open a confirm dialog on `doc`
pub fn open(doc: &Document, message: &str, options: &ConfirmOptions) -> (ConfirmHandle, Confirmation) {
    doc.mount(CONFIRM_MODAL);
    doc.set_html(CONFIRM_MODAL, markup(message, options));
    doc.set_attribute(CONFIRM_MODAL, "aria-hidden", "false");
    doc.focus(CONFIRM_OK);

    let (tx, rx) = oneshot::channel();
    (
        ConfirmHandle {
            doc: doc.clone(),
            tx: Mutex::new(Some(tx)),
        },
        Confirmation { rx },
    )
}

fn markup(message: &str, options: &ConfirmOptions) -> String {
    format!(
        "<div class=\"modal-panel\"><button class=\"close\" aria-label=\"Close\">&times;</button><h3>Are you sure?</h3><p class=\"muted\">{}</p><div class=\"modal-actions\"><button class=\"btn ghost\" data-act=\"cancel\">{}</button><button id=\"{}\" class=\"btn{}\" data-act=\"ok\">{}</button></div></div>",
        escape(message),
        escape(&options.cancel_text),
        CONFIRM_OK,
        if options.danger { " danger" } else { "" },
        escape(&options.ok_text)
    )
}

impl ConfirmHandle {
    /// Deliver input. Only the first input answers; later ones are ignored.
    pub fn input(&self, input: ConfirmInput) {
        let tx = self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(tx) = tx {
            self.doc.set_attribute(CONFIRM_MODAL, "aria-hidden", "true");
            self.doc.unmount(CONFIRM_MODAL);
            let _ = tx.send(input == ConfirmInput::Affirm);
        }
    }

    /// Whether the dialog is still waiting for an answer
    pub fn is_open(&self) -> bool {
        self.tx.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
