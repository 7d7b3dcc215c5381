//! Generic modal visibility
//!
//! `aria-hidden` on the modal element is the only open/closed state a modal
//! has; every open and close goes through it.

use crate::view::Document;

/// Input a modal reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// Mouse down; `on_backdrop` is true when the target is the modal itself
    /// rather than something inside its panel
    MouseDown { on_backdrop: bool },
    /// A key press, by `KeyboardEvent.key` name
    Key(String),
    /// The close button
    CloseClicked,
}

/// Open/close control for one modal
#[derive(Debug, Clone)]
pub struct ModalController {
    doc: Document,
    modal_id: String,
}

impl ModalController {
    /// Bind a modal; it starts closed
    pub fn new(doc: &Document, modal_id: &str) -> Self {
        let controller = Self {
            doc: doc.clone(),
            modal_id: modal_id.to_string(),
        };
        if doc.attribute(modal_id, "aria-hidden").is_none() {
            controller.close();
        }
        controller
    }

    /// The bound modal's id
    pub fn id(&self) -> &str {
        &self.modal_id
    }

    /// Show the modal
    pub fn open(&self) {
        self.doc.set_attribute(&self.modal_id, "aria-hidden", "false");
    }

    /// Hide the modal
    pub fn close(&self) {
        self.doc.set_attribute(&self.modal_id, "aria-hidden", "true");
    }

    /// Whether the modal is showing
    pub fn is_open(&self) -> bool {
        self.doc.attribute(&self.modal_id, "aria-hidden").as_deref() == Some("false")
    }

    /// Apply the auto-close rules. Returns true if the event closed the modal.
    pub fn handle(&self, event: &ModalEvent) -> bool {
        let closes = match event {
            ModalEvent::MouseDown { on_backdrop } => *on_backdrop,
            ModalEvent::Key(key) => key == "Escape" && self.is_open(),
            ModalEvent::CloseClicked => true,
        };
        if closes {
            self.close();
        }
        closes
    }
}
