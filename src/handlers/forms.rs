//! Visitor forms: comments, requests, contact and sign-in

use log::{info, warn};

use crate::app::App;
use crate::attachment::Attachment;
use crate::auth::User;
use crate::contact::NewContact;
use crate::error::{Error, Result};
use crate::requests::NewRequest;
use crate::ui::{ModalController, ToastLevel};

/// Sign-in modal
pub const SIGNIN_MODAL: &str = "signinModal";
/// Feature request modal
pub const REQUEST_MODAL: &str = "requestModal";

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Accepted by the backend
    Sent,
    /// Rejected before any request was made
    Invalid(String),
    /// The backend wants a signed-in user; the sign-in modal was opened
    SignInRequired,
    /// The confirm dialog was declined; nothing was sent
    Cancelled,
    /// The backend refused or could not be reached
    Failed(String),
}

/// Fields of the feature request form
#[derive(Debug, Clone, Default)]
pub struct RequestForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl App {
    pub(crate) fn modal(&self, id: &str) -> ModalController {
        ModalController::new(self.document(), id)
    }

    /// Turn a failed submission into a toast
    pub(crate) fn reject(&self, action: &str, error: Error) -> Submission {
        match error {
            Error::Validation(message) => {
                self.toast(&message, ToastLevel::Warning);
                Submission::Invalid(message)
            }
            e => {
                warn!("{} failed: {}", action, e);
                self.toast(&format!("{} failed: {}", action, e), ToastLevel::Error);
                Submission::Failed(e.to_string())
            }
        }
    }

    /// Open the sign-in modal
    pub fn open_sign_in(&self) {
        self.modal(SIGNIN_MODAL).open();
    }

    /// Post a comment on the listing of the current detail page
    pub async fn submit_comment(&self, text: &str) -> Submission {
        let Some(plugin_id) = self.document().query_param("id") else {
            return self.reject("Comment", Error::validation("No plugin selected."));
        };
        match self
            .market()
            .comments()
            .create_for_plugin(&plugin_id, text)
            .await
        {
            Ok(_) => {
                self.toast("Comment posted", ToastLevel::Success);
                self.render_current_detail().await;
                Submission::Sent
            }
            Err(e) if e.is_unauthorized() => {
                info!("comment needs a session, asking to sign in");
                self.open_sign_in();
                Submission::SignInRequired
            }
            Err(e) => self.reject("Comment", e),
        }
    }

    /// Submit the feature request form
    pub async fn submit_request(&self, form: &RequestForm) -> Submission {
        let payload = match NewRequest::new(
            &form.name,
            &form.email,
            &form.phone,
            &form.text,
            form.attachment.as_ref(),
        ) {
            Ok(payload) => payload,
            Err(e) => return self.reject("Request", e),
        };
        match self.market().requests().create(&payload).await {
            Ok(_) => {
                self.toast("Request submitted", ToastLevel::Success);
                self.modal(REQUEST_MODAL).close();
                Submission::Sent
            }
            Err(e) => self.reject("Request", e),
        }
    }

    /// Submit the contact form
    pub async fn submit_contact(&self, email: &str, message: &str) -> Submission {
        let payload = match NewContact::new(email, message) {
            Ok(payload) => payload,
            Err(e) => return self.reject("Message", e),
        };
        match self.market().contact().create(&payload).await {
            Ok(_) => {
                self.toast("Thank you! We will reach out.", ToastLevel::Success);
                Submission::Sent
            }
            Err(e) => self.reject("Message", e),
        }
    }

    async fn finish_sign_in(&self, result: Result<User>) -> Submission {
        match result {
            Ok(user) => {
                let name = user.name.clone();
                self.gate().accept(user);
                self.modal(SIGNIN_MODAL).close();
                self.toast(&format!("Signed in as {}", name), ToastLevel::Success);
                self.render_current_detail().await;
                Submission::Sent
            }
            Err(e) => self.reject("Sign-in", e),
        }
    }

    /// Sign in with email and password from the sign-in modal
    pub async fn sign_in(&self, email: &str, password: &str) -> Submission {
        let result = self.market().auth().login(email, password).await;
        self.finish_sign_in(result).await
    }

    /// Create an account and sign in
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Submission {
        let result = self.market().auth().register(name, email, password).await;
        self.finish_sign_in(result).await
    }

    /// Sign in with a Google identity token
    pub async fn sign_in_with_google(&self, id_token: &str) -> Submission {
        let result = self.market().auth().google(id_token).await;
        self.finish_sign_in(result).await
    }

    /// Sign out and re-render the page for an anonymous visitor
    pub async fn sign_out(&self) {
        if let Err(e) = self.market().auth().logout().await {
            warn!("logout failed: {}", e);
        }
        self.gate().forget();
        self.toast("Signed out", ToastLevel::Info);
        self.render_current_detail().await;
    }
}
