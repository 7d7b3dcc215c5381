//! Admin panel actions
//!
//! Destructive actions go through the confirm dialog first. Every successful
//! action re-renders the table it touched.

use log::{debug, warn};

use crate::app::App;
use crate::attachment::Attachment;
use crate::categories::{find_by_name, NewCategory};
use crate::error::Error;
use crate::plugins::{parse_tags, NewPlugin, Plugin, PluginPatch, Screenshot, ScreenshotEdit};
use crate::ui::ToastLevel;
use crate::view::{
    Rendered, ADMIN_CATEGORIES, ADMIN_COMMENTS, ADMIN_CONTACTS, ADMIN_PLUGINS, ADMIN_REQUESTS,
    DETAIL,
};

use super::Submission;

/// Category select of the create form
pub const CREATE_CATEGORY: &str = "pCategory";
/// Subcategory select of the create form
pub const CREATE_SUBCATEGORY: &str = "pSubcategory";
/// Category select of the add-subcategory form
pub const SUB_PARENT: &str = "catSelectForSub";
/// Category select of the edit form
pub const EDIT_CATEGORY: &str = "editCategory";
/// Subcategory select of the edit form
pub const EDIT_SUBCATEGORY: &str = "editSubcategory";
/// Edit modal
pub const EDIT_MODAL: &str = "editPluginModal";

const SELECT_CATEGORY: &str = "Select category";
const SELECT_SUB: &str = "Select sub";

/// Fields of the create/edit listing form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginForm {
    pub title: String,
    pub desc: String,
    /// Rich-text editor HTML
    pub desc_text: String,
    /// Comma separated
    pub tags: String,
    pub category: String,
    pub subcategory: String,
    pub video: String,
    pub app_link: String,
}

impl PluginForm {
    /// The form prefilled from a listing
    pub fn from_plugin(plugin: &Plugin) -> Self {
        Self {
            title: plugin.title.clone(),
            desc: plugin.desc.clone(),
            desc_text: plugin.desc_text.clone(),
            tags: plugin.tags.join(", "),
            category: plugin.category.clone(),
            subcategory: plugin.subcategory.clone(),
            video: plugin.video.clone().unwrap_or_default(),
            app_link: plugin.app_link.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("Title is required"));
        }
        if self.category.trim().is_empty() {
            return Err(Error::validation("Category is required"));
        }
        Ok(())
    }

    /// Payload for creating a listing with the given screenshots
    pub fn to_new_plugin(&self, screenshots: Vec<Screenshot>) -> Result<NewPlugin, Error> {
        self.validate()?;
        Ok(NewPlugin {
            title: self.title.trim().to_string(),
            desc: self.desc.clone(),
            desc_text: self.desc_text.clone(),
            tags: parse_tags(&self.tags),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            screenshots,
            video: self.video.trim().to_string(),
            app_link: self.app_link.trim().to_string(),
        })
    }

    /// Patch sending every form field. `screenshots` is sent only when set.
    pub fn to_patch(&self, screenshots: Option<Vec<Screenshot>>) -> Result<PluginPatch, Error> {
        self.validate()?;
        Ok(PluginPatch {
            title: Some(self.title.trim().to_string()),
            desc: Some(self.desc.clone()),
            desc_text: Some(self.desc_text.clone()),
            tags: Some(parse_tags(&self.tags)),
            category: Some(self.category.clone()),
            subcategory: Some(self.subcategory.clone()),
            screenshots,
            video: Some(self.video.trim().to_string()),
            app_link: Some(self.app_link.trim().to_string()),
            ..PluginPatch::default()
        })
    }
}

/// An open edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// The listing being edited
    pub id: String,
    /// The form as loaded
    pub form: PluginForm,
}

fn screenshots_from(uploads: &[Attachment]) -> Vec<Screenshot> {
    uploads.iter().map(Screenshot::from_attachment).collect()
}

impl App {
    /// Fill the admin category selects from the cached categories
    pub fn fill_admin_selects(&self) {
        let categories = self.state().categories();
        let views = self.views();
        views.fill_category_select(CREATE_CATEGORY, &categories, SELECT_CATEGORY, "");
        views.fill_subcategory_select(CREATE_SUBCATEGORY, None, SELECT_SUB, "");
        views.fill_category_select(SUB_PARENT, &categories, SELECT_CATEGORY, "");
    }

    /// A form's category select changed: cascade into its subcategory select
    pub fn on_form_category_change(&self, sub_select: &str, cat: &str) {
        let categories = self.state().categories();
        self.views()
            .fill_subcategory_select(sub_select, find_by_name(&categories, cat), SELECT_SUB, "");
    }

    /// Create a listing from the admin form
    pub async fn create_plugin(&self, form: &PluginForm, uploads: &[Attachment]) -> Submission {
        let payload = match form.to_new_plugin(screenshots_from(uploads)) {
            Ok(payload) => payload,
            Err(e) => return self.reject("Create", e),
        };
        match self.market().plugins().create(&payload).await {
            Ok(plugin) => {
                debug!("created listing {}", plugin.id);
                self.toast("Plugin added", ToastLevel::Success);
                self.views().render_admin_plugins(ADMIN_PLUGINS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Create", e),
        }
    }

    /// Load a listing into an edit session and open the edit modal
    pub async fn open_edit(&self, id: &str) -> Option<EditDraft> {
        let plugin = match self.market().plugins().get(id).await {
            Ok(plugin) => plugin,
            Err(e) => {
                warn!("cannot edit {}: {}", id, e);
                self.toast(&format!("Failed to open editor: {}", e), ToastLevel::Error);
                return None;
            }
        };
        let draft = EditDraft {
            id: plugin.id.clone(),
            form: PluginForm::from_plugin(&plugin),
        };
        let categories = self.state().categories();
        self.views().fill_category_select(
            EDIT_CATEGORY,
            &categories,
            SELECT_CATEGORY,
            &draft.form.category,
        );
        self.views().fill_subcategory_select(
            EDIT_SUBCATEGORY,
            find_by_name(&categories, &draft.form.category),
            SELECT_SUB,
            &draft.form.subcategory,
        );
        self.state().set_edit(Some(draft.clone()));
        self.modal(EDIT_MODAL).open();
        Some(draft)
    }

    /// Close the edit modal and drop the session
    pub fn cancel_edit(&self) {
        self.modal(EDIT_MODAL).close();
        self.state().set_edit(None);
    }

    /// Save the open edit session. New uploads are appended to the current
    /// screenshots, or replace them with `ScreenshotEdit::Replace`; without
    /// uploads the screenshots are left alone.
    pub async fn save_edit(
        &self,
        form: &PluginForm,
        uploads: &[Attachment],
        mode: ScreenshotEdit,
    ) -> Submission {
        let Some(draft) = self.state().edit() else {
            return self.reject("Update", Error::validation("No plugin selected."));
        };
        if let Err(e) = form.validate() {
            return self.reject("Update", e);
        }
        let store = self.market().plugins();
        let screenshots = if uploads.is_empty() {
            None
        } else {
            match store.get(&draft.id).await {
                Ok(existing) => mode.resolve(&existing.screenshots, screenshots_from(uploads)),
                Err(e) => return self.reject("Update", e),
            }
        };
        let patch = match form.to_patch(screenshots) {
            Ok(patch) => patch,
            Err(e) => return self.reject("Update", e),
        };
        match store.update(&draft.id, &patch).await {
            Ok(_) => {
                self.toast("Plugin updated", ToastLevel::Success);
                self.cancel_edit();
                self.views().render_admin_plugins(ADMIN_PLUGINS).await;
                if self.document().is_mounted(DETAIL) {
                    self.render_current_detail().await;
                }
                Submission::Sent
            }
            Err(e) => self.reject("Update", e),
        }
    }

    /// Soft-delete a listing after confirmation
    pub async fn delete_plugin(&self, id: &str) -> Submission {
        if !self.confirm("Soft delete this plugin?").await {
            return Submission::Cancelled;
        }
        match self.market().plugins().soft_delete(id).await {
            Ok(()) => {
                self.toast("Plugin moved to trash", ToastLevel::Success);
                self.views().render_admin_plugins(ADMIN_PLUGINS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Delete", e),
        }
    }

    /// Bring back a soft-deleted listing
    pub async fn restore_plugin(&self, id: &str) -> Submission {
        match self.market().plugins().restore(id).await {
            Ok(_) => {
                self.toast("Plugin restored", ToastLevel::Success);
                self.views().render_admin_plugins(ADMIN_PLUGINS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Restore", e),
        }
    }

    async fn refresh_categories(&self) -> Rendered {
        let (rendered, categories) = self.views().render_admin_categories(ADMIN_CATEGORIES).await;
        if !matches!(rendered, Rendered::Failed(_)) {
            self.state().set_categories(categories);
            self.fill_admin_selects();
        }
        rendered
    }

    /// Create a category; `subs` is comma separated
    pub async fn create_category(&self, name: &str, subs: &str) -> Submission {
        let subs = parse_tags(subs);
        let subs: Vec<&str> = subs.iter().map(String::as_str).collect();
        let payload = match NewCategory::new(name, &subs) {
            Ok(payload) => payload,
            Err(e) => return self.reject("Category", e),
        };
        match self.market().categories().create(&payload).await {
            Ok(_) => {
                self.toast("Category added", ToastLevel::Success);
                self.refresh_categories().await;
                Submission::Sent
            }
            Err(e) => self.reject("Category", e),
        }
    }

    /// Delete a category after confirmation
    pub async fn delete_category(&self, id: &str) -> Submission {
        if !self.confirm("Delete this category?").await {
            return Submission::Cancelled;
        }
        match self.market().categories().remove(id).await {
            Ok(()) => {
                self.toast("Category deleted", ToastLevel::Info);
                self.refresh_categories().await;
                Submission::Sent
            }
            Err(e) => self.reject("Delete", e),
        }
    }

    /// Add a subcategory to the category named `category`
    pub async fn add_subcategory(&self, category: &str, sub: &str) -> Submission {
        let categories = self.state().categories();
        let Some(parent) = find_by_name(&categories, category) else {
            return self.reject("Subcategory", Error::validation("Pick a category"));
        };
        match self.market().categories().add_subcategory(parent, sub).await {
            Ok(_) => {
                self.toast("Subcategory added", ToastLevel::Success);
                self.refresh_categories().await;
                Submission::Sent
            }
            Err(e) => self.reject("Subcategory", e),
        }
    }

    /// Delete a feature request after confirmation
    pub async fn delete_request(&self, id: &str) -> Submission {
        if !self.confirm("Delete this request?").await {
            return Submission::Cancelled;
        }
        match self.market().requests().remove(id).await {
            Ok(()) => {
                self.toast("Request deleted", ToastLevel::Info);
                self.views().render_admin_requests(ADMIN_REQUESTS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Delete", e),
        }
    }

    /// Delete a comment after confirmation
    pub async fn delete_comment(&self, id: &str) -> Submission {
        if !self.confirm("Delete this comment?").await {
            return Submission::Cancelled;
        }
        match self.market().comments().remove(id).await {
            Ok(()) => {
                self.toast("Comment deleted", ToastLevel::Info);
                self.views().render_admin_comments(ADMIN_COMMENTS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Delete", e),
        }
    }

    /// Delete a contact message after confirmation
    pub async fn delete_contact(&self, id: &str) -> Submission {
        if !self.confirm("Delete this message?").await {
            return Submission::Cancelled;
        }
        match self.market().contact().remove(id).await {
            Ok(()) => {
                self.toast("Message deleted", ToastLevel::Info);
                self.views().render_admin_contacts(ADMIN_CONTACTS).await;
                Submission::Sent
            }
            Err(e) => self.reject("Delete", e),
        }
    }
}
