//! Interaction handlers
//!
//! Each handler is an async method on [`crate::app::App`] taking the already
//! extracted event data (button attributes, form fields, uploaded files).
//! Handlers never panic on bad input; they toast and return.

mod admin;
mod detail;
mod filters;
mod forms;
mod reactions;

pub use admin::*;
pub use detail::*;
pub use filters::*;
pub use forms::*;
pub use reactions::*;
