//! Profile routes - Admin profile editor
//!
//! Endpoints:
//! - GET    /admin/profile/:account_number       page shell, loads the form
//! - GET    /admin/profile/:account_number/form  fetch and render the form
//! - POST   /admin/profile/:account_number/edit  toggle edit mode
//! - PUT    /admin/profile/:account_number       save
//! - DELETE /admin/profile/:account_number       delete, then back to the dashboard
//!
//! The form carries its own view state. Every interaction posts the current
//! field values and edit mode back and the editor is rebuilt from them.
//!
//! Structure:
//! - api.rs: HTMX interaction endpoints
//! - page.rs: Page shell and form rendering

pub mod api;
pub mod page;

pub use api::{htmx_profile_delete, htmx_profile_form, htmx_profile_save, htmx_profile_toggle_edit, ProfileForm};
pub use page::{page_profile, render_profile_editor};
