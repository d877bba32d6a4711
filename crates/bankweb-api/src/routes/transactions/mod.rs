//! Transaction routes - History of the signed-in user
//!
//! Endpoints:
//! - GET /transactions       page shell, loads the list
//! - GET /transactions/list  fetch and render the list
//!
//! Structure:
//! - api.rs: HTMX list endpoint
//! - page.rs: Page shell and list rendering

pub mod api;
pub mod page;

pub use api::htmx_transactions_list;
pub use page::{page_transactions, render_transaction_list};
