//! Account and transaction views over the banking backend
//!
//! - `profile`: admin profile editor state machine
//! - `transactions`: transaction list viewer
//! - `backend`: the backend port and its HTTP adapter
//! - `session`: client-side token storage and session context

pub mod backend;
pub mod error;
pub mod models;
pub mod profile;
pub mod session;
pub mod transactions;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use backend::{BankBackend, HttpBankBackend};
pub use error::{BackendError, CoreError, CoreResult, ErrorCode};
pub use models::{AccountProfile, ProfileUpdate, Transaction};
pub use profile::{EditMode, LoadState, MountOutcome, Navigation, ProfileEditor, ProfileField, ProfileFields, ProfileSettings};
pub use session::{BearerToken, MemoryTokenStore, SessionContext, SessionKeys, TokenStore};
pub use transactions::{Direction, ListSettings, ListState, Parties, TransactionEntry, TransactionList};
