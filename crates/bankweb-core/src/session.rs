//! Client-side credential storage and the session context derived from it
//!
//! The login flow of the surrounding application writes bearer tokens into
//! the client's persistent key-value storage and clears them on logout. The
//! views only ever read them.

use bankweb_config::SessionConfig;
use std::collections::HashMap;

/// Read access to the client's persistent key-value storage
pub trait TokenStore: Send + Sync {
    /// Value stored under `key`, if any. Empty values count as absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory token store
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: HashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Opaque bearer credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Storage keys the views read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub admin_token: String,
    pub user_token: String,
    pub account_number: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionKeys {
    fn from(config: &SessionConfig) -> Self {
        Self {
            admin_token: config.admin_token_key.clone(),
            user_token: config.user_token_key.clone(),
            account_number: config.account_number_key.clone(),
        }
    }
}

impl SessionKeys {
    pub fn admin_token(&self, store: &dyn TokenStore) -> Option<BearerToken> {
        store.get(&self.admin_token).map(BearerToken::new)
    }

    pub fn user_token(&self, store: &dyn TokenStore) -> Option<BearerToken> {
        store.get(&self.user_token).map(BearerToken::new)
    }
}

/// Signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession;

/// Signed-in customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub account_number: String,
}

/// Who is signed in, as seen by the views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub current_admin: Option<AdminSession>,
    pub current_user: Option<CurrentUser>,
}

impl SessionContext {
    /// Derive the session from stored credentials
    pub fn from_store(store: &dyn TokenStore, keys: &SessionKeys) -> Self {
        Self {
            current_admin: store.get(&keys.admin_token).map(|_| AdminSession),
            current_user: store
                .get(&keys.account_number)
                .map(|account_number| CurrentUser { account_number }),
        }
    }

    pub fn admin() -> Self {
        Self {
            current_admin: Some(AdminSession),
            current_user: None,
        }
    }

    pub fn user(account_number: &str) -> Self {
        Self {
            current_admin: None,
            current_user: Some(CurrentUser {
                account_number: account_number.to_string(),
            }),
        }
    }
}
