//! In-memory `BankBackend` that records every call, for tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::BankBackend;
use crate::error::BackendError;
use crate::models::{AccountProfile, ProfileUpdate, Transaction};
use crate::session::BearerToken;

/// One request the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    FetchProfile { account_number: String, token: String },
    UpdateProfile { account_number: String, update: ProfileUpdate },
    Delete { account_number: String },
    FetchTransactions { token: String },
}

/// Scripted backend. A missing profile answers 404, missing transactions 500.
#[derive(Default)]
pub struct FakeBackend {
    profile: Option<AccountProfile>,
    transactions: Option<Vec<Transaction>>,
    fail_update: bool,
    fail_delete: bool,
    calls: Mutex<Vec<BackendCall>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: AccountProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

fn server_error() -> BackendError {
    BackendError::Status { status: 500, body: "internal error".to_string() }
}

#[async_trait]
impl BankBackend for FakeBackend {
    async fn fetch_admin_profile(
        &self,
        token: &BearerToken,
        account_number: &str,
    ) -> Result<AccountProfile, BackendError> {
        self.record(BackendCall::FetchProfile {
            account_number: account_number.to_string(),
            token: token.as_str().to_string(),
        });
        self.profile.clone().ok_or(BackendError::Status {
            status: 404,
            body: "account not found".to_string(),
        })
    }

    async fn update_admin_profile(
        &self,
        _token: &BearerToken,
        account_number: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::UpdateProfile {
            account_number: account_number.to_string(),
            update: update.clone(),
        });
        if self.fail_update {
            return Err(server_error());
        }
        Ok(())
    }

    async fn delete_account(&self, _token: &BearerToken, account_number: &str) -> Result<(), BackendError> {
        self.record(BackendCall::Delete {
            account_number: account_number.to_string(),
        });
        if self.fail_delete {
            return Err(server_error());
        }
        Ok(())
    }

    async fn fetch_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, BackendError> {
        self.record(BackendCall::FetchTransactions {
            token: token.as_str().to_string(),
        });
        self.transactions.clone().ok_or_else(server_error)
    }
}

/// Profile with every field filled
pub fn sample_profile() -> AccountProfile {
    AccountProfile {
        account_number: "ACC-1001".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address: "12 St James's Square".to_string(),
        phone_number: "+44 20 7946 0000".to_string(),
        country_code: "GB".to_string(),
        balance: "1500.5".to_string(),
    }
}

pub fn transaction(id: &str, source: &str, target: &str, amount: f64, kind: &str, date: &str) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        source_account_number: source.to_string(),
        target_account_number: target.to_string(),
        amount: amount.to_string(),
        transaction_type: kind.to_string(),
        transaction_date: date.to_string(),
    }
}
