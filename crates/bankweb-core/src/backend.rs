//! Banking REST backend port and its reqwest adapter
//!
//! The adapter owns transport details only: URL building, bearer headers,
//! timeout, status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};

use crate::error::{BackendError, CoreError};
use crate::models::{AccountProfile, ProfileUpdate, Transaction};
use crate::session::BearerToken;

/// Operations the views need from the banking backend
#[async_trait]
pub trait BankBackend: Send + Sync {
    /// GET /api/admin/account/{accountNumber}
    async fn fetch_admin_profile(
        &self,
        token: &BearerToken,
        account_number: &str,
    ) -> Result<AccountProfile, BackendError>;

    /// PUT /api/admin/account/{accountNumber}
    async fn update_admin_profile(
        &self,
        token: &BearerToken,
        account_number: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError>;

    /// DELETE /api/admin/accounts/{accountNumber}
    async fn delete_account(&self, token: &BearerToken, account_number: &str) -> Result<(), BackendError>;

    /// GET /api/account/transactions
    async fn fetch_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, BackendError>;
}

pub fn admin_account_path(account_number: &str) -> String {
    format!("/api/admin/account/{}", urlencoding::encode(account_number))
}

pub fn admin_delete_path(account_number: &str) -> String {
    format!("/api/admin/accounts/{}", urlencoding::encode(account_number))
}

pub const TRANSACTIONS_PATH: &str = "/api/account/transactions";

/// Backend reached over HTTP
pub struct HttpBankBackend {
    client: Client,
    base_url: String,
}

impl HttpBankBackend {
    /// Build an adapter with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::ClientSetup { message: e.to_string() })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &bankweb_config::Config) -> Result<Self, CoreError> {
        Self::new(&config.backend.base_url, config.backend_timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: &BearerToken) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, token.header_value())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send and return the body of a successful response
    async fn send(&self, request: RequestBuilder) -> Result<bytes::Bytes, BackendError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body)
    }
}

#[async_trait]
impl BankBackend for HttpBankBackend {
    async fn fetch_admin_profile(
        &self,
        token: &BearerToken,
        account_number: &str,
    ) -> Result<AccountProfile, BackendError> {
        let path = admin_account_path(account_number);
        log::debug!("GET {}", path);
        let body = self.send(self.request(Method::GET, &path, token)).await?;
        decode(&body)
    }

    async fn update_admin_profile(
        &self,
        token: &BearerToken,
        account_number: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let path = admin_account_path(account_number);
        log::debug!("PUT {}", path);
        self.send(self.request(Method::PUT, &path, token).json(update)).await?;
        Ok(())
    }

    async fn delete_account(&self, token: &BearerToken, account_number: &str) -> Result<(), BackendError> {
        let path = admin_delete_path(account_number);
        log::debug!("DELETE {}", path);
        self.send(self.request(Method::DELETE, &path, token)).await?;
        Ok(())
    }

    async fn fetch_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, BackendError> {
        log::debug!("GET {}", TRANSACTIONS_PATH);
        let body = self.send(self.request(Method::GET, TRANSACTIONS_PATH, token)).await?;
        decode(&body)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| BackendError::decode(format!("invalid JSON payload: {}", e)))
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::transport(format!("timed out: {}", error))
    } else {
        BackendError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BackendError {
    BackendError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{}...", preview)
    } else {
        preview
    }
}
