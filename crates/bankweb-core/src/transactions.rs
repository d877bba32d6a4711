//! Transaction list viewer
//!
//! Fetches the signed-in user's whole history once and renders each entry
//! relative to the viewer's own account number.

use std::fmt::Write;

use bankweb_config::Config;
use bankweb_utils::with_currency_prefix;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::backend::BankBackend;
use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::session::{BearerToken, SessionContext, SessionKeys, TokenStore};

pub const LOADING_MESSAGE: &str = "Loading transactions...";
pub const NO_TOKEN: &str = "No authentication token found.";
pub const FETCH_FAILED: &str = "Failed to fetch transactions.";
pub const EMPTY_MESSAGE: &str = "No previous transactions";
pub const INVALID_DATE: &str = "Invalid Date";

/// Which side of a transaction the viewer is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
    /// Viewer is on neither side; carries the raw transaction type
    Other(String),
}

impl Direction {
    /// Source match wins over target match
    pub fn classify(viewer: &str, tx: &Transaction) -> Self {
        if tx.source_account_number == viewer {
            Direction::Sent
        } else if tx.target_account_number == viewer {
            Direction::Received
        } else {
            Direction::Other(tx.transaction_type.clone())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Direction::Sent => "Sent",
            Direction::Received => "Received",
            Direction::Other(kind) => kind,
        }
    }
}

/// Account numbers shown for an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parties {
    /// Counterparty of a sent transaction
    To(String),
    /// Counterparty of a received transaction
    From(String),
    Both { from: String, to: String },
}

impl Parties {
    fn for_direction(direction: &Direction, tx: &Transaction) -> Self {
        match direction {
            Direction::Sent => Parties::To(tx.target_account_number.clone()),
            Direction::Received => Parties::From(tx.source_account_number.clone()),
            Direction::Other(_) => Parties::Both {
                from: tx.source_account_number.clone(),
                to: tx.target_account_number.clone(),
            },
        }
    }
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    pub id: String,
    pub direction: Direction,
    pub parties: Parties,
    pub amount: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub currency_symbol: String,
    pub date_format: String,
    pub keys: SessionKeys,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ListSettings {
    fn from(config: &Config) -> Self {
        Self {
            currency_symbol: config.display.currency_symbol.clone(),
            date_format: config.display.date_format.clone(),
            keys: SessionKeys::from(&config.session),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded {
        account_number: String,
        transactions: Vec<Transaction>,
    },
    Errored(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionList {
    state: ListState,
    settings: ListSettings,
}

impl TransactionList {
    pub fn loading(settings: ListSettings) -> Self {
        Self {
            state: ListState::Loading,
            settings,
        }
    }

    /// Fetch the viewer's history in one request
    pub async fn load(
        session: &SessionContext,
        store: &dyn TokenStore,
        backend: &dyn BankBackend,
        settings: ListSettings,
    ) -> Self {
        let Some(token) = settings.keys.user_token(store) else {
            log::info!("No '{}' token stored, not fetching transactions", settings.keys.user_token);
            return Self {
                state: ListState::Errored(NO_TOKEN.to_string()),
                settings,
            };
        };

        let result = fetch_history(session, &token, backend).await;

        let state = match result {
            Ok((account_number, transactions)) => {
                log::debug!("Loaded {} transactions for {}", transactions.len(), account_number);
                ListState::Loaded {
                    account_number,
                    transactions,
                }
            }
            Err(e) => {
                log::warn!("[{}] Fetching transactions failed: {}", e.code(), e);
                ListState::Errored(FETCH_FAILED.to_string())
            }
        };

        Self { state, settings }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// True when there is nothing to list, including after an error
    pub fn is_empty(&self) -> bool {
        match &self.state {
            ListState::Loaded { transactions, .. } => transactions.is_empty(),
            _ => true,
        }
    }

    /// Rows in backend order, classified against the viewer
    pub fn entries(&self) -> Vec<TransactionEntry> {
        let ListState::Loaded {
            account_number,
            transactions,
        } = &self.state
        else {
            return Vec::new();
        };

        transactions
            .iter()
            .map(|tx| {
                let direction = Direction::classify(account_number, tx);
                TransactionEntry {
                    id: tx.transaction_id.clone(),
                    parties: Parties::for_direction(&direction, tx),
                    direction,
                    amount: with_currency_prefix(&self.settings.currency_symbol, &tx.amount),
                    date: format_calendar_date(&tx.transaction_date, &self.settings.date_format),
                }
            })
            .collect()
    }
}

async fn fetch_history(
    session: &SessionContext,
    token: &BearerToken,
    backend: &dyn BankBackend,
) -> CoreResult<(String, Vec<Transaction>)> {
    let account_number = session
        .current_user
        .as_ref()
        .map(|user| user.account_number.clone())
        .ok_or(CoreError::MissingSession { kind: "user" })?;
    let transactions = backend.fetch_transactions(token).await?;
    Ok((account_number, transactions))
}

/// Calendar date of a timestamp, no time component.
/// Offset-aware timestamps keep the date in their own offset.
pub fn format_calendar_date(timestamp: &str, format: &str) -> String {
    let Some(date) = parse_date(timestamp.trim()) else {
        return INVALID_DATE.to_string();
    };

    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(format)).is_err() {
        log::debug!("Invalid date format '{}', falling back to ISO", format);
        return date.to_string();
    }
    formatted
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    // Bare integers are epoch milliseconds, read in UTC
    if !timestamp.is_empty() && timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return timestamp
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = timestamp.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    timestamp.parse::<NaiveDate>().ok()
}
