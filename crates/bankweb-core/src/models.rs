//! Wire models for the banking backend

use serde::{Deserialize, Deserializer, Serialize};

/// Account profile as returned by the admin account endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default, deserialize_with = "number_as_text")]
    pub account_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    /// Assigned by the server, never edited here
    #[serde(default)]
    pub country_code: String,
    /// Raw textual form of the numeric balance
    #[serde(default, deserialize_with = "number_as_text")]
    pub balance: String,
}

/// Body of the admin account update call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub country_code: String,
    pub balance: serde_json::Value,
}

impl ProfileUpdate {
    /// Send the balance as a JSON number when the text is numeric, raw otherwise
    pub fn balance_value(raw: &str) -> serde_json::Value {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return serde_json::Value::from(int);
        }
        match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            Some(number) => serde_json::Value::Number(number),
            None => serde_json::Value::String(raw.to_string()),
        }
    }
}

/// One entry of the user's transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "number_as_text")]
    pub transaction_id: String,
    #[serde(default, deserialize_with = "number_as_text")]
    pub source_account_number: String,
    #[serde(default, deserialize_with = "number_as_text")]
    pub target_account_number: String,
    /// Display form of the amount; numbers lose a trailing `.0`
    #[serde(default, deserialize_with = "amount_as_text")]
    pub amount: String,
    /// Free-form classification, shown only to third parties
    #[serde(default)]
    pub transaction_type: String,
    /// ISO timestamp or epoch milliseconds, kept as text. Anything else becomes empty.
    #[serde(default, deserialize_with = "number_as_text")]
    pub transaction_date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
    Null,
    Other(serde_json::Value),
}

/// Accept a JSON number or string and keep its textual form.
/// Null and any other shape decode as empty text.
fn number_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
        NumberOrText::Null | NumberOrText::Other(_) => String::new(),
    })
}

/// Like `number_as_text`, but numbers print the way the web client shows them: `25.0` as `25`
fn amount_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        NumberOrText::Text(s) => s,
        NumberOrText::Null | NumberOrText::Other(_) => String::new(),
    })
}
