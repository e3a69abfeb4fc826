// Refresh exchange wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token value with its expiry
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(rename = "token")]
    pub value: String,

    #[serde(rename = "validTo")]
    pub expires_at: DateTime<Utc>,
}

/// Access/refresh pair returned by the refresh exchange.
/// Transient: consumed immediately to update the credential store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: Token,
    pub refresh_token: Token,
}

/// Refresh exchange request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}
