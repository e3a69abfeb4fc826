// Error handling module
// Defines the refresh-exchange and transport error types

use thiserror::Error;

/// Errors from the refresh-token exchange.
///
/// All of these are handled inside the authenticator; none of them cross
/// the transport boundary. They exist so the swallowed cause can be logged
/// with enough detail to tell a rejected token from a broken payload.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// No refresh token on record (absent or blank)
    #[error("no refresh token on record")]
    MissingToken,

    /// Network-level failure reaching the exchange endpoint
    #[error("refresh request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The exchange endpoint rejected the token
    #[error("refresh rejected: {status} - {body}")]
    Status { status: u16, body: String },

    /// The exchange succeeded at the HTTP level but the payload is unusable
    #[error("malformed refresh response: {0}")]
    Malformed(String),

    /// The exchange did not resolve within the configured bound
    #[error("refresh exchange timed out")]
    Timeout,
}

/// Transport-level errors surfaced by [`AuthHttpClient`](crate::client::AuthHttpClient).
///
/// Authentication outcomes are never errors at this boundary: a 401 that
/// survives the refresh/retry cycle is returned as an ordinary response.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Anything unexpected inside the client itself
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, ClientError>;
