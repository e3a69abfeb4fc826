// Request signing
// Attaches the current access token as a bearer header

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use std::sync::Arc;

use crate::store::CredentialStore;

/// Attaches the current access token to outgoing requests.
///
/// A missing token is not an error: the request goes out unauthenticated.
pub struct RequestSigner {
    store: Arc<dyn CredentialStore>,
}

impl RequestSigner {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Insert (replace, never append) the bearer header when a token exists.
    /// Idempotent: signing twice produces the same single header.
    pub fn sign(&self, request: &mut Request) {
        let Some(token) = self.store.access_token() else {
            return;
        };

        match bearer_value(&token) {
            Ok(value) => {
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!(
                    "Access token contains invalid header characters, sending unauthenticated"
                );
            }
        }
    }
}

/// Build an `Authorization: Bearer <token>` header value
pub(crate) fn bearer_value(token: &str) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!("Bearer {token}"))
}
