// 401 handling
// Single-flight refresh of the access token and one-shot request retry

use reqwest::header::AUTHORIZATION;
use reqwest::Request;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::refresh::RefreshClient;
use super::session::SessionFailureHandler;
use super::signer;
use crate::error::RefreshError;
use crate::store::CredentialStore;

const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Converts an unauthorized response into either a retried request or a
/// terminal failure that logs the session out.
///
/// Concurrent 401s sharing one expired token converge on a single refresh
/// exchange: the first caller through the lock performs it, the rest pick
/// up the rotated token when the lock is released. Refresh tokens rotate
/// on use, so parallel exchanges would invalidate each other.
pub struct TokenAuthenticator {
    store: Arc<dyn CredentialStore>,
    refresh_client: Arc<dyn RefreshClient>,
    failure_handler: Arc<dyn SessionFailureHandler>,

    /// Guards the read-refresh-token -> exchange -> write-tokens sequence
    refresh_lock: Mutex<()>,

    /// Upper bound on how long a caller may be suspended on the exchange
    refresh_timeout: Duration,
}

impl TokenAuthenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        refresh_client: Arc<dyn RefreshClient>,
        failure_handler: Arc<dyn SessionFailureHandler>,
    ) -> Self {
        Self {
            store,
            refresh_client,
            failure_handler,
            refresh_lock: Mutex::new(()),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Transport boundary: given the original request and whether its
    /// failing response descends from an earlier retry, produce the request
    /// to resend, or `None` to surface the original failure unchanged.
    pub async fn authenticate(
        &self,
        original: &Request,
        prior_response_exists: bool,
    ) -> Option<Request> {
        // A response that is itself the product of a retry is never
        // re-authenticated: one retry per request.
        if prior_response_exists {
            tracing::debug!("Response already descends from a retry, giving up");
            return None;
        }

        let stale_token = bearer_token(original);

        let _flight = self.refresh_lock.lock().await;

        // Another caller may have finished the exchange while we waited
        if let Some(current) = self.store.access_token() {
            if !current.is_empty() && Some(current.as_str()) != stale_token.as_deref() {
                tracing::debug!("Token already rotated by a concurrent refresh, retrying directly");
                return self.rebuild(original, &current);
            }
        }

        match self.try_refresh().await {
            Ok(()) => {
                // Defensive: a successful exchange must have stored a token
                let token = self.store.access_token().filter(|t| !t.is_empty())?;
                self.rebuild(original, &token)
            }
            Err(e) => {
                tracing::error!("Refresh exchange failed: {e}");
                self.failure_handler.on_session_expired().await;
                None
            }
        }
    }

    /// The critical section body: read refresh token, exchange, store the
    /// new pair. Must only run while `refresh_lock` is held.
    async fn try_refresh(&self) -> Result<(), RefreshError> {
        let refresh_token = self
            .store
            .refresh_token()
            .filter(|t| !t.trim().is_empty())
            .ok_or(RefreshError::MissingToken)?;

        let pair = tokio::time::timeout(
            self.refresh_timeout,
            self.refresh_client.refresh(&refresh_token),
        )
        .await
        .map_err(|_| RefreshError::Timeout)??;

        // User identity is never changed by a refresh
        self.store
            .login(&pair.access_token.value, &pair.refresh_token.value, None)
            .map_err(|e| RefreshError::Malformed(format!("failed to persist tokens: {e:#}")))?;

        Ok(())
    }

    /// Clone the original request with the bearer header replaced
    fn rebuild(&self, original: &Request, token: &str) -> Option<Request> {
        let mut retried = original.try_clone()?;
        match signer::bearer_value(token) {
            Ok(value) => {
                retried.headers_mut().insert(AUTHORIZATION, value);
                Some(retried)
            }
            Err(_) => {
                tracing::warn!("Refreshed token contains invalid header characters");
                None
            }
        }
    }
}

/// Extract the bearer token a request was sent with
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}
