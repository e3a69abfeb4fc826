// Session failure handling
// Invoked when the refresh exchange fails terminally

use async_trait::async_trait;
use std::sync::Arc;

use crate::store::CredentialStore;

/// Invoked on terminal authentication failure.
///
/// Implementations own the user-visible consequence: clearing the session
/// and routing back to authentication. The forced re-login is deliberate,
/// not a silent failure.
#[async_trait]
pub trait SessionFailureHandler: Send + Sync {
    async fn on_session_expired(&self);
}

type RedirectFn = Box<dyn Fn() + Send + Sync>;

/// Default handler: clears the credential store and hands navigation to
/// the embedding app via an optional redirect hook
pub struct LogoutHandler {
    store: Arc<dyn CredentialStore>,
    redirect: Option<RedirectFn>,
}

impl LogoutHandler {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            redirect: None,
        }
    }

    /// Install the hook that routes the user back to the login screen
    pub fn with_redirect(mut self, redirect: impl Fn() + Send + Sync + 'static) -> Self {
        self.redirect = Some(Box::new(redirect));
        self
    }
}

#[async_trait]
impl SessionFailureHandler for LogoutHandler {
    async fn on_session_expired(&self) {
        // Later callers of a failed wave find the session already torn
        // down; redirecting them again would stack navigations.
        if self.store.access_token().is_none()
            && self.store.refresh_token().is_none()
            && self.store.user_id().is_none()
        {
            tracing::debug!("Session already cleared, skipping logout");
            return;
        }

        tracing::warn!("Session expired, clearing credentials");

        if let Err(e) = self.store.logout() {
            tracing::error!("Failed to clear credentials: {e:#}");
        }

        if let Some(redirect) = &self.redirect {
            redirect();
        }
    }
}
