// Credential storage
// Atomic login/logout transactions over access token, refresh token, user id

mod memory;
mod sqlite;

pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;

use anyhow::Result;

/// Snapshot of the persisted credential fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

/// Owner of the current session credentials.
///
/// Implementations are injected into the signer and authenticator; the core
/// never caches a credential across requests. `login` and `logout` are
/// transactions: a reader must never observe a half-written credential.
pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn user_id(&self) -> Option<String>;

    /// Atomic upsert of the token pair. The user id is left unchanged
    /// when `None` (a token refresh never updates identity).
    fn login(&self, access_token: &str, refresh_token: &str, user_id: Option<&str>) -> Result<()>;

    /// Atomic clear of all three fields.
    fn logout(&self) -> Result<()>;

    /// Both tokens present and non-blank.
    fn has_credentials(&self) -> bool {
        let present = |v: Option<String>| v.map(|s| !s.trim().is_empty()).unwrap_or(false);
        present(self.access_token()) && present(self.refresh_token())
    }
}
