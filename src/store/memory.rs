// In-memory credential store for tests and ephemeral sessions

use anyhow::Result;
use std::sync::Mutex;

use super::{Credential, CredentialStore};

/// Credential store holding everything behind a single mutex, so that
/// login/logout are naturally atomic
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Credential {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    fn user_id(&self) -> Option<String> {
        self.read().user_id
    }

    fn login(&self, access_token: &str, refresh_token: &str, user_id: Option<&str>) -> Result<()> {
        let mut creds = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        creds.access_token = non_blank(access_token);
        creds.refresh_token = non_blank(refresh_token);
        if let Some(user_id) = user_id {
            creds.user_id = non_blank(user_id);
        }
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        let mut creds = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *creds = Credential::default();
        Ok(())
    }
}

/// Blank values clear the field, matching the SQLite store's delete-on-blank
fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_sets_tokens() {
        let store = MemoryCredentialStore::new();
        store.login("access", "refresh", Some("user-1")).unwrap();

        assert_eq!(store.access_token().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
        assert_eq!(store.user_id().as_deref(), Some("user-1"));
    }

    #[test]
    fn test_login_without_user_id_keeps_identity() {
        let store = MemoryCredentialStore::new();
        store.login("a1", "r1", Some("user-1")).unwrap();

        // A refresh rotates tokens but never the user
        store.login("a2", "r2", None).unwrap();

        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r2"));
        assert_eq!(store.user_id().as_deref(), Some("user-1"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let store = MemoryCredentialStore::new();
        store.login("a1", "r1", Some("user-1")).unwrap();
        store.logout().unwrap();

        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert_eq!(store.user_id(), None);
    }

    #[test]
    fn test_blank_values_clear_fields() {
        let store = MemoryCredentialStore::new();
        store.login("a1", "r1", Some("user-1")).unwrap();

        // Same sequence against either store implementation reads back None
        store.login("a2", "  ", None).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token(), None);

        store.login("a3", "r3", Some("")).unwrap();
        assert_eq!(store.user_id(), None);
    }

    #[test]
    fn test_has_credentials() {
        let store = MemoryCredentialStore::new();
        assert!(!store.has_credentials());

        store.login("a1", "r1", None).unwrap();
        assert!(store.has_credentials());

        store.login("", "r1", None).unwrap();
        assert!(!store.has_credentials());
    }
}
