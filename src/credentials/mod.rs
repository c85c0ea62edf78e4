//! Credential store for the Lichess bearer token.
//!
//! The store holds at most one token for the lifetime of the process. It is
//! created empty (or seeded from `LICHESS_TOKEN`), replaced by `set_token`
//! and cleared only after the remote revoke endpoint confirms success.
//!
//! The gateway owns an `Arc<CredentialStore>` and reads it exactly once per
//! invocation, so tests can hand each gateway an isolated store.

use std::fmt;

use parking_lot::RwLock;

/// Process-lifetime holder of the current bearer token.
///
/// Readers take a snapshot with [`CredentialStore::get`]; writers replace or
/// clear the value atomically. A `parking_lot::RwLock` gives the
/// single-writer / multiple-reader discipline needed if invocations ever run
/// concurrently.
#[derive(Default)]
pub struct CredentialStore {
    token: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an initial token.
    ///
    /// Blank values are treated as absent.
    pub fn with_token(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replace the stored token.
    ///
    /// Surrounding whitespace is trimmed. A blank value is rejected and the
    /// store is left unchanged; returns whether the token was stored.
    pub fn set(&self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            log::warn!("Ignoring blank Lichess token");
            return false;
        }
        *self.token.write() = Some(token.to_string());
        log::info!("Lichess token updated");
        true
    }

    /// Snapshot of the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Whether a token is currently stored.
    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }

    /// Remove the stored token.
    pub fn clear(&self) {
        *self.token.write() = None;
        log::info!("Lichess token cleared");
    }

    /// Clear the store only if it still holds `token`.
    ///
    /// Returns `true` when the token was removed. A `set` that landed after
    /// the snapshot was taken is left untouched.
    pub fn clear_if(&self, token: &str) -> bool {
        let mut guard = self.token.write();
        if guard.as_deref() == Some(token) {
            *guard = None;
            log::info!("Lichess token cleared after revocation");
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("token", &if self.is_set() { "<set>" } else { "<empty>" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = CredentialStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_set());
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let store = CredentialStore::new();
        store.set("lip_first");
        store.set("lip_second");
        assert_eq!(store.get().as_deref(), Some("lip_second"));
    }

    #[test]
    fn test_set_trims_and_rejects_blank() {
        let store = CredentialStore::new();
        assert!(store.set("  lip_padded\n"));
        assert_eq!(store.get().as_deref(), Some("lip_padded"));

        assert!(!store.set("   "));
        assert_eq!(store.get().as_deref(), Some("lip_padded"));
    }

    #[test]
    fn test_clear_removes_token() {
        let store = CredentialStore::with_token(Some("lip_abc".into()));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_with_token_ignores_blank() {
        assert!(CredentialStore::with_token(Some("   ".into())).get().is_none());
        assert!(CredentialStore::with_token(None).get().is_none());
        assert_eq!(
            CredentialStore::with_token(Some(" lip_x ".into())).get().as_deref(),
            Some("lip_x")
        );
    }

    #[test]
    fn test_clear_if_only_clears_matching_token() {
        let store = CredentialStore::with_token(Some("lip_old".into()));
        store.set("lip_new");
        assert!(!store.clear_if("lip_old"));
        assert_eq!(store.get().as_deref(), Some("lip_new"));

        assert!(store.clear_if("lip_new"));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let store = CredentialStore::with_token(Some("lip_secret".into()));
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("lip_secret"));
        assert!(rendered.contains("<set>"));
    }
}
