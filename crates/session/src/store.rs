use catalog::TokenPair;
use tracing::warn;

use crate::context::SessionContext;
use crate::storage::{ACCESS_KEY, DARK_MODE_KEY, KeyValueStore, REFRESH_KEY, StorageError};
use crate::theme::Theme;

/// Persisted session state plus the context derived from it.
///
/// The context is recomputed whenever the stored token changes through this
/// type, so every consumer sees the same `{username, is_admin}`.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
    context: SessionContext,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn load(store: S) -> Self {
        let mut session = Self {
            store,
            context: SessionContext::anonymous(),
        };
        session.reload();
        session
    }

    /// Re-read the token from storage (it may have been changed elsewhere).
    pub fn reload(&mut self) {
        let token = self.access_token();
        self.context = SessionContext::from_token(token.as_deref());
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_KEY).filter(|t| !t.is_empty())
    }

    pub fn sign_in(&mut self, tokens: &TokenPair) -> Result<(), StorageError> {
        self.store.set(ACCESS_KEY, &tokens.access)?;
        self.store.set(REFRESH_KEY, &tokens.refresh)?;
        self.reload();
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<(), StorageError> {
        let access = self.store.remove(ACCESS_KEY);
        let refresh = self.store.remove(REFRESH_KEY);
        self.context = SessionContext::anonymous();
        access.and(refresh)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_stored(self.read(DARK_MODE_KEY).as_deref())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme().toggled();
        self.store.set(DARK_MODE_KEY, next.stored_value())?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(v) => v,
            Err(err) => {
                warn!("reading {key} from storage failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use catalog::unsigned_token;
    use serde_json::json;

    fn pair(admin: bool) -> TokenPair {
        TokenPair {
            access: unsigned_token(&json!({"username": "ada", "is_superuser": admin})),
            refresh: "r".to_string(),
        }
    }

    #[test]
    fn sign_in_persists_tokens_and_resolves_context() {
        let mut session = SessionStore::load(MemoryStore::new());
        assert!(!session.context().is_authenticated());

        session.sign_in(&pair(true)).unwrap();
        assert!(session.context().is_admin());
        assert_eq!(session.refresh_token().as_deref(), Some("r"));

        let reloaded = SessionStore::load(session.store().clone());
        assert_eq!(reloaded.context(), session.context());
    }

    #[test]
    fn sign_out_clears_tokens_and_context() {
        let mut session = SessionStore::load(MemoryStore::new());
        session.sign_in(&pair(false)).unwrap();
        session.sign_out().unwrap();
        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
        assert_eq!(session.context(), &SessionContext::anonymous());
    }

    #[test]
    fn garbage_token_in_storage_is_anonymous() {
        let mut store = MemoryStore::new();
        store.set(ACCESS_KEY, "garbage").unwrap();
        let session = SessionStore::load(store);
        assert!(!session.context().is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("garbage"));
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let mut session = SessionStore::load(MemoryStore::new());
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(session.store().get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
    }
}
