//! Typed access to the draft, user accounts and the theme preference.

use crate::error::StoreError;
use crate::store::Store;
use registration_core::{DraftRecord, UserRecord};
use tracing::{debug, info, instrument, warn};

/// Key holding the serialized draft.
pub const DRAFT_KEY: &str = "registrationDraft";

/// Key holding the dark-mode preference (`"true"` / `"false"`).
pub const DARK_MODE_KEY: &str = "darkMode";

/// Keys that can never be used as a user id.
pub const RESERVED_KEYS: [&str; 2] = [DRAFT_KEY, DARK_MODE_KEY];

impl Store {
    #[instrument(skip(self, draft), fields(keys = draft.len()))]
    pub async fn save_draft(&self, draft: &DraftRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(draft)?;
        self.set(DRAFT_KEY, &json).await?;
        debug!("Draft saved");
        Ok(())
    }

    /// Load the saved draft.
    ///
    /// A draft that no longer parses is reported as absent; the stored text
    /// stays until the next save or clear overwrites it.
    pub async fn load_draft(&self) -> Option<DraftRecord> {
        let raw = self.get(DRAFT_KEY).await?;

        match serde_json::from_str::<DraftRecord>(&raw) {
            Ok(draft) => {
                info!("Loaded saved draft with {} keys", draft.len());
                Some(draft)
            }
            Err(e) => {
                warn!("Ignoring unreadable saved draft: {}", e);
                None
            }
        }
    }

    pub async fn clear_draft(&self) -> Result<bool, StoreError> {
        self.remove(DRAFT_KEY).await
    }

    /// Store a new account under its user id.
    ///
    /// Refuses blank ids, ids that collide with internal keys, and ids that
    /// are already registered.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub async fn register_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let key = user.user_id.as_str();

        if key.trim().is_empty() {
            return Err(StoreError::EmptyUserId);
        }
        if RESERVED_KEYS.contains(&key) {
            return Err(StoreError::ReservedKey(key.to_string()));
        }
        if self.contains(key).await {
            return Err(StoreError::UserExists(key.to_string()));
        }

        let json = serde_json::to_string(user)?;
        self.set(key, &json).await?;

        info!("Registered user {}", key);
        Ok(())
    }

    pub async fn load_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        if RESERVED_KEYS.contains(&user_id) {
            return Ok(None);
        }

        match self.get(user_id).await {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn dark_mode(&self) -> bool {
        self.get(DARK_MODE_KEY).await.as_deref() == Some("true")
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<(), StoreError> {
        self.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserRecord {
        UserRecord {
            user_id: id.into(),
            password: "secret1".into(),
            name: "Maria".into(),
            email: "maria@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_draft_round_trip() {
        let store = Store::memory();
        let mut draft = DraftRecord::new();
        draft.insert("email", "maria@example.com");
        draft.insert("track", "backend");

        store.save_draft(&draft).await.unwrap();
        assert_eq!(store.load_draft().await, Some(draft));

        assert!(store.clear_draft().await.unwrap());
        assert!(store.load_draft().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_draft_is_ignored() {
        let store = Store::memory();
        store.set(DRAFT_KEY, "{not json").await.unwrap();

        assert!(store.load_draft().await.is_none());
        // Left in place until overwritten.
        assert!(store.contains(DRAFT_KEY).await);
    }

    #[tokio::test]
    async fn test_register_and_load_user() {
        let store = Store::memory();
        store.register_user(&user("maria")).await.unwrap();

        let loaded = store.load_user("maria").await.unwrap();
        assert_eq!(loaded, Some(user("maria")));

        let raw = store.get("maria").await.unwrap();
        assert!(raw.contains("\"userId\":\"maria\""));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_id() {
        let store = Store::memory();
        let result = store.register_user(&user("  ")).await;
        assert!(matches!(result, Err(StoreError::EmptyUserId)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate() {
        let store = Store::memory();
        store.register_user(&user("maria")).await.unwrap();

        let mut other = user("maria");
        other.password = "different".into();
        let result = store.register_user(&other).await;

        assert!(matches!(result, Err(StoreError::UserExists(_))));
        assert_eq!(
            store.load_user("maria").await.unwrap().unwrap().password,
            "secret1"
        );
    }

    #[tokio::test]
    async fn test_register_rejects_reserved_keys() {
        let store = Store::memory();
        for key in RESERVED_KEYS {
            let result = store.register_user(&user(key)).await;
            assert!(matches!(result, Err(StoreError::ReservedKey(_))));
        }
    }

    #[tokio::test]
    async fn test_dark_mode_preference() {
        let store = Store::memory();
        assert!(!store.dark_mode().await);

        store.set_dark_mode(true).await.unwrap();
        assert!(store.dark_mode().await);

        store.set_dark_mode(false).await.unwrap();
        assert!(!store.dark_mode().await);
    }
}
