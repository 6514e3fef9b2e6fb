use std::sync::Arc;

use reel_sync_models::{AuthenticatedUser, WatchlistEntry};
use reel_sync_store::{CollectionPath, DocumentKey, UserStore};
use tracing::info;

use crate::error::ActivityError;
use crate::sync::CollectionSync;

/// Per-user watchlist membership. The store does not dedupe by movie:
/// adding the same movie twice creates two documents, each removable by
/// its own store-assigned id.
pub struct WatchlistStore {
    store: Arc<dyn UserStore>,
    user: Option<AuthenticatedUser>,
    entries: CollectionSync<WatchlistEntry>,
}

impl WatchlistStore {
    pub(crate) fn new(
        store: Arc<dyn UserStore>,
        user: Option<AuthenticatedUser>,
        entries: CollectionSync<WatchlistEntry>,
    ) -> Self {
        Self {
            store,
            user,
            entries,
        }
    }

    fn user(&self) -> Result<&AuthenticatedUser, ActivityError> {
        self.user.as_ref().ok_or(ActivityError::AuthRequired)
    }

    /// Append `entry` to the watchlist under a fresh store-assigned id.
    /// The entry's own `id` field is ignored on write.
    pub async fn add(&self, entry: &WatchlistEntry) -> Result<String, ActivityError> {
        let user = self.user()?;
        let data = serde_json::to_value(entry)
            .map_err(|e| ActivityError::validation(format!("failed to encode entry: {e}")))?;
        let id = self
            .store
            .put(
                &CollectionPath::watchlist(&user.uid),
                DocumentKey::Generated,
                data,
                false,
            )
            .await?;
        info!(movie_id = %entry.movie_id, entry_id = %id, "added to watchlist");
        Ok(id)
    }

    /// Remove one entry by its store-assigned id. Idempotent.
    pub async fn remove(&self, entry_id: &str) -> Result<(), ActivityError> {
        let user = self.user()?;
        self.store
            .delete(&CollectionPath::watchlist(&user.uid), entry_id)
            .await?;
        Ok(())
    }

    /// Last synchronized watchlist contents.
    pub fn entries(&self) -> Arc<Vec<WatchlistEntry>> {
        self.entries.current()
    }

    pub fn entries_view(&self) -> CollectionSync<WatchlistEntry> {
        self.entries.clone()
    }
}
