use std::sync::Arc;

use reel_sync_models::{AuthenticatedUser, GenrePreference, UserProfile};
use reel_sync_store::{CollectionPath, DocumentKey, UserStore};
use serde_json::json;
use tracing::info;

use crate::error::ActivityError;
use crate::sync::CollectionSync;

/// Largest profile picture accepted for upload: 1 MiB.
pub const MAX_PROFILE_ASSET_BYTES: u64 = 1_048_576;

/// Gate applied before a profile asset is handed to the upload path.
/// The upload itself happens elsewhere; only the rule lives here.
pub fn validate_profile_asset(content_type: &str, size_bytes: u64) -> Result<(), ActivityError> {
    if !content_type.starts_with("image/") {
        return Err(ActivityError::validation(
            "profile picture must be an image",
        ));
    }
    if size_bytes > MAX_PROFILE_ASSET_BYTES {
        return Err(ActivityError::validation(
            "profile picture exceeds the 1MB size limit",
        ));
    }
    Ok(())
}

/// The user's profile document: display name, picture URL and the genre
/// preference set driving recommendations. Saves are merge writes, so a
/// partial save leaves other fields alone.
pub struct ProfileStore {
    store: Arc<dyn UserStore>,
    user: Option<AuthenticatedUser>,
    view: CollectionSync<UserProfile>,
}

impl ProfileStore {
    pub(crate) fn new(
        store: Arc<dyn UserStore>,
        user: Option<AuthenticatedUser>,
        view: CollectionSync<UserProfile>,
    ) -> Self {
        Self { store, user, view }
    }

    fn user(&self) -> Result<&AuthenticatedUser, ActivityError> {
        self.user.as_ref().ok_or(ActivityError::AuthRequired)
    }

    /// Merge-write the whole profile document.
    pub async fn save(&self, profile: &UserProfile) -> Result<(), ActivityError> {
        let user = self.user()?;
        let data = serde_json::to_value(profile)
            .map_err(|e| ActivityError::validation(format!("failed to encode profile: {e}")))?;
        self.store
            .put(
                &CollectionPath::profile(&user.uid),
                DocumentKey::Assigned(user.uid.clone()),
                data,
                true,
            )
            .await?;
        info!("profile saved");
        Ok(())
    }

    /// Merge-write only the preference set. Recommendations recompute once
    /// the change comes back through the profile snapshot.
    pub async fn set_preferences(&self, preferences: &GenrePreference) -> Result<(), ActivityError> {
        let user = self.user()?;
        let encoded = serde_json::to_value(preferences)
            .map_err(|e| ActivityError::validation(format!("failed to encode preferences: {e}")))?;
        self.store
            .put(
                &CollectionPath::profile(&user.uid),
                DocumentKey::Assigned(user.uid.clone()),
                json!({ "preferences": encoded }),
                true,
            )
            .await?;
        Ok(())
    }

    /// Last synchronized profile, if the document exists yet.
    pub fn profile(&self) -> Option<UserProfile> {
        self.view.current().first().cloned()
    }

    /// Current preference set; empty when no profile document exists.
    pub fn preferences(&self) -> GenrePreference {
        self.profile().map(|p| p.preferences).unwrap_or_default()
    }

    pub fn view(&self) -> CollectionSync<UserProfile> {
        self.view.clone()
    }
}
