use std::sync::Arc;

use reel_sync_models::{AuthenticatedUser, Rating, Review, UserProfile, WatchlistEntry};
use reel_sync_provider::CatalogSource;
use reel_sync_store::{CollectionPath, SnapshotOrder, UserStore};
use tokio::task::JoinHandle;
use tracing::info;

use crate::activity::RatingReviewStore;
use crate::profile::ProfileStore;
use crate::recommend::{RecommendationEngine, RecommendationOptions};
use crate::sync::{CollectionSync, SyncEngine};
use crate::watchlist::WatchlistStore;

/// One signed-in (or anonymous) user's view of the system: the live
/// collection syncs, the mutation components over them, and the
/// recommendation engine bound to the profile's preference set.
///
/// Switching users is close-then-new: tear this session down and build a
/// fresh one for the new identity, so no subscription outlives its owner.
pub struct UserSession {
    sync: SyncEngine,
    activity: RatingReviewStore,
    watchlist: WatchlistStore,
    profile: ProfileStore,
    recommendations: Arc<RecommendationEngine>,
    recommend_task: Option<JoinHandle<()>>,
}

impl UserSession {
    pub fn new(
        store: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogSource>,
        user: Option<AuthenticatedUser>,
    ) -> Self {
        Self::with_options(store, catalog, user, RecommendationOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogSource>,
        user: Option<AuthenticatedUser>,
        options: RecommendationOptions,
    ) -> Self {
        let sync = SyncEngine::new(Arc::clone(&store));

        let (ratings, reviews, watchlist_view, profile_view) = match &user {
            Some(u) => {
                info!(uid = %u.uid, "opening user session");
                (
                    sync.open::<Rating>(&CollectionPath::ratings(&u.uid), SnapshotOrder::Unordered),
                    sync.open::<Review>(
                        &CollectionPath::reviews(&u.uid),
                        SnapshotOrder::CreatedAtDesc,
                    ),
                    sync.open::<WatchlistEntry>(
                        &CollectionPath::watchlist(&u.uid),
                        SnapshotOrder::Unordered,
                    ),
                    sync.open::<UserProfile>(
                        &CollectionPath::profile(&u.uid),
                        SnapshotOrder::Unordered,
                    ),
                )
            }
            None => {
                info!("opening anonymous session");
                (
                    CollectionSync::detached(),
                    CollectionSync::detached(),
                    CollectionSync::detached(),
                    CollectionSync::detached(),
                )
            }
        };

        let recommendations = Arc::new(RecommendationEngine::new(catalog, options));
        let recommend_task = user
            .is_some()
            .then(|| recommendations.bind(profile_view.clone()));

        Self {
            activity: RatingReviewStore::new(
                Arc::clone(&store),
                user.clone(),
                ratings,
                reviews,
            ),
            watchlist: WatchlistStore::new(Arc::clone(&store), user.clone(), watchlist_view),
            profile: ProfileStore::new(store, user, profile_view),
            sync,
            recommendations,
            recommend_task,
        }
    }

    pub fn activity(&self) -> &RatingReviewStore {
        &self.activity
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    pub fn recommendations(&self) -> &RecommendationEngine {
        &self.recommendations
    }

    /// Tear down every subscription and background task owned by this
    /// session. Views keep their last snapshot but stop updating.
    pub fn close(&mut self) {
        if let Some(task) = self.recommend_task.take() {
            task.abort();
        }
        self.sync.close_all();
    }
}

impl Drop for UserSession {
    fn drop(&mut self) {
        self.close();
    }
}
