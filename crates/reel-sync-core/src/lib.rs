pub mod activity;
pub mod error;
pub mod overlay;
pub mod profile;
pub mod recommend;
pub mod session;
pub mod sync;
pub mod watchlist;

pub use activity::RatingReviewStore;
pub use error::ActivityError;
pub use overlay::{downvote, upvote, with_votes, VotedReview};
pub use profile::{validate_profile_asset, ProfileStore, MAX_PROFILE_ASSET_BYTES};
pub use recommend::{RecommendationEngine, RecommendationOptions};
pub use session::UserSession;
pub use sync::{CollectionSync, Materialize, SyncEngine};
pub use watchlist::WatchlistStore;
