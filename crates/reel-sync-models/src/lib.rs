pub mod genre;
pub mod profile;
pub mod provider_review;
pub mod rating;
pub mod recommendation;
pub mod review;
pub mod user;
pub mod watchlist;

pub use genre::{genre_id, genre_name, genre_names, GENRE_CATALOG};
pub use profile::{GenrePreference, UserProfile};
pub use provider_review::ProviderReview;
pub use rating::Rating;
pub use recommendation::RecommendationItem;
pub use review::Review;
pub use user::AuthenticatedUser;
pub use watchlist::WatchlistEntry;
