use std::sync::Arc;

use chrono::Utc;
use reel_sync_models::{AuthenticatedUser, Rating, Review};
use reel_sync_store::{CollectionPath, DocumentKey, UserStore};
use serde_json::json;
use tracing::info;

use crate::error::ActivityError;
use crate::sync::CollectionSync;

/// Per-user ratings and reviews. Mutations write through to the durable
/// store and are observed only via the next synchronizer snapshot; nothing
/// is updated optimistically.
pub struct RatingReviewStore {
    store: Arc<dyn UserStore>,
    user: Option<AuthenticatedUser>,
    ratings: CollectionSync<Rating>,
    reviews: CollectionSync<Review>,
}

impl RatingReviewStore {
    pub(crate) fn new(
        store: Arc<dyn UserStore>,
        user: Option<AuthenticatedUser>,
        ratings: CollectionSync<Rating>,
        reviews: CollectionSync<Review>,
    ) -> Self {
        Self {
            store,
            user,
            ratings,
            reviews,
        }
    }

    fn user(&self) -> Result<&AuthenticatedUser, ActivityError> {
        self.user.as_ref().ok_or(ActivityError::AuthRequired)
    }

    /// Upsert the user's rating for one movie. A second submission for the
    /// same movie replaces the first.
    pub async fn submit_rating(
        &self,
        movie_id: &str,
        title: &str,
        poster_path: Option<&str>,
        score: i32,
    ) -> Result<(), ActivityError> {
        let user = self.user()?;
        if !(0..=10).contains(&score) {
            return Err(ActivityError::validation(
                "rating must be between 0 and 10",
            ));
        }
        let rating = Rating {
            movie_id: movie_id.to_string(),
            title: title.to_string(),
            poster_path: poster_path.map(str::to_string),
            score: score as u8,
            created_at: Some(Utc::now()),
        };
        let data = serde_json::to_value(&rating)
            .map_err(|e| ActivityError::validation(format!("failed to encode rating: {e}")))?;
        self.store
            .put(
                &CollectionPath::ratings(&user.uid),
                DocumentKey::Assigned(movie_id.to_string()),
                data,
                false,
            )
            .await?;
        info!(movie_id, score, "rating submitted");
        Ok(())
    }

    /// Append a new review; the store assigns the id, which is returned.
    pub async fn submit_review(
        &self,
        movie_title: Option<&str>,
        content: &str,
    ) -> Result<String, ActivityError> {
        let user = self.user()?;
        if content.trim().is_empty() {
            return Err(ActivityError::validation("review cannot be empty"));
        }
        let review = Review {
            id: String::new(),
            author: user.author_name().to_string(),
            content: content.to_string(),
            title: movie_title.map(str::to_string),
            created_at: Some(Utc::now()),
        };
        let data = serde_json::to_value(&review)
            .map_err(|e| ActivityError::validation(format!("failed to encode review: {e}")))?;
        let id = self
            .store
            .put(
                &CollectionPath::reviews(&user.uid),
                DocumentKey::Generated,
                data,
                false,
            )
            .await?;
        info!(review_id = %id, "review submitted");
        Ok(id)
    }

    /// Replace the content of an existing review, leaving its other fields
    /// untouched (merge write, not a document replace).
    pub async fn edit_review(&self, id: &str, new_content: &str) -> Result<(), ActivityError> {
        let user = self.user()?;
        self.store
            .put(
                &CollectionPath::reviews(&user.uid),
                DocumentKey::Assigned(id.to_string()),
                json!({ "content": new_content }),
                true,
            )
            .await?;
        Ok(())
    }

    /// Delete a review by id. Deleting an id that no longer exists is not
    /// an error; the remote delete is idempotent.
    pub async fn delete_review(&self, id: &str) -> Result<(), ActivityError> {
        let user = self.user()?;
        self.store
            .delete(&CollectionPath::reviews(&user.uid), id)
            .await?;
        Ok(())
    }

    /// Last synchronized ratings, one per movie.
    pub fn ratings(&self) -> Arc<Vec<Rating>> {
        self.ratings.current()
    }

    /// Last synchronized reviews, newest first.
    pub fn reviews(&self) -> Arc<Vec<Review>> {
        self.reviews.current()
    }

    pub fn ratings_view(&self) -> CollectionSync<Rating> {
        self.ratings.clone()
    }

    pub fn reviews_view(&self) -> CollectionSync<Review> {
        self.reviews.clone()
    }
}
