use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's rating for one movie. Keyed by `movie_id` in the ratings
/// collection: a later write for the same movie replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub movie_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(rename = "rating")]
    pub score: u8, // 0-10 integer
    #[serde(rename = "timestamp", default)]
    pub created_at: Option<DateTime<Utc>>,
}
