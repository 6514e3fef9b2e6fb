use serde::{Deserialize, Serialize};

/// One watchlist document. The store does not enforce uniqueness per
/// movie_id: the same movie added twice yields two entries, each removable
/// by its own store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}
