use serde::{Deserialize, Serialize};

/// A ranked recommendation derived from the user's genre preferences.
/// Never persisted; regenerated whenever the preference set changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub movie_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}
