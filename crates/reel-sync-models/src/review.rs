use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored review. The id is assigned by the document store and
/// lives outside the document body; the synchronizer fills it in when
/// materializing a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>, // movie title the review is about
    #[serde(rename = "timestamp", default)]
    pub created_at: Option<DateTime<Utc>>,
}
