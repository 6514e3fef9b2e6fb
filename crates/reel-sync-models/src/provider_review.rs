use serde::{Deserialize, Serialize};

/// A review supplied by the catalog provider for one movie. Read-only;
/// the vote overlay layers transient counters on top of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderReview {
    pub id: String,
    pub author: String,
    pub content: String,
}
