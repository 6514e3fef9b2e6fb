use std::fmt;

use serde_json::Value;

/// Field the store orders on when a subscription requests server-side
/// ordering. Matches the field written by rating and review documents.
pub const CREATED_AT_FIELD: &str = "timestamp";

/// One document as delivered by the store: the store-assigned id plus the
/// raw document body. Typed materialization happens on the consumer side.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// The full current contents of a collection, delivered on every change.
pub type Snapshot = Vec<Document>;

/// Path addressing a per-user sub-collection inside the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn ratings(uid: &str) -> Self {
        Self(format!("users/{uid}/ratings"))
    }

    pub fn reviews(uid: &str) -> Self {
        Self(format!("users/{uid}/reviews"))
    }

    pub fn watchlist(uid: &str) -> Self {
        Self(format!("users/{uid}/watchlist"))
    }

    /// The profile lives on the user document itself; modeled as a
    /// one-document collection keyed by the uid.
    pub fn profile(uid: &str) -> Self {
        Self(format!("users/{uid}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a write addresses its document: upsert under a caller-chosen key
/// (ratings, profile) or append under a store-generated id (reviews,
/// watchlist).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKey {
    Assigned(String),
    Generated,
}

/// Ordering a subscription requests from the store. The store sorts;
/// documents lacking the ordering field sort last rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrder {
    Unordered,
    CreatedAtDesc,
}
