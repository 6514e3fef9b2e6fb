use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::document::{CollectionPath, DocumentKey, Snapshot, SnapshotOrder};
use crate::error::StoreError;

/// Live read side of a subscription: yields the full current snapshot
/// immediately, then again on every remote change, in change order.
/// `None` means the subscription ended (store side gone).
pub struct SnapshotStream {
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl SnapshotStream {
    pub fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// A stream that is already closed. Used by store implementations to
    /// report a failed subscription without panicking the consumer.
    pub fn closed() -> Self {
        let (_, rx) = mpsc::unbounded_channel();
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

/// The durable per-user document store: point writes, point deletes and
/// snapshot-on-change subscriptions. Everything the core knows about
/// persistence goes through this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Open a live subscription for `path`. Exactly one snapshot is
    /// delivered up front; each subsequent mutation of the collection
    /// delivers the full new snapshot.
    fn subscribe(&self, path: &CollectionPath, order: SnapshotOrder) -> SnapshotStream;

    /// Write a document. `DocumentKey::Assigned` upserts under that key;
    /// `DocumentKey::Generated` appends under a fresh store-assigned id.
    /// With `merge`, fields of `data` are laid over an existing document
    /// instead of replacing it. Returns the document id.
    async fn put(
        &self,
        path: &CollectionPath,
        key: DocumentKey,
        data: Value,
        merge: bool,
    ) -> Result<String, StoreError>;

    /// Delete by id. Idempotent: deleting an absent id succeeds.
    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError>;
}
