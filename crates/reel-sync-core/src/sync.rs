use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reel_sync_models::{Rating, Review, UserProfile, WatchlistEntry};
use reel_sync_store::{CollectionPath, Document, Snapshot, SnapshotOrder, UserStore};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Turns raw store documents into typed entries when a snapshot is
/// materialized.
pub trait Materialize: Sized + Send + Sync + 'static {
    /// Decode one document. `None` skips it: a document this type cannot
    /// read must never take the whole snapshot down.
    fn from_document(doc: &Document) -> Option<Self>;

    /// Entries sharing a key collapse to one. The most-recently-seen entry
    /// wins; the first occurrence keeps its position in the snapshot.
    fn dedupe_key(&self) -> Option<String> {
        None
    }
}

impl Materialize for Rating {
    fn from_document(doc: &Document) -> Option<Self> {
        serde_json::from_value(doc.data.clone()).ok()
    }

    // A re-keyed rating write can transiently surface as two documents;
    // dedupe by title so the view never shows a movie twice.
    fn dedupe_key(&self) -> Option<String> {
        Some(self.title.clone())
    }
}

impl Materialize for Review {
    fn from_document(doc: &Document) -> Option<Self> {
        let mut review: Review = serde_json::from_value(doc.data.clone()).ok()?;
        review.id = doc.id.clone();
        Some(review)
    }
}

impl Materialize for WatchlistEntry {
    fn from_document(doc: &Document) -> Option<Self> {
        let mut entry: WatchlistEntry = serde_json::from_value(doc.data.clone()).ok()?;
        entry.id = doc.id.clone();
        Some(entry)
    }
}

impl Materialize for UserProfile {
    fn from_document(doc: &Document) -> Option<Self> {
        serde_json::from_value(doc.data.clone()).ok()
    }
}

fn materialize<T: Materialize>(snapshot: &Snapshot) -> Vec<T> {
    let mut entries: Vec<T> = Vec::with_capacity(snapshot.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for doc in snapshot {
        let Some(entry) = T::from_document(doc) else {
            warn!(doc_id = %doc.id, "skipping undecodable document");
            continue;
        };
        match entry.dedupe_key() {
            Some(key) => match positions.get(&key) {
                Some(&position) => entries[position] = entry,
                None => {
                    positions.insert(key, entries.len());
                    entries.push(entry);
                }
            },
            None => entries.push(entry),
        }
    }
    entries
}

/// A live materialized view over one collection. Each snapshot delivery
/// replaces the contents wholesale; consumers never merge by hand.
pub struct CollectionSync<T> {
    rx: watch::Receiver<Arc<Vec<T>>>,
}

impl<T> Clone for CollectionSync<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> CollectionSync<T> {
    /// An empty view with no backing subscription. Used for sessions with
    /// no authenticated user; it never changes.
    pub fn detached() -> Self {
        let (_tx, rx) = watch::channel(Arc::new(Vec::new()));
        Self { rx }
    }

    /// The last materialized snapshot. Cheap: clones an `Arc`.
    pub fn current(&self) -> Arc<Vec<T>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot application. Returns `false` once the
    /// backing subscription is gone; the view then stays at its last value.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Owns the single-subscription discipline: at most one live subscription
/// per collection path. Opening a path already held tears the previous
/// subscription down first; dropping the engine tears down everything.
pub struct SyncEngine {
    store: Arc<dyn UserStore>,
    slots: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.store)
    }

    /// Open (or replace) the subscription for `path` and return a live
    /// view over it. Deliveries are applied strictly in receipt order.
    pub fn open<T: Materialize>(
        &self,
        path: &CollectionPath,
        order: SnapshotOrder,
    ) -> CollectionSync<T> {
        // Tear down the previous owner of this slot before subscribing.
        self.close(path);

        let mut stream = self.store.subscribe(path, order);
        let (tx, rx) = watch::channel(Arc::new(Vec::new()));
        let task_path = path.to_string();
        let handle = tokio::spawn(async move {
            while let Some(snapshot) = stream.next().await {
                let entries = materialize::<T>(&snapshot);
                if tx.send(Arc::new(entries)).is_err() {
                    // Every view is gone; nothing left to update.
                    debug!(path = %task_path, "all views dropped; stopping subscription");
                    return;
                }
            }
            // Stream ended on the store side: the view keeps its last
            // snapshot, stale but available.
            warn!(path = %task_path, "subscription stream ended");
        });

        let mut slots = self.slots.lock().unwrap();
        slots.insert(path.as_str().to_string(), handle);
        CollectionSync { rx }
    }

    /// Tear down the subscription for `path`, if one is open.
    pub fn close(&self, path: &CollectionPath) {
        let handle = {
            let mut slots = self.slots.lock().unwrap();
            slots.remove(path.as_str())
        };
        if let Some(handle) = handle {
            debug!(path = %path, "closing subscription");
            handle.abort();
        }
    }

    /// Tear down every open subscription.
    pub fn close_all(&self) {
        let handles: Vec<(String, JoinHandle<()>)> = {
            let mut slots = self.slots.lock().unwrap();
            slots.drain().collect()
        };
        for (path, handle) in handles {
            debug!(path = %path, "closing subscription");
            handle.abort();
        }
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.close_all();
    }
}
