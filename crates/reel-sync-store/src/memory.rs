use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::document::{
    CollectionPath, Document, DocumentKey, Snapshot, SnapshotOrder, CREATED_AT_FIELD,
};
use crate::error::StoreError;
use crate::traits::{SnapshotStream, UserStore};

struct Watcher {
    order: SnapshotOrder,
    tx: mpsc::UnboundedSender<Snapshot>,
}

#[derive(Default)]
struct CollectionState {
    // Insertion order preserved; snapshots are ordered per watcher request.
    docs: Vec<(String, Value)>,
    next_id: u64,
    watchers: Vec<Watcher>,
}

impl CollectionState {
    fn snapshot(&self, order: SnapshotOrder) -> Snapshot {
        let mut docs: Snapshot = self
            .docs
            .iter()
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        if order == SnapshotOrder::CreatedAtDesc {
            docs.sort_by(|a, b| compare_created_at_desc(&a.data, &b.data));
        }
        docs
    }

    fn notify(&mut self) {
        let unordered = self.snapshot(SnapshotOrder::Unordered);
        let mut sorted: Option<Snapshot> = None;
        // Closed receivers are unsubscribed views; drop them silently.
        self.watchers.retain(|w| {
            let snapshot = match w.order {
                SnapshotOrder::Unordered => unordered.clone(),
                SnapshotOrder::CreatedAtDesc => sorted
                    .get_or_insert_with(|| {
                        let mut s = unordered.clone();
                        s.sort_by(|a, b| compare_created_at_desc(&a.data, &b.data));
                        s
                    })
                    .clone(),
            };
            w.tx.send(snapshot).is_ok()
        });
    }
}

fn created_at(data: &Value) -> Option<DateTime<FixedOffset>> {
    data.get(CREATED_AT_FIELD)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// Newest first; documents without a parseable timestamp sort last.
fn compare_created_at_desc(a: &Value, b: &Value) -> Ordering {
    match (created_at(a), created_at(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// In-process `UserStore` with the same observable semantics as the remote
/// document store: point writes, idempotent deletes, and full-snapshot
/// delivery to every live subscriber on each change.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, CollectionState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `path`.
    pub fn len(&self, path: &CollectionPath) -> usize {
        let collections = self.collections.lock().unwrap();
        collections.get(path.as_str()).map_or(0, |c| c.docs.len())
    }

    pub fn is_empty(&self, path: &CollectionPath) -> bool {
        self.len(path) == 0
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    fn subscribe(&self, path: &CollectionPath, order: SnapshotOrder) -> SnapshotStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut collections = self.collections.lock().unwrap();
        let state = collections.entry(path.as_str().to_string()).or_default();
        // Initial snapshot first, then one per change.
        let _ = tx.send(state.snapshot(order));
        state.watchers.push(Watcher { order, tx });
        debug!(path = %path, "subscription opened");
        SnapshotStream::new(rx)
    }

    async fn put(
        &self,
        path: &CollectionPath,
        key: DocumentKey,
        data: Value,
        merge: bool,
    ) -> Result<String, StoreError> {
        if !data.is_object() {
            return Err(StoreError::InvalidDocument);
        }
        let mut collections = self.collections.lock().unwrap();
        let state = collections.entry(path.as_str().to_string()).or_default();

        let id = match key {
            DocumentKey::Assigned(id) => {
                let position = state.docs.iter().position(|(doc_id, _)| *doc_id == id);
                match position {
                    Some(i) if merge => merge_fields(&mut state.docs[i].1, &data),
                    Some(i) => state.docs[i].1 = data,
                    None => state.docs.push((id.clone(), data)),
                }
                id
            }
            DocumentKey::Generated => {
                state.next_id += 1;
                let id = format!("doc-{:06}", state.next_id);
                state.docs.push((id.clone(), data));
                id
            }
        };

        state.notify();
        Ok(id)
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let state = collections.entry(path.as_str().to_string()).or_default();
        let before = state.docs.len();
        state.docs.retain(|(doc_id, _)| doc_id != id);
        if state.docs.len() != before {
            state.notify();
        }
        Ok(())
    }
}

/// Shallow field merge: every top-level field of `patch` overwrites the
/// matching field of `target`, other fields stay.
fn merge_fields(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}
