pub mod document;
pub mod error;
pub mod memory;
pub mod traits;

pub use document::{CollectionPath, Document, DocumentKey, Snapshot, SnapshotOrder};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{SnapshotStream, UserStore};
