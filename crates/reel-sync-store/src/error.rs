use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("write to {path} rejected: {reason}")]
    WriteRejected { path: String, reason: String },

    #[error("read from {path} failed: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("document body must be a JSON object")]
    InvalidDocument,
}
