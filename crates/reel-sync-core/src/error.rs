use reel_sync_provider::ProviderError;
use reel_sync_store::StoreError;
use thiserror::Error;

/// Failure kinds surfaced by the activity components. Remote-call failures
/// are converted at the component boundary; nothing here is fatal — the
/// worst case is a stale or empty view.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// Mutation attempted with no authenticated user. Surfaced as a
    /// sign-in prompt; not retried.
    #[error("sign in required")]
    AuthRequired,

    /// Malformed input, rejected before anything is sent to the store.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The durable store rejected or failed a write. Local state is
    /// unchanged: views only ever reflect delivered snapshots.
    #[error("store write failed: {0}")]
    RemoteWrite(#[from] StoreError),

    /// A subscription or read failed; the affected view keeps its last
    /// known snapshot.
    #[error("store read failed: {0}")]
    RemoteRead(String),

    /// A catalog call failed; the dependent section degrades to an empty
    /// result.
    #[error("catalog fetch failed: {0}")]
    ProviderFetch(#[from] ProviderError),
}

impl ActivityError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
