use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned status {status}: {body}")]
    Status { status: u16, body: String },
}
