//! Error types for the Skald STT backends

use thiserror::Error;

/// Result type alias for STT operations
pub type SttResult<T> = Result<T, SttError>;

/// Errors raised while transcribing a chunk
#[derive(Error, Debug)]
pub enum SttError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transcription API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected transcription response: {0}")]
    Response(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
