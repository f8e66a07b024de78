//! Error types for the Skald media layer

use thiserror::Error;

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors raised by the ffmpeg/ffprobe capability layer
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("failed to launch {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },

    #[error("could not parse duration from ffprobe output: {0:?}")]
    DurationUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
