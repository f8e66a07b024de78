//! Error types for the Skald run pipeline

use skald_media::MediaError;
use skald_stt::SttError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal run errors. Every stage failure aborts the run; the transcript on
/// disk still reflects all chunks completed before the failing one.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("duration probe failed: {0}")]
    Duration(#[source] MediaError),

    #[error("silence detection failed: {0}")]
    SilenceScan(#[source] MediaError),

    #[error("extraction of chunk {index} failed: {source}")]
    ChunkExtraction {
        index: usize,
        #[source]
        source: MediaError,
    },

    #[error("transcription of chunk {index} failed: {source}")]
    Transcription {
        index: usize,
        #[source]
        source: SttError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}
