//! # Skald — long-recording transcription pipeline
//!
//! Splits a long audio recording into time-bounded chunks at near-silent
//! boundaries, transcribes each chunk through an STT backend, and merges
//! the per-chunk text into one ordered transcript.
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌───────────┐   ┌─────────┐
//! │ ffprobe  │ → │ ffmpeg    │ → │ cut-point│ → │ ffmpeg    │ → │ STT per │
//! │ duration │   │ silences  │   │ planner  │   │ -c copy   │   │ chunk   │
//! └──────────┘   └───────────┘   └──────────┘   └───────────┘   └─────────┘
//!                                                                    ↓
//!                                                     ordered merged transcript
//! ```
//!
//! Everything runs on one thread: chunks are extracted and transcribed
//! strictly in index order, and the merged transcript is rewritten to disk
//! after every chunk so an interrupted run leaves a valid ordered prefix.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod planner;
pub mod transcript;

pub use config::RunConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{run, ChunkSpec, RunReport};
pub use planner::plan_cut_points;
pub use transcript::{ChunkTranscript, TranscriptAccumulator};
