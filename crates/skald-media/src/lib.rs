//! # Skald Media — external media capabilities
//!
//! Wraps the ffmpeg/ffprobe command-line tools behind the [`MediaEngine`]
//! trait: duration probing, silence-onset detection, and lossless range
//! extraction. The pipeline never touches the tools directly; it only sees
//! the trait, so tests can substitute an in-memory engine.

pub mod engine;
pub mod error;
pub mod timecode;

pub use engine::{FfmpegEngine, MediaEngine};
pub use error::{MediaError, MediaResult};
pub use timecode::format_timecode;
