//! # Skald STT — speech-to-text backends
//!
//! Implement [`SttBackend`] for any service that turns a chunk audio file
//! into text. `OpenAiStt` speaks the OpenAI-compatible
//! `/audio/transcriptions` multipart API (OpenAI, OpenRouter, local
//! gateways); `PlaceholderStt` returns canned text for dry runs and tests.

pub mod error;
pub mod stt;

pub use error::{SttError, SttResult};
pub use stt::{OpenAiStt, PlaceholderStt, SttBackend};
