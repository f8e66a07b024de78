//! **Speech-to-Text (STT)** — convert a chunk audio file into text.
//!
//! `OpenAiStt` uploads the file to an OpenAI-compatible transcription
//! endpoint with deterministic decoding (temperature 0) and a fixed target
//! language. `PlaceholderStt` short-circuits the network for tests and
//! `--dry-run`.

use crate::error::{SttError, SttResult};
use std::path::Path;
use tracing::debug;

/// Backend for converting a chunk audio file to text.
pub trait SttBackend: Send + Sync {
    /// Transcribe one chunk file. Returns the raw transcription text;
    /// callers trim and frame it.
    fn transcribe_file(&self, audio: &Path, language: &str) -> SttResult<String>;
}

/// Placeholder STT: returns a fixed string. Use for dry runs and for
/// exercising the pipeline without an API key.
#[derive(Debug, Default)]
pub struct PlaceholderStt {
    /// If set, return this instead of the default message.
    pub response: Option<String>,
}

impl PlaceholderStt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(s: String) -> Self {
        Self { response: Some(s) }
    }
}

impl SttBackend for PlaceholderStt {
    fn transcribe_file(&self, audio: &Path, _language: &str) -> SttResult<String> {
        if let Some(ref r) = self.response {
            return Ok(r.clone());
        }
        let name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| audio.display().to_string());
        Ok(format!(
            "[STT placeholder for {} — connect an OpenAI-compatible API key]",
            name
        ))
    }
}

/// Production STT backend: OpenAI-compatible transcription API (OpenAI
/// Whisper, gpt-4o-transcribe, OpenRouter, etc.).
/// Uses `STT_API_URL` (e.g. https://api.openai.com/v1), `OPENAI_API_KEY` or
/// `STT_API_KEY`, and `STT_MODEL` (default gpt-4o-transcribe).
#[derive(Debug, Clone)]
pub struct OpenAiStt {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Model: gpt-4o-transcribe, whisper-1, etc.
    pub model: String,
    client: reqwest::blocking::Client,
}

impl OpenAiStt {
    /// Build from environment: OPENAI_API_KEY (or STT_API_KEY), optional
    /// STT_API_URL and STT_MODEL.
    pub fn from_env() -> SttResult<Self> {
        let base_url = std::env::var("STT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("STT_API_KEY"))
            .map_err(|_| {
                SttError::Config("transcription requires OPENAI_API_KEY or STT_API_KEY".to_string())
            })?;
        let model =
            std::env::var("STT_MODEL").unwrap_or_else(|_| "gpt-4o-transcribe".to_string());
        Self::new(base_url, api_key, model)
    }

    /// Create with explicit config.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> SttResult<Self> {
        // Chunks are tens of minutes of audio; uploads can take a while.
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

impl SttBackend for OpenAiStt {
    fn transcribe_file(&self, audio: &Path, language: &str) -> SttResult<String> {
        let bytes = std::fs::read(audio)?;
        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chunk.mp3".to_string());
        let mime = mime_for(audio);
        debug!("uploading {} ({} bytes) as {}", file_name, bytes.len(), mime);

        let url = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        let part = reqwest::blocking::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", language.to_string())
            .text("temperature", "0");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().unwrap_or_default();
            return Err(SttError::Api { status, body });
        }

        let body = res.text()?;
        extract_text(&body)
            .ok_or_else(|| SttError::Response(truncate(&body, 200)))
    }
}

/// Pull transcription text out of a response body. Accepts a JSON object
/// with a `text` field, a bare JSON string, or plain text; anything else is
/// an unexpected response.
fn extract_text(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("text")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string()),
        Ok(serde_json::Value::String(s)) => Some(s),
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

fn mime_for(audio: &Path) -> &'static str {
    match audio
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
