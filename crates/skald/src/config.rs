//! Run configuration: chunking parameters, paths, language.

use std::path::PathBuf;

/// Upper bound per chunk, seconds.
pub const DEFAULT_MAX_CHUNK_SECS: f64 = 1200.0;
/// ± search radius around each target cut, seconds.
pub const DEFAULT_SILENCE_WINDOW_SECS: f64 = 180.0;
/// Silence-detection noise floor, dB.
pub const DEFAULT_NOISE_FLOOR_DB: f64 = -36.0;
/// Minimum silence run length that counts as an onset, seconds.
pub const DEFAULT_MIN_SILENCE_SECS: f64 = 0.7;
/// Transcription language hint.
pub const DEFAULT_LANGUAGE: &str = "nl";
/// Merged transcript output path.
pub const DEFAULT_OUTPUT: &str = "transcript_merged.txt";
/// Directory for intermediate chunk files.
pub const DEFAULT_WORK_DIR: &str = "chunks";

/// One run's settings. Fields are plain data; main fills them from CLI
/// flags, tests construct them directly.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input audio file.
    pub input: PathBuf,
    /// Merged transcript destination.
    pub output: PathBuf,
    /// Directory for chunk files (created if missing).
    pub work_dir: PathBuf,
    pub max_chunk_secs: f64,
    pub silence_window_secs: f64,
    pub noise_floor_db: f64,
    pub min_silence_secs: f64,
    pub language: String,
    /// Retain chunk files after a successful run.
    pub keep_chunks: bool,
}

impl RunConfig {
    /// Defaults from the classic podcast workflow: 20-minute chunks, ±3
    /// minute silence search, -36 dB floor, 0.7 s minimum silence.
    pub fn for_input(input: PathBuf) -> Self {
        Self {
            input,
            output: PathBuf::from(DEFAULT_OUTPUT),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            max_chunk_secs: DEFAULT_MAX_CHUNK_SECS,
            silence_window_secs: DEFAULT_SILENCE_WINDOW_SECS,
            noise_floor_db: DEFAULT_NOISE_FLOOR_DB,
            min_silence_secs: DEFAULT_MIN_SILENCE_SECS,
            language: DEFAULT_LANGUAGE.to_string(),
            keep_chunks: false,
        }
    }

    /// Check the chunking knobs before a run starts. The planner needs a
    /// positive chunk length and a search window narrower than it to keep
    /// its walk moving forward, so out-of-range flags are rejected here
    /// instead of surfacing as degenerate chunk layouts.
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_chunk_secs.is_finite() || self.max_chunk_secs <= 0.0 {
            return Err(format!(
                "--max-chunk must be a positive number of seconds, got {}",
                self.max_chunk_secs
            ));
        }
        if !self.silence_window_secs.is_finite() || self.silence_window_secs < 0.0 {
            return Err(format!(
                "--window must be a non-negative number of seconds, got {}",
                self.silence_window_secs
            ));
        }
        if self.silence_window_secs >= self.max_chunk_secs {
            return Err(format!(
                "--window ({}) must be smaller than --max-chunk ({})",
                self.silence_window_secs, self.max_chunk_secs
            ));
        }
        if !self.min_silence_secs.is_finite() || self.min_silence_secs <= 0.0 {
            return Err(format!(
                "--min-silence must be a positive number of seconds, got {}",
                self.min_silence_secs
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RunConfig::for_input(PathBuf::from("in.mp3"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_max_chunk() {
        let mut config = RunConfig::for_input(PathBuf::from("in.mp3"));
        config.max_chunk_secs = 0.0;
        assert!(config.validate().is_err());
        config.max_chunk_secs = -100.0;
        assert!(config.validate().is_err());
        config.max_chunk_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_window_at_or_above_max_chunk() {
        let mut config = RunConfig::for_input(PathBuf::from("in.mp3"));
        config.max_chunk_secs = 100.0;
        config.silence_window_secs = 1300.0;
        assert!(config.validate().is_err());
        config.silence_window_secs = 100.0;
        assert!(config.validate().is_err());
        config.silence_window_secs = 99.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_negative_window_and_min_silence() {
        let mut config = RunConfig::for_input(PathBuf::from("in.mp3"));
        config.silence_window_secs = -1.0;
        assert!(config.validate().is_err());

        let mut config = RunConfig::for_input(PathBuf::from("in.mp3"));
        config.min_silence_secs = 0.0;
        assert!(config.validate().is_err());
    }
}
