//! Media engine: duration probing, silence detection, range extraction.
//!
//! `FfmpegEngine` shells out to ffprobe/ffmpeg. Overridable via
//! `FFMPEG_PATH` / `FFPROBE_PATH`; defaults to the plain names on PATH.

use crate::error::{MediaError, MediaResult};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Capability seam over the external media tooling. The run pipeline only
/// depends on this trait; `FfmpegEngine` is the production implementation.
pub trait MediaEngine: Send + Sync {
    /// Total duration of the asset in seconds.
    fn probe_duration(&self, asset: &Path) -> MediaResult<f64>;

    /// Silence-onset timestamps (seconds, ascending). An empty result means
    /// no silence was detected and is not an error.
    fn detect_silences(
        &self,
        asset: &Path,
        noise_floor_db: f64,
        min_silence_secs: f64,
    ) -> MediaResult<Vec<f64>>;

    /// Losslessly copy `[start, end]` of the asset into a standalone file.
    fn extract_range(&self, asset: &Path, start: f64, end: f64, out: &Path) -> MediaResult<()>;
}

/// ffprobe/ffmpeg subprocess implementation of [`MediaEngine`].
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl FfmpegEngine {
    /// Build from environment: `FFMPEG_PATH` and `FFPROBE_PATH` override the
    /// binary names; otherwise both are resolved from PATH.
    pub fn from_env() -> Self {
        let ffmpeg = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());
        let ffprobe = std::env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string());
        Self { ffmpeg, ffprobe }
    }

    fn run(&self, tool: &str, cmd: &mut Command) -> MediaResult<Output> {
        debug!("running {:?}", cmd);
        cmd.output().map_err(|e| MediaError::ToolSpawn {
            tool: tool.to_string(),
            source: e,
        })
    }
}

impl MediaEngine for FfmpegEngine {
    fn probe_duration(&self, asset: &Path) -> MediaResult<f64> {
        let mut cmd = Command::new(&self.ffprobe);
        cmd.arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("csv=p=0")
            .arg(asset);

        let output = self.run(&self.ffprobe, &mut cmd)?;
        if !output.status.success() {
            return Err(MediaError::ToolFailed {
                tool: self.ffprobe.clone(),
                detail: stderr_tail(&output.stderr),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let raw = raw.trim();
        raw.parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| MediaError::DurationUnavailable(raw.to_string()))
    }

    fn detect_silences(
        &self,
        asset: &Path,
        noise_floor_db: f64,
        min_silence_secs: f64,
    ) -> MediaResult<Vec<f64>> {
        let filter = format!("silencedetect=noise={}dB:d={}", noise_floor_db, min_silence_secs);
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-i")
            .arg(asset)
            .arg("-af")
            .arg(&filter)
            .arg("-f")
            .arg("null")
            .arg("-");

        let output = self.run(&self.ffmpeg, &mut cmd)?;
        if !output.status.success() {
            return Err(MediaError::ToolFailed {
                tool: self.ffmpeg.clone(),
                detail: stderr_tail(&output.stderr),
            });
        }

        // silencedetect logs to stderr, one marker line per silence run.
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(parse_silence_onsets(&stderr))
    }

    fn extract_range(&self, asset: &Path, start: f64, end: f64, out: &Path) -> MediaResult<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-y")
            .arg("-i")
            .arg(asset)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-to")
            .arg(end.to_string())
            .arg("-c")
            .arg("copy")
            .arg(out);

        let output = self.run(&self.ffmpeg, &mut cmd)?;
        if !output.status.success() {
            return Err(MediaError::ToolFailed {
                tool: self.ffmpeg.clone(),
                detail: stderr_tail(&output.stderr),
            });
        }
        Ok(())
    }
}

/// Scan diagnostic text for `silence_start: T` markers and return the parsed
/// onsets sorted ascending. Lines that fail to parse are skipped; zero
/// parseable markers degrades to an empty list rather than an error.
pub fn parse_silence_onsets(diagnostics: &str) -> Vec<f64> {
    const MARKER: &str = "silence_start:";

    let mut onsets: Vec<f64> = diagnostics
        .lines()
        .filter_map(|line| {
            let idx = line.find(MARKER)?;
            let rest = &line[idx + MARKER.len()..];
            let token = rest.split_whitespace().next()?;
            token.parse::<f64>().ok()
        })
        .filter(|t| t.is_finite() && *t >= 0.0)
        .collect();

    onsets.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    onsets
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = lines.len().saturating_sub(5);
    lines[tail..].join(" | ")
}
