//! Run pipeline: probe → detect silences → plan → extract → transcribe →
//! merge, all sequential on one thread.
//!
//! Extraction and transcription are deliberately serialized: extraction
//! order feeds transcript order, a failure names exactly one chunk index,
//! and only one chunk's audio is in flight at a time.

use crate::config::RunConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::planner::plan_cut_points;
use crate::transcript::{ChunkTranscript, TranscriptAccumulator};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skald_media::{format_timecode, MediaEngine};
use skald_stt::SttBackend;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// One chunk to extract and transcribe: 1-based index, time range, file.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSpec {
    pub index: usize,
    pub start_secs: f64,
    pub end_secs: f64,
    pub path: PathBuf,
}

/// Durable record of a completed run, written as JSON next to the
/// transcript.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub duration_secs: f64,
    pub silence_onsets: usize,
    pub cut_points: Vec<f64>,
    pub chunks: Vec<ChunkSpec>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Execute one full run. Every stage failure is fatal; the transcript file
/// already reflects all chunks completed before the failing one.
pub fn run(
    config: &RunConfig,
    media: &dyn MediaEngine,
    stt: &dyn SttBackend,
) -> PipelineResult<RunReport> {
    config.validate().map_err(PipelineError::Config)?;
    if !config.input.exists() {
        return Err(PipelineError::InputNotFound(config.input.clone()));
    }

    let run_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();

    info!("⏱  probing duration of {}", config.input.display());
    let duration = media
        .probe_duration(&config.input)
        .map_err(PipelineError::Duration)?;
    info!(
        "total duration: {:.1}s ({})",
        duration,
        format_timecode(duration)
    );

    info!(
        "🔎 detecting silences (noise floor {} dB, min {}s) — this can take a while",
        config.noise_floor_db, config.min_silence_secs
    );
    let silences = media
        .detect_silences(&config.input, config.noise_floor_db, config.min_silence_secs)
        .map_err(PipelineError::SilenceScan)?;
    if silences.is_empty() {
        warn!("no silences detected; every cut will land on its raw target");
    } else {
        info!("found {} silence onsets", silences.len());
    }

    let cut_points = plan_cut_points(
        duration,
        &silences,
        config.max_chunk_secs,
        config.silence_window_secs,
    );
    info!(
        "cut points: {}",
        cut_points
            .iter()
            .map(|c| format_timecode(*c))
            .collect::<Vec<_>>()
            .join(" | ")
    );

    fs::create_dir_all(&config.work_dir)?;
    let chunks = chunk_specs(&cut_points, config);

    for chunk in &chunks {
        info!(
            "🎬 extracting chunk {}/{}: {} - {} -> {}",
            chunk.index,
            chunks.len(),
            format_timecode(chunk.start_secs),
            format_timecode(chunk.end_secs),
            chunk.path.display()
        );
        media
            .extract_range(&config.input, chunk.start_secs, chunk.end_secs, &chunk.path)
            .map_err(|e| PipelineError::ChunkExtraction {
                index: chunk.index,
                source: e,
            })?;
    }

    // The transcript exists (empty) from the start of transcription, and is
    // fully rewritten after each chunk so interruption leaves a valid
    // ordered prefix on disk.
    let mut merged = TranscriptAccumulator::new();
    merged.persist(&config.output)?;

    for chunk in &chunks {
        info!(
            "🔊 transcribing chunk {}/{} ({} - {})",
            chunk.index,
            chunks.len(),
            format_timecode(chunk.start_secs),
            format_timecode(chunk.end_secs)
        );
        let text = stt
            .transcribe_file(&chunk.path, &config.language)
            .map_err(|e| PipelineError::Transcription {
                index: chunk.index,
                source: e,
            })?;
        merged.push(ChunkTranscript::new(
            chunk.index,
            chunk.start_secs,
            chunk.end_secs,
            &text,
        ));
        merged.persist(&config.output)?;
    }

    if !config.keep_chunks {
        for chunk in &chunks {
            if let Err(e) = fs::remove_file(&chunk.path) {
                warn!("could not remove {}: {}", chunk.path.display(), e);
            }
        }
    }

    let report = RunReport {
        run_id,
        input: config.input.clone(),
        output: config.output.clone(),
        duration_secs: duration,
        silence_onsets: silences.len(),
        cut_points,
        chunks,
        started_at,
        finished_at: Utc::now(),
    };
    let manifest_path = config.output.with_extension("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&report)?)?;

    info!(
        "✅ done: {} chunks merged into {}",
        report.chunks.len(),
        config.output.display()
    );
    Ok(report)
}

/// Derive chunk specs from adjacent cut-point pairs. Chunk files inherit
/// the input's extension and are numbered from 1.
fn chunk_specs(cut_points: &[f64], config: &RunConfig) -> Vec<ChunkSpec> {
    let ext = config
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp3");
    cut_points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| ChunkSpec {
            index: i + 1,
            start_secs: pair[0],
            end_secs: pair[1],
            path: config.work_dir.join(format!("chunk_{}.{}", i + 1, ext)),
        })
        .collect()
}
