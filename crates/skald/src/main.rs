//! Skald CLI: split a long recording at silences, transcribe, merge.
//!
//! Usage:
//!   skald <input.mp3> [--output transcript_merged.txt] [--work-dir chunks]
//!         [--max-chunk 1200] [--window 180] [--noise-floor -36]
//!         [--min-silence 0.7] [--language nl] [--model gpt-4o-transcribe]
//!         [--keep-chunks] [--dry-run]
//!
//! Reads OPENAI_API_KEY (or STT_API_KEY) from the environment or a .env
//! file. `--dry-run` runs the whole pipeline with a placeholder STT.

use skald::{pipeline, RunConfig};
use skald_media::FfmpegEngine;
use skald_stt::{OpenAiStt, PlaceholderStt, SttBackend};
use std::path::PathBuf;
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut work_dir: Option<PathBuf> = None;
    let mut max_chunk: Option<f64> = None;
    let mut window: Option<f64> = None;
    let mut noise_floor: Option<f64> = None;
    let mut min_silence: Option<f64> = None;
    let mut language: Option<String> = None;
    let mut model: Option<String> = None;
    let mut keep_chunks = false;
    let mut dry_run = false;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--input" | "-i" => input = args.next().map(PathBuf::from),
            "--output" | "-o" => output = args.next().map(PathBuf::from),
            "--work-dir" => work_dir = args.next().map(PathBuf::from),
            "--max-chunk" => max_chunk = args.next().and_then(|v| v.parse().ok()),
            "--window" => window = args.next().and_then(|v| v.parse().ok()),
            "--noise-floor" => noise_floor = args.next().and_then(|v| v.parse().ok()),
            "--min-silence" => min_silence = args.next().and_then(|v| v.parse().ok()),
            "--language" => language = args.next(),
            "--model" => model = args.next(),
            "--keep-chunks" => keep_chunks = true,
            "--dry-run" => dry_run = true,
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            _ => {}
        }
    }

    let Some(input) = input else {
        eprintln!("Skald — long-recording transcription");
        eprintln!("  skald <input audio file> [options]");
        eprintln!();
        eprintln!("  --output PATH       Merged transcript (default transcript_merged.txt)");
        eprintln!("  --work-dir PATH     Chunk directory (default chunks/)");
        eprintln!("  --max-chunk SECS    Max chunk length (default 1200)");
        eprintln!("  --window SECS       ± silence search radius (default 180)");
        eprintln!("  --noise-floor DB    Silence threshold (default -36)");
        eprintln!("  --min-silence SECS  Minimum silence run (default 0.7)");
        eprintln!("  --language CODE     Transcription language (default nl)");
        eprintln!("  --model NAME        STT model (default gpt-4o-transcribe)");
        eprintln!("  --keep-chunks       Keep chunk files after the run");
        eprintln!("  --dry-run           Use the placeholder STT (no API key needed)");
        eprintln!();
        eprintln!("Requires OPENAI_API_KEY (or STT_API_KEY) unless --dry-run.");
        return Ok(());
    };

    let mut config = RunConfig::for_input(input);
    if let Some(v) = output {
        config.output = v;
    }
    if let Some(v) = work_dir {
        config.work_dir = v;
    }
    if let Some(v) = max_chunk {
        config.max_chunk_secs = v;
    }
    if let Some(v) = window {
        config.silence_window_secs = v;
    }
    if let Some(v) = noise_floor {
        config.noise_floor_db = v;
    }
    if let Some(v) = min_silence {
        config.min_silence_secs = v;
    }
    if let Some(v) = language {
        config.language = v;
    }
    config.keep_chunks = keep_chunks;

    let media = FfmpegEngine::from_env();
    let stt: Box<dyn SttBackend> = if dry_run {
        Box::new(PlaceholderStt::new())
    } else {
        let mut stt = OpenAiStt::from_env()?;
        if let Some(m) = model {
            stt.model = m;
        }
        Box::new(stt)
    };

    match pipeline::run(&config, &media, stt.as_ref()) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("❌ run failed: {e}");
            std::process::exit(1);
        }
    }
}
