//! Ordered transcript accumulation and crash-safe persistence.
//!
//! The accumulator only grows, in chunk order. After every completed chunk
//! the full rendering is written to a temp file and renamed over the
//! target, so the file on disk is always a valid ordered prefix of the
//! final transcript.

use serde::Serialize;
use skald_media::format_timecode;
use std::fs;
use std::io;
use std::path::Path;

/// One chunk's transcript: 1-based index, time-range header, trimmed body.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkTranscript {
    pub index: usize,
    pub header: String,
    pub body: String,
}

impl ChunkTranscript {
    pub fn new(index: usize, start: f64, end: f64, text: &str) -> Self {
        let header = format!(
            "Part {} ({} - {})",
            index,
            format_timecode(start),
            format_timecode(end)
        );
        Self {
            index,
            header,
            body: text.trim().to_string(),
        }
    }

    fn render(&self) -> String {
        format!("{}\n\n{}\n", self.header, self.body)
    }
}

/// Append-only collection of chunk transcripts, merged in chunk order.
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    parts: Vec<ChunkTranscript>,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next chunk's transcript. Chunks must arrive in index
    /// order; the pipeline transcribes them sequentially so they do.
    pub fn push(&mut self, part: ChunkTranscript) {
        debug_assert!(
            self.parts.last().map_or(true, |p| part.index > p.index),
            "chunk transcripts must be appended in index order"
        );
        self.parts.push(part);
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Full merged text: parts in chunk order, separated by blank lines.
    pub fn render(&self) -> String {
        self.parts
            .iter()
            .map(ChunkTranscript::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rewrite the whole transcript at `path` (temp file + rename, so a
    /// reader never observes a torn write).
    pub fn persist(&self, path: &Path) -> io::Result<()> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, self.render())?;
        fs::rename(&tmp, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(index: usize, text: &str) -> ChunkTranscript {
        let start = (index - 1) as f64 * 1200.0;
        ChunkTranscript::new(index, start, start + 1200.0, text)
    }

    #[test]
    fn header_embeds_index_and_timecodes() {
        let p = ChunkTranscript::new(2, 1150.0, 2350.0, "  hallo daar  ");
        assert_eq!(p.header, "Part 2 (00:19:10 - 00:39:10)");
        assert_eq!(p.body, "hallo daar");
    }

    #[test]
    fn render_orders_parts_by_chunk_index() {
        let mut acc = TranscriptAccumulator::new();
        acc.push(part(1, "eerste"));
        acc.push(part(2, "tweede"));
        acc.push(part(3, "derde"));

        let merged = acc.render();
        let first = merged.find("Part 1").unwrap();
        let second = merged.find("Part 2").unwrap();
        let third = merged.find("Part 3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn parts_are_separated_by_blank_lines() {
        let mut acc = TranscriptAccumulator::new();
        acc.push(part(1, "een"));
        acc.push(part(2, "twee"));
        assert!(acc.render().contains("een\n\nPart 2"));
    }

    #[test]
    fn persisted_file_is_always_a_valid_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcript_merged.txt");
        let mut acc = TranscriptAccumulator::new();

        acc.push(part(1, "eerste stuk"));
        acc.persist(&out).unwrap();
        let after_one = fs::read_to_string(&out).unwrap();
        assert!(after_one.contains("eerste stuk"));
        assert!(!after_one.contains("tweede stuk"));

        acc.push(part(2, "tweede stuk"));
        acc.persist(&out).unwrap();
        let after_two = fs::read_to_string(&out).unwrap();
        assert!(after_two.starts_with(&after_one));
        assert!(after_two.contains("tweede stuk"));
    }

    #[test]
    fn persist_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcript_merged.txt");
        fs::write(&out, "stale content from an older run").unwrap();

        let mut acc = TranscriptAccumulator::new();
        acc.push(part(1, "vers"));
        acc.persist(&out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text, acc.render());
    }

    #[test]
    fn empty_accumulator_persists_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcript_merged.txt");
        TranscriptAccumulator::new().persist(&out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }
}
