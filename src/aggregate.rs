use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::io::{
    discover_chunks, parse_rttm_file, ChunkEntry, ChunkTiming, StanceIndex, TimelineDocument,
    TimelineMetadata,
};
use crate::models::{AggregateStats, ChunkRecord};

/// Configuration for one aggregation run
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Window/hop of the upstream chunking pipeline
    pub timing: ChunkTiming,
    /// Extensions accepted as chunk audio files
    pub audio_extensions: Vec<String>,
    /// Name of the batch stance file within the chunk directory
    pub stance_file: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            timing: ChunkTiming::default(),
            audio_extensions: vec!["wav".to_string()],
            stance_file: "stance_analysis.json".to_string(),
        }
    }
}

/// Fatal aggregation failures. Per-chunk problems degrade presence flags
/// instead of landing here.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no audio chunks found in {0:?} (expected *_chunk_<N> audio files)")]
    NoChunks(PathBuf),
}

/// Build the full timeline document for a chunk directory.
///
/// One record per discovered chunk, in discovery order, each merged from the
/// chunk's transcript, diarization, and stance artifacts where present. A
/// directory with no discoverable chunks is an error; a chunk missing any
/// individual artifact is not.
pub fn aggregate_directory(dir: &Path, config: &AggregateConfig) -> Result<TimelineDocument> {
    let entries = discover_chunks(dir, &config.timing, &config.audio_extensions)?;
    if entries.is_empty() {
        return Err(AggregateError::NoChunks(dir.to_path_buf()).into());
    }
    info!("Found {} chunks in {:?}", entries.len(), dir);

    let stance_index = StanceIndex::load(&dir.join(&config.stance_file));
    if !stance_index.is_empty() {
        info!("Loaded {} stance results", stance_index.len());
    }

    let chunks: Vec<ChunkRecord> = entries
        .into_iter()
        .map(|entry| build_chunk(entry, &stance_index))
        .collect();

    let statistics = AggregateStats::from_chunks(&chunks);
    Ok(TimelineDocument {
        metadata: TimelineMetadata {
            source_directory: dir.to_string_lossy().into_owned(),
            processed_at: Utc::now().to_rfc3339(),
            total_chunks: chunks.len(),
        },
        statistics,
        chunks,
    })
}

/// Merge one chunk's artifacts into a record. Missing artifacts degrade the
/// corresponding presence flag; nothing here aborts the batch.
fn build_chunk(entry: ChunkEntry, stance_index: &StanceIndex) -> ChunkRecord {
    let txt_path = entry.audio_path.with_extension("txt");
    let transcription = match std::fs::read_to_string(&txt_path) {
        Ok(text) => text.trim().to_string(),
        Err(error) => {
            debug!("No transcription for {}: {}", entry.chunk_id, error);
            String::new()
        }
    };

    let rttm_path = entry.audio_path.with_extension("rttm");
    let speaker_segments = if rttm_path.exists() {
        parse_rttm_file(&rttm_path)
    } else {
        debug!("No diarization for {}", entry.chunk_id);
        vec![]
    };

    // Stance results are keyed by the transcription filename
    let txt_name = txt_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stance = stance_index.get(txt_name).map(|entry| entry.to_result());

    ChunkRecord::assemble(
        entry.chunk_id,
        entry.audio_file,
        entry.index,
        entry.start_time,
        entry.end_time,
        transcription,
        speaker_segments,
        stance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StanceCategory;

    const STANCE_JSON: &str = r#"[
        {
            "file": "d_chunk_001.txt",
            "text": "hello world",
            "stance_scores": {"liberal": 0.5, "conservative": 0.3, "moderate": 0.2},
            "dominant_stance": "liberal"
        }
    ]"#;

    fn setup_three_chunks() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["d_chunk_000.wav", "d_chunk_001.wav", "d_chunk_002.wav"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(dir.path().join("d_chunk_001.txt"), "hello world").unwrap();
        std::fs::write(dir.path().join("stance_analysis.json"), STANCE_JSON).unwrap();
        dir
    }

    #[test]
    fn test_three_chunk_timeline() {
        let dir = setup_three_chunks();
        let document = aggregate_directory(dir.path(), &AggregateConfig::default()).unwrap();

        assert_eq!(document.statistics.total_chunks, 3);
        assert_eq!(document.statistics.total_duration, 28.0);
        assert_eq!(document.metadata.total_chunks, 3);

        let middle = &document.chunks[1];
        assert_eq!(middle.chunk_index, 1);
        assert_eq!(middle.start_time, 9.0);
        assert_eq!(middle.end_time, 19.0);
        assert!(middle.has_transcription);
        assert_eq!(middle.transcription, "hello world");
        assert!(middle.has_stance);
        assert_eq!(
            middle.stance.as_ref().unwrap().dominant,
            StanceCategory::Liberal
        );

        for chunk in [&document.chunks[0], &document.chunks[2]] {
            assert!(!chunk.has_transcription);
            assert!(!chunk.has_diarization);
            assert!(!chunk.has_stance);
            assert!(chunk.transcription.is_empty());
            assert!(chunk.speaker_segments.is_empty());
            assert!(chunk.stance.is_none());
        }
    }

    #[test]
    fn test_diarization_merge() {
        let dir = setup_three_chunks();
        std::fs::write(
            dir.path().join("d_chunk_000.rttm"),
            "SPEAKER d_chunk_000 1 0.5 2.0 <NA> <NA> SPEAKER_01 <NA> <NA>\n",
        )
        .unwrap();

        let document = aggregate_directory(dir.path(), &AggregateConfig::default()).unwrap();
        let first = &document.chunks[0];
        assert!(first.has_diarization);
        assert_eq!(first.speaker_segments.len(), 1);
        assert_eq!(document.statistics.speakers, vec!["SPEAKER_01"]);
        assert_eq!(document.statistics.chunks_with_diarization, 1);
    }

    #[test]
    fn test_zero_chunks_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "no audio here").unwrap();

        let error = aggregate_directory(dir.path(), &AggregateConfig::default()).unwrap_err();
        assert!(error.downcast_ref::<AggregateError>().is_some());
    }

    #[test]
    fn test_missing_stance_file_degrades_quietly() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("d_chunk_000.wav"), b"").unwrap();

        let document = aggregate_directory(dir.path(), &AggregateConfig::default()).unwrap();
        assert_eq!(document.statistics.chunks_with_stance, 0);
        assert!(!document.chunks[0].has_stance);
    }

    #[test]
    fn test_custom_timing_flows_through() {
        let dir = setup_three_chunks();
        let config = AggregateConfig {
            timing: ChunkTiming {
                window_secs: 5.0,
                hop_secs: 4.0,
            },
            ..AggregateConfig::default()
        };

        let document = aggregate_directory(dir.path(), &config).unwrap();
        assert_eq!(document.chunks[2].start_time, 8.0);
        assert_eq!(document.chunks[2].end_time, 13.0);
        assert_eq!(document.statistics.total_duration, 13.0);
    }

    #[test]
    fn test_idempotent_output() {
        let dir = setup_three_chunks();
        let config = AggregateConfig::default();
        let first = aggregate_directory(dir.path(), &config).unwrap();
        let second = aggregate_directory(dir.path(), &config).unwrap();

        // Everything except processed_at must be byte-identical
        assert_eq!(
            serde_json::to_string(&first.chunks).unwrap(),
            serde_json::to_string(&second.chunks).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first.statistics).unwrap(),
            serde_json::to_string(&second.statistics).unwrap()
        );
    }
}
