use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ChunkRecord, StanceCategory};

/// Count of chunks per dominant stance category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceDistribution {
    pub liberal: usize,
    pub conservative: usize,
    pub moderate: usize,
}

impl StanceDistribution {
    pub fn increment(&mut self, category: StanceCategory) {
        match category {
            StanceCategory::Liberal => self.liberal += 1,
            StanceCategory::Conservative => self.conservative += 1,
            StanceCategory::Moderate => self.moderate += 1,
        }
    }
}

/// Batch-level summary, recomputed from scratch on every run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_chunks: usize,
    /// Maximum chunk end time in seconds, 0 when there are no chunks
    pub total_duration: f64,
    pub chunks_with_transcription: usize,
    pub chunks_with_diarization: usize,
    pub chunks_with_stance: usize,
    pub stance_distribution: StanceDistribution,
    /// Sorted distinct speaker labels across all chunks
    pub speakers: Vec<String>,
    pub speaker_count: usize,
    /// Sum of transcription lengths in characters
    pub total_text_length: usize,
}

impl AggregateStats {
    /// Compute statistics in one pass over the finished chunk sequence
    pub fn from_chunks(chunks: &[ChunkRecord]) -> Self {
        let mut stats = Self {
            total_chunks: chunks.len(),
            total_duration: 0.0,
            chunks_with_transcription: 0,
            chunks_with_diarization: 0,
            chunks_with_stance: 0,
            stance_distribution: StanceDistribution::default(),
            speakers: vec![],
            speaker_count: 0,
            total_text_length: 0,
        };

        let mut speakers = BTreeSet::new();

        for chunk in chunks {
            stats.total_duration = stats.total_duration.max(chunk.end_time);

            if chunk.has_transcription {
                stats.chunks_with_transcription += 1;
            }
            if chunk.has_diarization {
                stats.chunks_with_diarization += 1;
            }
            if let Some(stance) = &chunk.stance {
                stats.chunks_with_stance += 1;
                stats.stance_distribution.increment(stance.dominant);
            }

            for segment in &chunk.speaker_segments {
                speakers.insert(segment.speaker.clone());
            }

            stats.total_text_length += chunk.transcription.chars().count();
        }

        stats.speakers = speakers.into_iter().collect();
        stats.speaker_count = stats.speakers.len();
        stats
    }
}
