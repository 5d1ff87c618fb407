use serde::{Deserialize, Serialize};

use super::StanceResult;

/// One contiguous speaking interval within a chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start time in seconds, relative to the chunk
    pub start_time: f64,
    /// Duration in seconds
    pub duration: f64,
    /// End time in seconds (always start + duration)
    pub end_time: f64,
    /// Speaker label as emitted by the diarization model. The same label in
    /// different chunks is assumed to denote the same speaker.
    pub speaker: String,
}

impl SpeakerSegment {
    pub fn new(start_time: f64, duration: f64, speaker: String) -> Self {
        Self {
            start_time,
            duration,
            end_time: start_time + duration,
            speaker,
        }
    }
}

/// One fixed-length audio segment with everything known about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Filename stem, unique within a batch
    pub chunk_id: String,
    /// Original audio filename
    pub audio_file: String,
    /// Ordinal position derived from the filename
    pub chunk_index: u32,
    /// Estimated absolute start time in seconds
    pub start_time: f64,
    /// Estimated absolute end time in seconds
    pub end_time: f64,
    /// Transcribed text, empty when no transcript artifact exists
    pub transcription: String,
    /// Speaker intervals in file order
    pub speaker_segments: Vec<SpeakerSegment>,
    /// Stance classification, absent when the chunk was not scored
    pub stance: Option<StanceResult>,
    pub has_transcription: bool,
    pub has_diarization: bool,
    pub has_stance: bool,
}

impl ChunkRecord {
    /// Assemble a record from its parts. The presence flags are derived here
    /// and nowhere else, so they always agree with the payload fields.
    pub fn assemble(
        chunk_id: String,
        audio_file: String,
        chunk_index: u32,
        start_time: f64,
        end_time: f64,
        transcription: String,
        speaker_segments: Vec<SpeakerSegment>,
        stance: Option<StanceResult>,
    ) -> Self {
        let has_transcription = !transcription.is_empty();
        let has_diarization = !speaker_segments.is_empty();
        let has_stance = stance.is_some();
        Self {
            chunk_id,
            audio_file,
            chunk_index,
            start_time,
            end_time,
            transcription,
            speaker_segments,
            stance,
            has_transcription,
            has_diarization,
            has_stance,
        }
    }

    /// Duration of this chunk in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
