use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{StanceCategory, StanceResult, StanceScores};

/// One record of the batch stance file: either a scored transcription or a
/// failure marker for a file that could not be scored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StanceRecord {
    Scored(StanceEntry),
    Failed { error: String },
}

/// A successfully scored transcription file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StanceEntry {
    /// Source transcription filename
    pub file: String,
    /// The text that was scored
    pub text: String,
    pub stance_scores: StanceScores,
    pub dominant_stance: StanceCategory,
}

impl StanceEntry {
    pub fn to_result(&self) -> StanceResult {
        StanceResult {
            scores: self.stance_scores,
            dominant: self.dominant_stance,
        }
    }
}

/// Batch stance results indexed by source filename.
///
/// Failed records are dropped at load time; a chunk whose transcription only
/// appears as a failure surfaces with `has_stance = false`.
#[derive(Debug, Default)]
pub struct StanceIndex {
    entries: HashMap<String, StanceEntry>,
}

impl StanceIndex {
    /// Load a batch stance file. A missing or unreadable file yields an
    /// empty index with a log line; stance data is optional for a run.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No stance file at {:?}, chunks will carry no stance data", path);
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                warn!("Failed to read stance file {:?}: {}", path, error);
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<StanceRecord>>(&content) {
            Ok(records) => Self::from_records(records),
            Err(error) => {
                warn!("Failed to parse stance file {:?}: {}", path, error);
                Self::default()
            }
        }
    }

    /// Build the index from parsed records, excluding failures
    pub fn from_records(records: Vec<StanceRecord>) -> Self {
        let mut entries = HashMap::new();
        for record in records {
            match record {
                StanceRecord::Scored(entry) => {
                    entries.insert(entry.file.clone(), entry);
                }
                StanceRecord::Failed { error } => {
                    debug!("Excluding failed stance record: {}", error);
                }
            }
        }
        Self { entries }
    }

    /// Exact-match lookup by transcription filename; a miss is the normal
    /// case for a chunk without stance data
    pub fn get(&self, file_name: &str) -> Option<&StanceEntry> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
