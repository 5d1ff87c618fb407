use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{AggregateStats, ChunkRecord};

/// Run-level metadata attached to the output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineMetadata {
    /// Directory the chunks were read from
    pub source_directory: String,
    /// RFC 3339 UTC timestamp of the aggregation run
    pub processed_at: String,
    pub total_chunks: usize,
}

/// The single aggregated document consumed by the dashboard.
///
/// Chunks appear in discovery (filename-sorted) order; any time-based
/// re-sorting is the consumer's concern.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineDocument {
    pub metadata: TimelineMetadata,
    pub statistics: AggregateStats,
    pub chunks: Vec<ChunkRecord>,
}

impl TimelineDocument {
    /// Write the document as pretty-printed JSON, replacing any previous run
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
