use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Separator token that marks a file as a pipeline chunk
const CHUNK_SEPARATOR: &str = "_chunk_";

/// Window/hop configuration of the upstream chunking pipeline.
///
/// The slicer emits fixed-length overlapping windows; the chunk index maps to
/// absolute time as `start = index * hop_secs`. These values must match the
/// upstream configuration or every timestamp in the output misaligns.
#[derive(Debug, Clone, Copy)]
pub struct ChunkTiming {
    /// Window length in seconds
    pub window_secs: f64,
    /// Stride between window starts in seconds
    pub hop_secs: f64,
}

impl Default for ChunkTiming {
    fn default() -> Self {
        Self {
            window_secs: 10.0, // 10s windows
            hop_secs: 9.0,     // 1s overlap
        }
    }
}

/// A chunk discovered on disk, with its derived index and time window
#[derive(Debug, Clone)]
pub struct ChunkEntry {
    /// Path to the audio file
    pub audio_path: PathBuf,
    /// Audio filename
    pub audio_file: String,
    /// Filename stem, used as the chunk identifier
    pub chunk_id: String,
    /// Ordinal index parsed from the filename
    pub index: u32,
    /// Estimated absolute start time in seconds
    pub start_time: f64,
    /// Estimated absolute end time in seconds
    pub end_time: f64,
}

/// Extract the chunk index from a filename.
///
/// The index is the trailing `_`-delimited numeric token of the file stem
/// (e.g. `debate_chunk_001.wav` -> 1). Returns None when the trailing token
/// is missing or non-numeric.
pub fn parse_chunk_index(file_name: &str) -> Option<u32> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    stem.rsplit('_').next()?.parse().ok()
}

/// Discover chunk audio files in a directory, in filename-sorted order.
///
/// A file qualifies when its name contains the chunk separator and its
/// extension is in `audio_extensions`. Filenames whose index cannot be parsed
/// fall back to index 0 with a `[0, window)` time window rather than failing
/// the batch.
pub fn discover_chunks(
    dir: &Path,
    timing: &ChunkTiming,
    audio_extensions: &[String],
) -> Result<Vec<ChunkEntry>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read chunk directory: {:?}", dir))?;

    let mut audio_paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_chunk_audio(path, audio_extensions))
        .collect();
    audio_paths.sort();

    let chunks = audio_paths
        .into_iter()
        .map(|path| locate_chunk(path, timing))
        .collect();
    Ok(chunks)
}

fn is_chunk_audio(path: &Path, audio_extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    name.contains(CHUNK_SEPARATOR) && audio_extensions.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

fn locate_chunk(path: PathBuf, timing: &ChunkTiming) -> ChunkEntry {
    let audio_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let chunk_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let index = parse_chunk_index(&audio_file).unwrap_or_else(|| {
        warn!("No numeric chunk index in {:?}, assuming index 0", audio_file);
        0
    });

    let start_time = index as f64 * timing.hop_secs;
    ChunkEntry {
        audio_path: path,
        audio_file,
        chunk_id,
        index,
        start_time,
        end_time: start_time + timing.window_secs,
    }
}
