use std::path::Path;

use tracing::{debug, warn};

use crate::models::SpeakerSegment;

/// First token of an accepted RTTM line
const RECORD_MARKER: &str = "SPEAKER";
/// Minimum field count for a line to carry start, duration, and label
const MIN_FIELDS: usize = 8;

/// Parse RTTM content into speaker segments.
///
/// Lines look like:
/// `SPEAKER <uri> <channel> <start> <duration> <NA> <NA> <label> <NA> <NA>`
///
/// Only lines starting with the record marker, carrying at least 8
/// whitespace-delimited fields, and with non-negative start and duration are
/// accepted; everything else is skipped so a partially corrupt file still
/// yields its good segments.
pub fn parse_rttm(content: &str) -> Vec<SpeakerSegment> {
    let mut segments = Vec::new();

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS || fields[0] != RECORD_MARKER {
            continue;
        }

        let (Ok(start), Ok(duration)) = (fields[3].parse::<f64>(), fields[4].parse::<f64>())
        else {
            debug!("Skipping RTTM line with non-numeric timing: {}", line);
            continue;
        };
        if start < 0.0 || duration < 0.0 {
            debug!("Skipping RTTM line with negative timing: {}", line);
            continue;
        }

        segments.push(SpeakerSegment::new(start, duration, fields[7].to_string()));
    }

    segments
}

/// Parse a per-chunk RTTM file.
///
/// An unreadable file logs a warning and yields no segments; the chunk then
/// surfaces with `has_diarization = false` instead of failing the batch.
pub fn parse_rttm_file(path: &Path) -> Vec<SpeakerSegment> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_rttm(&content),
        Err(error) => {
            warn!("Failed to read RTTM file {:?}: {}", path, error);
            vec![]
        }
    }
}
