use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::{StanceEntry, StanceRecord};
use crate::models::{StanceCategory, StanceResult, StanceScores};

use super::{Embedder, ReferenceSet};

/// Scores text against per-category reference embeddings.
///
/// Reference vectors are the arithmetic mean of each category's statement
/// embeddings, computed once at construction and immutable for the scorer's
/// lifetime. Every `score` call embeds only the input text.
pub struct StanceScorer<E: Embedder> {
    embedder: E,
    reference_vectors: [Vec<f32>; 3],
}

impl<E: Embedder> StanceScorer<E> {
    pub fn new(embedder: E, references: &ReferenceSet) -> Self {
        let reference_vectors = StanceCategory::ALL
            .map(|category| mean_embedding(&embedder, references.statements(category)));
        Self {
            embedder,
            reference_vectors,
        }
    }

    /// Score a text into a normalized 3-way distribution.
    ///
    /// Empty or whitespace-only text yields all zeros, as does any input
    /// whose raw similarities do not sum to a positive value. Otherwise the
    /// similarities are divided by their sum so the scores sum to 1.
    pub fn score(&self, text: &str) -> StanceScores {
        if text.trim().is_empty() {
            return StanceScores::zero();
        }

        let embedding = self.embedder.embed(text);
        let similarities: Vec<f64> = self
            .reference_vectors
            .iter()
            .map(|reference| cosine_similarity(&embedding, reference))
            .collect();

        let total: f64 = similarities.iter().sum();
        if total <= 0.0 {
            return StanceScores::zero();
        }

        StanceScores {
            liberal: similarities[0] / total,
            conservative: similarities[1] / total,
            moderate: similarities[2] / total,
        }
    }

    /// Score a text and attach its dominant category
    pub fn classify(&self, text: &str) -> StanceResult {
        let scores = self.score(text);
        StanceResult {
            dominant: scores.dominant(),
            scores,
        }
    }
}

fn mean_embedding<E: Embedder>(embedder: &E, statements: &[String]) -> Vec<f32> {
    let mut mean = vec![0.0f32; embedder.dimension()];
    if statements.is_empty() {
        return mean;
    }

    for statement in statements {
        for (slot, value) in mean.iter_mut().zip(embedder.embed(statement)) {
            *slot += value;
        }
    }
    let count = statements.len() as f32;
    for slot in &mut mean {
        *slot /= count;
    }
    mean
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator > 0.0 { dot / denominator } else { 0.0 }
}

/// Score every `*.txt` file in a directory, in filename order.
///
/// Empty transcriptions produce error records, matching how the index later
/// excludes them from lookup.
pub fn score_directory<E: Embedder>(
    scorer: &StanceScorer<E>,
    dir: &Path,
) -> Result<Vec<StanceRecord>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read transcription directory: {:?}", dir))?;

    let mut txt_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    txt_files.sort();

    info!("Scoring {} transcription files", txt_files.len());

    let mut records = Vec::with_capacity(txt_files.len());
    for path in txt_files {
        records.push(score_file(scorer, &path));
    }
    Ok(records)
}

fn score_file<E: Embedder>(scorer: &StanceScorer<E>, path: &Path) -> StanceRecord {
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(error) => {
            return StanceRecord::Failed {
                error: format!("Error reading {}: {}", file, error),
            };
        }
    };
    if text.is_empty() {
        debug!("Empty transcription: {}", file);
        return StanceRecord::Failed {
            error: format!("Empty transcription: {}", file),
        };
    }

    let result = scorer.classify(&text);
    StanceRecord::Scored(StanceEntry {
        file,
        text,
        stance_scores: result.scores,
        dominant_stance: result.dominant,
    })
}

/// Write a batch of stance records as the directory's stance file
pub fn write_stance_file(records: &[StanceRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create stance file: {:?}", path))?;
    serde_json::to_writer_pretty(file, records).context("Failed to write stance records")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stance::HashEmbedder;

    fn scorer() -> StanceScorer<HashEmbedder> {
        StanceScorer::new(HashEmbedder::default(), &ReferenceSet::default())
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = scorer();
        assert_eq!(scorer.score(""), StanceScores::zero());
        assert_eq!(scorer.score("   \n\t"), StanceScores::zero());
    }

    #[test]
    fn test_scores_sum_to_one_for_reference_text() {
        let scorer = scorer();
        let scores = scorer.score("Healthcare is a human right that should be guaranteed");
        let sum = scores.sum();
        assert!(
            (sum - 1.0).abs() < 1e-6 || sum == 0.0,
            "scores must sum to 1 or be all-zero, got {}",
            sum
        );
    }

    #[test]
    fn test_reference_statement_scores_its_own_category_highest() {
        let scorer = scorer();
        let result =
            scorer.classify("Lower taxes stimulate economic growth and job creation");
        assert_eq!(result.dominant, StanceCategory::Conservative);
        assert!(result.scores.conservative >= result.scores.liberal);
        assert!(result.scores.conservative >= result.scores.moderate);
    }

    #[test]
    fn test_dominant_matches_argmax() {
        let scorer = scorer();
        let result = scorer.classify("Compromise and bipartisan cooperation move us forward");
        let max = StanceCategory::ALL
            .iter()
            .map(|&c| result.scores.get(c))
            .fold(f64::MIN, f64::max);
        assert_eq!(result.scores.get(result.dominant), max);
    }

    #[test]
    fn test_score_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("d_chunk_000.txt"),
            "Tax the wealthy more to fund social programs",
        )
        .unwrap();
        std::fs::write(dir.path().join("d_chunk_001.txt"), "  \n").unwrap();
        std::fs::write(dir.path().join("d_chunk_002.wav"), "not a transcript").unwrap();

        let records = score_directory(&scorer(), dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        match &records[0] {
            StanceRecord::Scored(entry) => {
                assert_eq!(entry.file, "d_chunk_000.txt");
                assert!((entry.stance_scores.sum() - 1.0).abs() < 1e-6);
            }
            other => panic!("expected scored record, got {:?}", other),
        }
        assert!(matches!(records[1], StanceRecord::Failed { .. }));
    }

    #[test]
    fn test_write_stance_file_round_trips_through_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("d_chunk_000.txt"),
            "Evidence-based policies should guide decision making",
        )
        .unwrap();
        std::fs::write(dir.path().join("d_chunk_001.txt"), "").unwrap();

        let records = score_directory(&scorer(), dir.path()).unwrap();
        let stance_path = dir.path().join("stance_analysis.json");
        write_stance_file(&records, &stance_path).unwrap();

        let index = crate::io::StanceIndex::load(&stance_path);
        assert_eq!(index.len(), 1);
        assert!(index.get("d_chunk_000.txt").is_some());
        assert!(index.get("d_chunk_001.txt").is_none());
    }
}
