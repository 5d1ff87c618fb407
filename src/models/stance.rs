use serde::{Deserialize, Serialize};

/// Political stance category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanceCategory {
    Liberal,
    Conservative,
    Moderate,
}

impl StanceCategory {
    /// All categories in canonical order (also the tie-break order)
    pub const ALL: [StanceCategory; 3] = [
        StanceCategory::Liberal,
        StanceCategory::Conservative,
        StanceCategory::Moderate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StanceCategory::Liberal => "liberal",
            StanceCategory::Conservative => "conservative",
            StanceCategory::Moderate => "moderate",
        }
    }
}

impl std::fmt::Display for StanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized similarity scores over the three stance categories.
///
/// Either all three sum to 1 (within floating tolerance) or all three are
/// exactly zero (degenerate input: empty text or non-positive similarities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceScores {
    pub liberal: f64,
    pub conservative: f64,
    pub moderate: f64,
}

impl StanceScores {
    /// All-zero scores, used for degenerate input
    pub fn zero() -> Self {
        Self {
            liberal: 0.0,
            conservative: 0.0,
            moderate: 0.0,
        }
    }

    pub fn get(&self, category: StanceCategory) -> f64 {
        match category {
            StanceCategory::Liberal => self.liberal,
            StanceCategory::Conservative => self.conservative,
            StanceCategory::Moderate => self.moderate,
        }
    }

    pub fn sum(&self) -> f64 {
        self.liberal + self.conservative + self.moderate
    }

    /// Highest-scoring category; ties keep the earlier category in
    /// canonical order (liberal, conservative, moderate)
    pub fn dominant(&self) -> StanceCategory {
        let mut best = StanceCategory::ALL[0];
        for &category in &StanceCategory::ALL[1..] {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

/// Stance classification attached to one chunk's transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceResult {
    /// Per-category scores (normalized or all-zero)
    pub scores: StanceScores,
    /// Arg-max category
    pub dominant: StanceCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_argmax() {
        let scores = StanceScores {
            liberal: 0.2,
            conservative: 0.5,
            moderate: 0.3,
        };
        assert_eq!(scores.dominant(), StanceCategory::Conservative);
    }

    #[test]
    fn test_dominant_tie_breaks_in_canonical_order() {
        let scores = StanceScores {
            liberal: 0.4,
            conservative: 0.4,
            moderate: 0.2,
        };
        assert_eq!(scores.dominant(), StanceCategory::Liberal);

        let scores = StanceScores {
            liberal: 0.1,
            conservative: 0.45,
            moderate: 0.45,
        };
        assert_eq!(scores.dominant(), StanceCategory::Conservative);
    }

    #[test]
    fn test_zero_scores_dominant_is_first_category() {
        assert_eq!(StanceScores::zero().dominant(), StanceCategory::Liberal);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&StanceCategory::Liberal).unwrap();
        assert_eq!(json, "\"liberal\"");
        let parsed: StanceCategory = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(parsed, StanceCategory::Moderate);
    }
}
