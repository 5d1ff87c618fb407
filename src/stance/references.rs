use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::StanceCategory;

/// Canonical reference statements per stance category.
///
/// The scorer compares input text against the mean embedding of each
/// category's statements. Immutable once constructed; swap the whole set to
/// change the reference model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSet {
    pub liberal: Vec<String>,
    pub conservative: Vec<String>,
    pub moderate: Vec<String>,
}

impl ReferenceSet {
    /// Load a reference set from a JSON file with `liberal`, `conservative`,
    /// and `moderate` statement arrays
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference set: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse reference set: {:?}", path))
    }

    pub fn statements(&self, category: StanceCategory) -> &[String] {
        match category {
            StanceCategory::Liberal => &self.liberal,
            StanceCategory::Conservative => &self.conservative,
            StanceCategory::Moderate => &self.moderate,
        }
    }
}

impl Default for ReferenceSet {
    fn default() -> Self {
        fn owned(statements: &[&str]) -> Vec<String> {
            statements.iter().map(|s| s.to_string()).collect()
        }

        Self {
            liberal: owned(&[
                "Government should play a larger role in addressing social inequality",
                "We need stronger environmental regulations to combat climate change",
                "Healthcare is a human right that should be guaranteed by government",
                "Tax the wealthy more to fund social programs",
                "Immigration enriches our society and should be encouraged",
            ]),
            conservative: owned(&[
                "Free markets and minimal government intervention drive prosperity",
                "Individual responsibility is more important than government assistance",
                "Traditional values and institutions should be preserved",
                "Lower taxes stimulate economic growth and job creation",
                "Strong national defense and border security are essential",
            ]),
            moderate: owned(&[
                "We need balanced solutions that consider multiple perspectives",
                "Both government and private sector have important roles to play",
                "Compromise and bipartisan cooperation are essential for progress",
                "Evidence-based policies should guide decision making",
                "We should focus on what unites us rather than what divides us",
            ]),
        }
    }
}
