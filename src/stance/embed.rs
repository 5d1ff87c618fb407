/// Text-embedding seam for the stance scorer.
///
/// The scorer only needs a vector per text; which model produces it is a
/// deployment decision. A transformer-backed embedder plugs in behind this
/// trait without touching the scoring code.
pub trait Embedder {
    /// Embed a text into a fixed-dimension vector
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Dimension of the vectors this embedder produces
    fn dimension(&self) -> usize;
}

/// Deterministic signed feature-hashing embedder.
///
/// Each lowercased alphanumeric token is hashed into one of `dimension`
/// buckets with a +-1 sign, so texts sharing vocabulary land near each other
/// under cosine similarity. No model files, no downloads, identical output
/// for identical input on every run.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash & (1u64 << 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        vector
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// FNV-1a, stable across platforms and releases so embeddings (and therefore
/// stance scores) are reproducible between runs
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("Healthcare is a human right");
        let b = embedder.embed("Healthcare is a human right");
        assert_eq!(a, b);
    }

    #[test]
    fn test_embedding_ignores_case_and_punctuation() {
        let embedder = HashEmbedder::default();
        assert_eq!(
            embedder.embed("Lower taxes, stronger borders!"),
            embedder.embed("lower TAXES stronger borders")
        );
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::new(32);
        let vector = embedder.embed("   ");
        assert_eq!(vector.len(), 32);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dimension_is_respected() {
        let embedder = HashEmbedder::new(64);
        assert_eq!(embedder.dimension(), 64);
        assert_eq!(embedder.embed("some words here").len(), 64);
    }
}
