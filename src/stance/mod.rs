pub mod embed;
pub mod references;
pub mod scorer;

pub use embed::{Embedder, HashEmbedder};
pub use references::ReferenceSet;
pub use scorer::{score_directory, write_stance_file, StanceScorer};
