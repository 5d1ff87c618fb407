pub mod chunk;
pub mod stance;
pub mod stats;

pub use chunk::{ChunkRecord, SpeakerSegment};
pub use stance::{StanceCategory, StanceResult, StanceScores};
pub use stats::{AggregateStats, StanceDistribution};
