pub mod aggregate;
pub mod io;
pub mod models;
pub mod stance;

pub use aggregate::{aggregate_directory, AggregateConfig, AggregateError};
pub use io::{
    discover_chunks, parse_chunk_index, parse_rttm, parse_rttm_file, ChunkEntry, ChunkTiming,
    StanceIndex, TimelineDocument, TimelineMetadata,
};
pub use models::{
    AggregateStats, ChunkRecord, SpeakerSegment, StanceCategory, StanceResult, StanceScores,
};
pub use stance::{
    score_directory, write_stance_file, Embedder, HashEmbedder, ReferenceSet, StanceScorer,
};
