pub mod locator;
pub mod output;
pub mod rttm;
pub mod stance_index;

pub use locator::{discover_chunks, parse_chunk_index, ChunkEntry, ChunkTiming};
pub use output::{TimelineDocument, TimelineMetadata};
pub use rttm::{parse_rttm, parse_rttm_file};
pub use stance_index::{StanceEntry, StanceIndex, StanceRecord};
