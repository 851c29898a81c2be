pub mod builder;
pub mod error;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod persist;
pub mod record;
pub mod stem;

pub use builder::{CorpusIndex, IndexBuilder};
pub use error::IndexError;
pub use index::{DocumentId, DocumentTokenCounts, IndexStats, InvertedIndex, ScoredCandidate, TermCount};
pub use record::{FsRecordResolver, RecipeRecord, RecordResolver};
