use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring the persisted index into memory. Kept separate from an
/// empty search result so callers can tell "nothing found" apart from
/// "search engine not ready".
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index file {path} is unavailable")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("index file {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
