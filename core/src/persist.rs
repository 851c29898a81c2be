use anyhow::Result;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builder::CorpusIndex;
use crate::error::IndexError;
use crate::index::{DocumentTokenCounts, IndexStats, InvertedIndex};

/// File layout of a persisted index directory.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn inverted_index(&self) -> PathBuf {
        self.root.join("inverted_index.json")
    }

    fn statistics(&self) -> PathBuf {
        self.root.join("term_statistics.json")
    }

    fn metadata(&self) -> PathBuf {
        self.root.join("document_metadata.json")
    }
}

/// Write `value` as pretty JSON via a temp file renamed into place, so a
/// reader never sees a half-written artifact.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut f = File::create(&tmp)?;
        let json = serde_json::to_string_pretty(value)?;
        f.write_all(json.as_bytes())?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IndexError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| IndexError::Unavailable { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw)
        .map_err(|source| IndexError::Corrupt { path: path.to_path_buf(), source })
}

/// Persist a completed build: the inverted index, the term statistics, and
/// the per-document token counts. A rebuild replaces all three wholesale.
pub fn save_corpus_index(paths: &IndexPaths, corpus: &CorpusIndex) -> Result<()> {
    fs::create_dir_all(&paths.root)?;
    write_json(&paths.inverted_index(), &corpus.index)?;
    write_json(&paths.statistics(), &corpus.stats)?;
    write_json(&paths.metadata(), &corpus.token_counts)?;
    tracing::info!(root = %paths.root.display(), "index artifacts written");
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex, IndexError> {
    read_json(&paths.inverted_index())
}

pub fn load_stats(paths: &IndexPaths) -> Result<IndexStats, IndexError> {
    read_json(&paths.statistics())
}

pub fn load_token_counts(paths: &IndexPaths) -> Result<DocumentTokenCounts, IndexError> {
    read_json(&paths.metadata())
}

/// Index contents served to queries.
#[derive(Debug)]
pub struct LoadedIndex {
    pub index: InvertedIndex,
}

/// Process-wide read-only view of the persisted index with an explicit
/// reload operation. Readers take cheap `Arc` snapshots and are never
/// blocked by a reload; a new index is fully loaded before it is swapped
/// in, so no query observes a partially populated index.
pub struct IndexHandle {
    current: RwLock<Arc<LoadedIndex>>,
}

impl IndexHandle {
    /// Load the index once, typically at process start.
    pub fn load(paths: &IndexPaths) -> Result<Self, IndexError> {
        let index = load_index(paths)?;
        Ok(Self { current: RwLock::new(Arc::new(LoadedIndex { index })) })
    }

    /// Snapshot for query serving. The snapshot stays valid across
    /// concurrent reloads.
    pub fn snapshot(&self) -> Arc<LoadedIndex> {
        self.current.read().clone()
    }

    /// Swap in a freshly persisted index. On failure the previous index
    /// keeps serving.
    pub fn reload(&self, paths: &IndexPaths) -> Result<(), IndexError> {
        let index = load_index(paths)?;
        let fresh = Arc::new(LoadedIndex { index });
        *self.current.write() = fresh;
        tracing::info!(root = %paths.root.display(), "index reloaded");
        Ok(())
    }
}
