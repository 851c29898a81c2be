use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier for a document: its source filename, kept verbatim in
/// persisted form.
pub type DocumentId = String;

/// Stemmed term -> sorted, deduplicated list of document ids. Immutable
/// once a build completes; queries only read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<DocumentId>>,
}

impl InvertedIndex {
    pub(crate) fn from_postings(postings: BTreeMap<String, Vec<DocumentId>>) -> Self {
        Self { postings }
    }

    pub fn get(&self, term: &str) -> Option<&[DocumentId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocumentId])> {
        self.postings.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// One entry of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

/// Corpus summary written next to the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_unique_terms: usize,
    pub top_20_terms: Vec<TermCount>,
    pub top_10_ingredients: Vec<TermCount>,
    pub average_tokens_per_recipe: f64,
    pub malformed_files: Vec<DocumentId>,
}

/// Document id -> number of tokens it contributed (post-normalization,
/// pre-dedup).
pub type DocumentTokenCounts = BTreeMap<DocumentId, usize>;

/// A ranked search hit. Produced by the matcher, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub id: DocumentId,
    pub score: f64,
}
