use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::index::{
    DocumentId, DocumentTokenCounts, IndexStats, InvertedIndex, TermCount,
};
use crate::normalize::Normalizer;
use crate::record::RecipeRecord;

const TOP_TERMS: usize = 20;
const TOP_INGREDIENTS: usize = 10;

/// Occurrence counter that remembers first-seen order so frequency ties
/// rank in insertion order.
#[derive(Debug, Default)]
struct FrequencyTable {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl FrequencyTable {
    fn bump(&mut self, term: &str) {
        match self.counts.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(term.to_string(), 1);
                self.order.push(term.to_string());
            }
        }
    }

    fn top(&self, n: usize) -> Vec<TermCount> {
        let mut ranked: Vec<TermCount> = self
            .order
            .iter()
            .map(|term| TermCount { term: term.clone(), count: self.counts[term] })
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

/// Everything one full build pass produces.
#[derive(Debug)]
pub struct CorpusIndex {
    pub index: InvertedIndex,
    pub stats: IndexStats,
    pub token_counts: DocumentTokenCounts,
}

/// Single-pass accumulator over the corpus. Feed documents in a fixed
/// order if reproducible frequency rankings are wanted; the index itself
/// is order-independent.
#[derive(Debug)]
pub struct IndexBuilder {
    normalizer: Normalizer,
    postings: HashMap<String, BTreeSet<DocumentId>>,
    term_freq: FrequencyTable,
    ingredient_freq: FrequencyTable,
    token_counts: BTreeMap<DocumentId, usize>,
    malformed: Vec<DocumentId>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::for_indexing(),
            postings: HashMap::new(),
            term_freq: FrequencyTable::default(),
            ingredient_freq: FrequencyTable::default(),
            token_counts: BTreeMap::new(),
            malformed: Vec::new(),
        }
    }

    /// Parse a raw document and index it. A document that fails to parse is
    /// recorded as malformed and skipped; the batch continues.
    pub fn add_json(&mut self, id: &str, raw: &str) {
        match serde_json::from_str::<RecipeRecord>(raw) {
            Ok(record) => self.add_record(id, &record),
            Err(err) => {
                tracing::warn!(id, %err, "skipping malformed document");
                self.add_malformed(id);
            }
        }
    }

    pub fn add_malformed(&mut self, id: &str) {
        self.malformed.push(id.to_string());
    }

    /// Index one parsed document.
    pub fn add_record(&mut self, id: &str, record: &RecipeRecord) {
        let tokens = self.normalizer.tokenize(&record.searchable_text());
        self.token_counts.insert(id.to_string(), tokens.len());
        for token in &tokens {
            self.postings
                .entry(token.clone())
                .or_default()
                .insert(id.to_string());
            self.term_freq.bump(token);
        }
        for token in self.normalizer.tokenize(&record.ingredient_text()) {
            self.ingredient_freq.bump(&token);
        }
    }

    /// Finalize the build: sorted posting lists plus summary statistics.
    pub fn finish(self) -> CorpusIndex {
        let postings: BTreeMap<String, Vec<DocumentId>> = self
            .postings
            .into_iter()
            .map(|(term, ids)| (term, ids.into_iter().collect()))
            .collect();
        let index = InvertedIndex::from_postings(postings);

        let documents = self.token_counts.len();
        let average_tokens_per_recipe = if documents == 0 {
            0.0
        } else {
            self.token_counts.values().sum::<usize>() as f64 / documents as f64
        };

        let stats = IndexStats {
            total_unique_terms: index.len(),
            top_20_terms: self.term_freq.top(TOP_TERMS),
            top_10_ingredients: self.ingredient_freq.top(TOP_INGREDIENTS),
            average_tokens_per_recipe,
            malformed_files: self.malformed,
        };

        tracing::info!(
            documents,
            unique_terms = stats.total_unique_terms,
            malformed = stats.malformed_files.len(),
            "index build complete"
        );

        CorpusIndex { index, stats, token_counts: self.token_counts }
    }
}
