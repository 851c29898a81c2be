use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::index::{DocumentId, InvertedIndex, ScoredCandidate};
use crate::normalize::Normalizer;
use crate::record::{display_id, RecipeRecord, RecordResolver};

/// Weight of the primary term (the dish name).
pub const PRIMARY_WEIGHT: f64 = 5.0;
/// Weight of each secondary term (a visible ingredient).
pub const SECONDARY_WEIGHT: f64 = 2.0;

const PARTIAL_FACTOR: f64 = 0.5;
const MIN_WORD_LEN: usize = 3;
const MIN_PARTIAL_LEN: usize = 4;
const TOP_K: usize = 5;

/// Flat bonus for a name hit in the approximate matcher.
const NAME_MATCH_SCORE: f64 = 5.0;
const NAME_SIMILARITY_CUTOFF: f64 = 0.7;

/// Rank documents for a weighted query: one primary term and any number of
/// secondary terms. Secondary terms that repeat the primary one are dropped
/// so they are not counted twice.
///
/// Every term is normalized and stemmed with the query profile and each
/// resulting word is scored on its own: an exact index key adds the full
/// weight to every document under it; a word of at least 4 characters with
/// no exact key falls back to a substring scan over all keys at half
/// weight, and every key it touches contributes. Ties rank by ascending
/// document id. At most the top 5 candidates come back.
pub fn search(
    primary: &str,
    secondary: &[String],
    index: &InvertedIndex,
) -> Vec<ScoredCandidate> {
    let normalizer = Normalizer::for_queries();
    let mut weighted: Vec<(&str, f64)> = Vec::new();
    if !primary.trim().is_empty() {
        weighted.push((primary, PRIMARY_WEIGHT));
    }
    let primary_folded = primary.trim().to_lowercase();
    for term in secondary {
        if term.trim().to_lowercase() != primary_folded {
            weighted.push((term.as_str(), SECONDARY_WEIGHT));
        }
    }

    let mut scores: HashMap<DocumentId, f64> = HashMap::new();
    for (term, weight) in weighted {
        for word in normalizer.tokenize(term) {
            if word.len() < MIN_WORD_LEN {
                continue;
            }
            if let Some(ids) = index.get(&word) {
                for id in ids {
                    *scores.entry(id.clone()).or_insert(0.0) += weight;
                }
            } else if word.len() >= MIN_PARTIAL_LEN {
                // No exact key: scan for keys containing the word or
                // contained in it. Intentionally generous; every match
                // accumulates at half weight.
                // TODO: replace with a prefix index if the corpus outgrows
                // a linear scan.
                for (key, ids) in index.iter() {
                    if key.contains(word.as_str()) || word.contains(key) {
                        for id in ids {
                            *scores.entry(id.clone()).or_insert(0.0) += weight * PARTIAL_FACTOR;
                        }
                    }
                }
            } else {
                tracing::debug!(%word, "query word matched nothing");
            }
        }
    }

    rank(scores, Some(TOP_K))
}

fn rank(scores: HashMap<DocumentId, f64>, limit: Option<usize>) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = scores
        .into_iter()
        .map(|(id, score)| ScoredCandidate { id, score })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// A search hit expanded to its full record.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCandidate {
    pub id: String,
    pub score: f64,
    pub record: RecipeRecord,
}

/// [`search`], then resolve each candidate through the record source. A
/// candidate whose id no longer resolves is dropped from the output; lower
/// ranks are not pulled up to replace it.
pub fn search_and_resolve<R: RecordResolver>(
    primary: &str,
    secondary: &[String],
    index: &InvertedIndex,
    resolver: &R,
) -> Vec<ResolvedCandidate> {
    search(primary, secondary, index)
        .into_iter()
        .filter_map(|candidate| {
            resolver.resolve(&candidate.id).map(|record| ResolvedCandidate {
                id: display_id(&candidate.id).to_string(),
                score: candidate.score,
                record,
            })
        })
        .collect()
}

/// Simpler matcher variant: the single index key closest to the free-text
/// name (edit-distance similarity, cutoff 0.7) contributes a flat 5 to its
/// documents, and each ingredient that is an exact index key contributes 1
/// per document. Returns the full ranking.
pub fn approximate_match(
    name: &str,
    ingredients: &[String],
    index: &InvertedIndex,
) -> Vec<ScoredCandidate> {
    let mut scores: HashMap<DocumentId, f64> = HashMap::new();

    let name = name.to_lowercase();
    let name = name.trim();
    if let Some(key) = closest_term(name, index) {
        if let Some(ids) = index.get(&key) {
            for id in ids {
                *scores.entry(id.clone()).or_insert(0.0) += NAME_MATCH_SCORE;
            }
        }
    }

    for ingredient in ingredients {
        let term = ingredient.to_lowercase();
        if let Some(ids) = index.get(term.trim()) {
            for id in ids {
                *scores.entry(id.clone()).or_insert(0.0) += 1.0;
            }
        }
    }

    rank(scores, None)
}

/// Best index key for `name` by similarity, if any clears the cutoff.
fn closest_term(name: &str, index: &InvertedIndex) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for term in index.terms() {
        let score = similarity(name, term);
        if score < NAME_SIMILARITY_CUTOFF {
            continue;
        }
        match best {
            Some((best_score, _)) if best_score >= score => {}
            _ => best = Some((score, term)),
        }
    }
    best.map(|(_, term)| term.to_string())
}

/// Edit-distance similarity in [0, 1]: 1 minus the Levenshtein distance
/// normalized by the longer input.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("tagine", "tagine"), 1.0);
        assert!(similarity("tagine", "tagin") > NAME_SIMILARITY_CUTOFF);
        assert!(similarity("tagine", "couscou") < NAME_SIMILARITY_CUTOFF);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn levenshtein_basics() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
    }
}
