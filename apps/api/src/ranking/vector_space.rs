//! Vector-Space Ranker: TF-IDF over one batch, cosine similarity against the profile.
//!
//! Weighting:
//! - terms are word n-grams, n in `1..=ngram_max`, over accent-folded tokens;
//! - tf is sublinear: `1 + ln(count)`;
//! - idf is smoothed: `ln((1 + n_docs) / (1 + df)) + 1`;
//! - every document vector is L2-normalised.
//!
//! The space is fit fresh for every batch and never reused.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::ranking::normalizer::fold_accents;

/// Shortest token (in characters) the vectorizer turns into a term.
const MIN_TERM_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Vocabulary cap, keeping the most frequent terms. 0 means unlimited.
    pub max_features: usize,
    /// Longest n-gram. 1 means unigrams only.
    pub ngram_max: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ngram_max: 3,
        }
    }
}

/// Sparse document vector: `(term index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// A fitted vocabulary with per-term inverse document frequencies.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    config: VectorizerConfig,
}

impl VectorSpace {
    /// Fits vocabulary and idf over `corpus`.
    pub fn fit(corpus: &[&str], config: VectorizerConfig) -> Self {
        let n_docs = corpus.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut corpus_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in corpus {
            for (term, count) in term_counts(doc, config.ngram_max) {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
                *corpus_frequency.entry(term).or_insert(0) += count;
            }
        }

        let mut kept: Vec<String> = corpus_frequency.keys().cloned().collect();
        if config.max_features > 0 && kept.len() > config.max_features {
            let mut ranked: Vec<(&String, usize)> =
                corpus_frequency.iter().map(|(t, c)| (t, *c)).collect();
            // Most frequent first; equal counts fall back to term order.
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept = ranked
                .into_iter()
                .take(config.max_features)
                .map(|(t, _)| t.clone())
                .collect();
            kept.sort();
        }

        let vocabulary: BTreeMap<String, usize> = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = document_frequency.get(term).copied().unwrap_or(0);
            idf[idx] = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
        }

        VectorSpace {
            vocabulary,
            idf,
            config,
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_degenerate(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Weighted, L2-normalised vector for `doc`. Out-of-vocabulary terms are ignored.
    pub fn transform(&self, doc: &str) -> TermVector {
        let mut entries: Vec<(usize, f64)> = term_counts(doc, self.config.ngram_max)
            .into_iter()
            .filter_map(|(term, count)| {
                let idx = *self.vocabulary.get(&term)?;
                let tf = 1.0 + (count as f64).ln();
                Some((idx, tf * self.idf[idx]))
            })
            .collect();
        entries.sort_by_key(|(idx, _)| *idx);

        let vector = TermVector { entries };
        let norm = vector.norm();
        if norm == 0.0 {
            return vector;
        }
        TermVector {
            entries: vector
                .entries
                .into_iter()
                .map(|(idx, w)| (idx, w / norm))
                .collect(),
        }
    }
}

/// Cosine of the angle between `a` and `b`, clamped to [0, 1].
/// A zero vector on either side scores 0.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

/// Scores each candidate text against the profile text.
///
/// The profile is appended last to the fitting corpus. An empty vocabulary
/// yields all-zero scores.
pub fn score_candidates(candidates: &[&str], profile: &str, config: VectorizerConfig) -> Vec<f64> {
    let mut corpus: Vec<&str> = candidates.to_vec();
    corpus.push(profile);

    let space = VectorSpace::fit(&corpus, config);
    tracing::debug!(
        documents = corpus.len(),
        vocabulary = space.vocabulary_len(),
        "vector space fitted"
    );
    if space.is_degenerate() {
        tracing::warn!("empty vocabulary after normalization; all scores default to 0");
        return vec![0.0; candidates.len()];
    }

    let mut rows: Vec<TermVector> = corpus.iter().map(|doc| space.transform(doc)).collect();
    let profile_vector = rows.pop().unwrap_or_default();

    rows.iter()
        .map(|row| cosine_similarity(&profile_vector, row))
        .collect()
}

/// Counts the word n-grams of `doc`, keyed by their space-joined form.
fn term_counts(doc: &str, ngram_max: usize) -> BTreeMap<String, usize> {
    let folded = fold_accents(doc);
    let tokens: Vec<&str> = folded
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TERM_TOKEN_CHARS)
        .collect();

    let mut counts = BTreeMap::new();
    // No window is longer than the document.
    for n in 1..=ngram_max.max(1).min(tokens.len()) {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unigrams() -> VectorizerConfig {
        VectorizerConfig {
            max_features: 0,
            ngram_max: 1,
        }
    }

    #[test]
    fn test_identical_text_scores_one() {
        let text = "python pandas estadística enseñanza tutorías";
        let scores = score_candidates(&[text, "cocina jardinería"], text, VectorizerConfig::default());
        assert!((scores[0] - 1.0).abs() < EPS, "got {}", scores[0]);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let scores = score_candidates(&["cocina jardinería"], "python pandas", unigrams());
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_scores_are_bounded() {
        let candidates = [
            "python pandas numpy estadística",
            "python cocina",
            "jardinería música",
            "python python python pandas",
        ];
        let scores = score_candidates(&candidates, "python pandas estadística", VectorizerConfig::default());
        assert_eq!(scores.len(), candidates.len());
        for s in scores {
            assert!((0.0..=1.0).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let scores = score_candidates(
            &["python cocina música", "python pandas estadística"],
            "python pandas estadística datos",
            unigrams(),
        );
        assert!(scores[1] > scores[0]);
    }

    #[test]
    fn test_empty_vocabulary_yields_zeros() {
        let scores = score_candidates(&["", ""], "", VectorizerConfig::default());
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let scores = score_candidates(&["", "python"], "python datos", unigrams());
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_no_candidates_yields_no_scores() {
        assert!(score_candidates(&[], "python", unigrams()).is_empty());
    }

    #[test]
    fn test_accents_are_folded_into_the_same_term() {
        let scores = score_candidates(&["estadistica"], "estadística", unigrams());
        assert!((scores[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ngrams_capture_phrases() {
        let config = VectorizerConfig {
            max_features: 0,
            ngram_max: 3,
        };
        let space = VectorSpace::fit(&["analisis datos python"], config);
        // 3 unigrams + 2 bigrams + 1 trigram
        assert_eq!(space.vocabulary_len(), 6);
    }

    #[test]
    fn test_word_order_matters_with_bigrams() {
        let config = VectorizerConfig {
            max_features: 0,
            ngram_max: 2,
        };
        let scores = score_candidates(
            &["datos analisis", "analisis datos"],
            "analisis datos",
            config,
        );
        assert!(scores[1] > scores[0]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let config = VectorizerConfig {
            max_features: 2,
            ngram_max: 1,
        };
        let space = VectorSpace::fit(&["alpha alpha beta", "alpha gamma gamma", "delta"], config);
        assert_eq!(space.vocabulary_len(), 2);
        assert!(space.vocabulary.contains_key("alpha"));
        assert!(space.vocabulary.contains_key("gamma"));
    }

    #[test]
    fn test_max_features_ties_break_alphabetically() {
        let config = VectorizerConfig {
            max_features: 1,
            ngram_max: 1,
        };
        let space = VectorSpace::fit(&["zeta", "beta"], config);
        assert!(space.vocabulary.contains_key("beta"));
    }

    #[test]
    fn test_transform_is_unit_length() {
        let space = VectorSpace::fit(&["python pandas pandas", "datos"], unigrams());
        let vector = space.transform("python pandas pandas");
        assert!((vector.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_idf_downweights_shared_terms() {
        let space = VectorSpace::fit(&["comun raro", "comun", "comun"], unigrams());
        let comun = space.idf[space.vocabulary["comun"]];
        let raro = space.idf[space.vocabulary["raro"]];
        assert!((comun - 1.0).abs() < EPS);
        assert!(raro > comun);
    }

    #[test]
    fn test_sublinear_tf() {
        let space = VectorSpace::fit(&["uno uno uno uno dos"], unigrams());
        let v = space.transform("uno uno uno uno dos");
        // Same idf for both terms, so the ratio is tf alone.
        let ratio = v.entries[1].1 / v.entries[0].1;
        let expected = (1.0 + 4.0_f64.ln()) / 1.0;
        let (dos, uno) = (space.vocabulary["dos"], space.vocabulary["uno"]);
        assert!(dos < uno);
        assert!((ratio - expected).abs() < EPS);
    }

    #[test]
    fn test_cosine_with_zero_vector_is_zero() {
        let zero = TermVector::default();
        let space = VectorSpace::fit(&["python"], unigrams());
        let v = space.transform("python");
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let candidates = ["python pandas datos", "enseñanza tutorías python", "música"];
        let profile = "python datos enseñanza";
        let first = score_candidates(&candidates, profile, VectorizerConfig::default());
        let second = score_candidates(&candidates, profile, VectorizerConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_huge_ngram_max_is_bounded_by_document_length() {
        let counts = term_counts("python pandas numpy", usize::MAX);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.get("python pandas numpy"), Some(&1));
        assert!(term_counts("", usize::MAX).is_empty());
    }
}
