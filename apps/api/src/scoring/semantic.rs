//! Semantic Similarity Estimator: TF-IDF cosine between exactly two documents.
//!
//! Vectorisation:
//! - tokens are runs of 2+ word characters, lowercased
//! - English stop-words are dropped before n-grams are formed
//! - terms are unigrams and bigrams
//! - tf = raw count, idf = ln((1 + n) / (1 + df)) + 1 with n = 2
//! - both vectors are L2-normalised, so cosine = dot product
//!
//! Any degenerate input (empty text, empty vocabulary, zero-norm vector)
//! yields 0.0. The result is clamped into [0, 1].

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use regex::Regex;
use tracing::debug;

use crate::scoring::cache::{PairKey, SimilarityCache};
use crate::scoring::stop_words::is_stop_word;

static TERM_RE: OnceLock<Regex> = OnceLock::new();

fn term_re() -> &'static Regex {
    TERM_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("term pattern is a valid regex"))
}

/// Estimator with an optional injected cache. Shareable across requests.
pub struct SimilarityEstimator {
    cache: Option<Mutex<Box<dyn SimilarityCache>>>,
}

impl SimilarityEstimator {
    pub fn new(cache: Box<dyn SimilarityCache>) -> Self {
        Self {
            cache: Some(Mutex::new(cache)),
        }
    }

    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Similarity of `a` and `b` in [0, 1], served from the cache when possible.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let Some(cache) = &self.cache else {
            return tfidf_cosine(a, b);
        };

        let key: PairKey = (a.to_string(), b.to_string());
        {
            let mut guard = cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = guard.get(&key) {
                debug!("Similarity cache hit");
                return hit;
            }
        }

        debug!("Similarity cache miss");
        let value = tfidf_cosine(a, b);
        cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(key, value);
        value
    }
}

/// Uncached TF-IDF cosine similarity.
pub fn tfidf_cosine(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() && counts_b.is_empty() {
        debug!("Empty TF-IDF vocabulary; similarity is 0");
        return 0.0;
    }

    let idf = |term: &str| {
        let df = counts_a.contains_key(term) as u32 + counts_b.contains_key(term) as u32;
        ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0
    };

    let vec_a = weigh(&counts_a, &idf);
    let vec_b = weigh(&counts_b, &idf);

    let norm_a = vec_a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = vec_b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = vec_a
        .iter()
        .filter_map(|(term, wa)| vec_b.get(term).map(|wb| wa * wb))
        .sum();

    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn weigh<'a>(counts: &'a HashMap<String, u32>, idf: impl Fn(&str) -> f64) -> HashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(term, &tf)| (term.as_str(), tf as f64 * idf(term)))
        .collect()
}

/// Unigram + bigram counts over the non-stop-word tokens of `text`.
fn term_counts(text: &str) -> HashMap<String, u32> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = term_re()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !is_stop_word(w))
        .collect();

    let mut counts = HashMap::new();
    for word in &words {
        *counts.entry((*word).to_string()).or_insert(0) += 1;
    }
    for pair in words.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::cache::LruSimilarityCache;

    const RESUME: &str = "Senior data scientist. Built machine learning pipelines in Python \
        with TensorFlow and deployed REST APIs with Docker on AWS.";
    const JD: &str = "We are hiring a machine learning engineer with Python, SQL and \
        TensorFlow experience to deploy services on AWS or GCP.";

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(tfidf_cosine("", ""), 0.0);
        assert_eq!(tfidf_cosine("python developer", ""), 0.0);
        assert_eq!(tfidf_cosine("   ", "python developer"), 0.0);
    }

    #[test]
    fn test_stop_word_only_texts_score_zero() {
        assert_eq!(tfidf_cosine("the and of", "we are with you"), 0.0);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let sim = tfidf_cosine(RESUME, RESUME);
        assert!((sim - 1.0).abs() < 1e-9, "sim was {sim}");
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(tfidf_cosine("python kubernetes", "pottery gardening"), 0.0);
    }

    #[test]
    fn test_related_texts_score_between_zero_and_one() {
        let sim = tfidf_cosine(RESUME, JD);
        assert!(sim > 0.0 && sim < 1.0, "sim was {sim}");
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let ab = tfidf_cosine(RESUME, JD);
        let ba = tfidf_cosine(JD, RESUME);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_bigrams_are_counted() {
        let counts = term_counts("Machine learning and machine learning");
        assert_eq!(counts.get("machine learning"), Some(&2));
        assert_eq!(counts.get("learning machine"), Some(&1));
        assert!(!counts.contains_key("and"));
    }

    #[test]
    fn test_single_character_words_are_ignored() {
        let counts = term_counts("C R Rust");
        assert_eq!(counts.len(), 1);
        assert!(counts.contains_key("rust"));
    }

    #[test]
    fn test_cached_estimator_matches_uncached() {
        let cache = LruSimilarityCache::with_capacity(8).unwrap();
        let estimator = SimilarityEstimator::new(Box::new(cache));
        let first = estimator.similarity(RESUME, JD);
        let second = estimator.similarity(RESUME, JD);
        assert_eq!(first, second);
        let uncached = SimilarityEstimator::uncached().similarity(RESUME, JD);
        assert!((first - uncached).abs() < 1e-12);
    }

    #[test]
    fn test_cached_estimator_stores_each_ordering() {
        let cache = LruSimilarityCache::with_capacity(8).unwrap();
        let estimator = SimilarityEstimator::new(Box::new(cache));
        estimator.similarity(RESUME, JD);
        estimator.similarity(JD, RESUME);
        estimator.similarity(RESUME, JD);
        let len = estimator
            .cache
            .as_ref()
            .unwrap()
            .lock()
            .unwrap()
            .len();
        assert_eq!(len, 2);
    }
}
