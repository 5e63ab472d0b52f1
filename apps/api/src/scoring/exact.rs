//! Exact Match Scorer: keyword-set intersection between resume and JD.
//!
//! Algorithm:
//! 1. vocabulary = union of all catalog keywords
//! 2. jd_relevant = vocabulary ∩ jd_tokens, or the whole vocabulary if that is empty
//! 3. matched = jd_relevant ∩ resume_tokens, missing = jd_relevant − resume_tokens
//! 4. exact_score = 100 × |matched| / max(1, |jd_relevant|)
//! 5. the same per category, with the category's own empty-fallback; categories
//!    may share keywords and are scored independently.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::scoring::catalog::KeywordCatalog;
use crate::scoring::tokenizer::TokenSet;

/// Coverage of one category's JD-relevant keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    /// 0 – 100, one decimal.
    pub coverage: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Result of the exact keyword pass, before blending.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactMatch {
    pub jd_relevant: BTreeSet<String>,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    /// Unrounded 0 – 100.
    pub exact_score: f64,
    pub categories: BTreeMap<String, CategoryCoverage>,
}

pub fn score_exact(
    resume_tokens: &TokenSet,
    jd_tokens: &TokenSet,
    catalog: &KeywordCatalog,
) -> ExactMatch {
    let vocabulary = catalog.vocabulary();
    let jd_relevant = focus(&vocabulary, |k| jd_tokens.contains(k));
    let (matched, missing) = split_by_presence(&jd_relevant, resume_tokens);
    let exact_score = percentage(matched.len(), jd_relevant.len());

    let categories = catalog
        .categories()
        .map(|(name, keywords)| {
            let focus_set = focus(keywords, |k| jd_relevant.contains(k));
            let (matched, missing) = split_by_presence(&focus_set, resume_tokens);
            let coverage = round1(percentage(matched.len(), focus_set.len()));
            (
                name.to_string(),
                CategoryCoverage {
                    coverage,
                    matched,
                    missing,
                },
            )
        })
        .collect();

    ExactMatch {
        jd_relevant,
        matched,
        missing,
        exact_score,
        categories,
    }
}

/// `keywords ∩ filter`, or all of `keywords` when the intersection is empty.
fn focus(keywords: &BTreeSet<String>, keep: impl Fn(&String) -> bool) -> BTreeSet<String> {
    let narrowed: BTreeSet<String> = keywords.iter().filter(|k| keep(k)).cloned().collect();
    if narrowed.is_empty() {
        keywords.clone()
    } else {
        narrowed
    }
}

fn split_by_presence(
    keywords: &BTreeSet<String>,
    resume_tokens: &TokenSet,
) -> (BTreeSet<String>, BTreeSet<String>) {
    keywords
        .iter()
        .cloned()
        .partition(|k| resume_tokens.contains(k))
}

fn percentage(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole.max(1) as f64
}

/// Rounds to one decimal place, ties to even (6.25 → 6.2).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
