//! ScoreReport: the exported result of one scoring request.
//!
//! Serialises to:
//! ```json
//! {
//!   "overall": 65.0,
//!   "details": {
//!     "exact_score": 80.0,
//!     "semantic": 50.0,
//!     "category_breakdown": { "General": { "coverage": 80.0, "matched": [..], "missing": [..] } }
//!   },
//!   "matched": ["aws", "python"],
//!   "missing": ["docker"]
//! }
//! ```
//! Sets are `BTreeSet`s, so every list is emitted sorted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scoring::blend::{blend, ScoreWeights};
use crate::scoring::catalog::KeywordCatalog;
use crate::scoring::exact::{round1, score_exact, CategoryCoverage};
use crate::scoring::semantic::SimilarityEstimator;
use crate::scoring::tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    /// 0 – 100, one decimal.
    pub exact_score: f64,
    /// Semantic similarity scaled to 0 – 100, one decimal.
    pub semantic: f64,
    pub category_breakdown: BTreeMap<String, CategoryCoverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// 0 – 100, one decimal.
    pub overall: f64,
    pub details: ScoreDetails,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Runs the full scoring pipeline: tokenize → exact match → semantic → blend.
pub fn score_resume(
    resume_text: &str,
    jd_text: &str,
    catalog: &KeywordCatalog,
    estimator: &SimilarityEstimator,
    weights: &ScoreWeights,
) -> ScoreReport {
    let resume_tokens = tokenize(resume_text);
    let jd_tokens = tokenize(jd_text);

    let exact = score_exact(&resume_tokens, &jd_tokens, catalog);
    let semantic = estimator.similarity(resume_text, jd_text) * 100.0;
    let overall = blend(exact.exact_score, semantic, weights);

    info!(
        "Scored resume: overall={overall} exact={:.1} semantic={:.1} relevant={} matched={} missing={}",
        exact.exact_score,
        semantic,
        exact.jd_relevant.len(),
        exact.matched.len(),
        exact.missing.len()
    );

    ScoreReport {
        overall,
        details: ScoreDetails {
            exact_score: round1(exact.exact_score),
            semantic: round1(semantic),
            category_breakdown: exact.categories,
        },
        matched: exact.matched,
        missing: exact.missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> KeywordCatalog {
        KeywordCatalog::from_categories(vec![(
            "General".to_string(),
            vec!["python".to_string(), "aws".to_string(), "docker".to_string()],
        )])
    }

    fn btree(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_resume_partial_match() {
        let report = score_resume(
            "Python and Java developer",
            "Looking for Python on AWS",
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        assert_eq!(report.matched, btree(&["python"]));
        assert_eq!(report.missing, btree(&["aws"]));
        assert_eq!(report.details.exact_score, 50.0);
        assert!((0.0..=100.0).contains(&report.details.semantic));
        assert!((0.0..=100.0).contains(&report.overall));
        let general = &report.details.category_breakdown["General"];
        assert_eq!(general.coverage, 50.0);
    }

    #[test]
    fn test_empty_job_description_scores_against_full_vocabulary() {
        let report = score_resume(
            "python java",
            "",
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        assert_eq!(report.missing, btree(&["aws", "docker"]));
        assert_eq!(report.details.semantic, 0.0);
        assert_eq!(report.details.exact_score, 33.3);
        // 0.7 × 33.333… = 23.333…
        assert_eq!(report.overall, 23.3);
    }

    #[test]
    fn test_identical_texts_get_full_semantic_score() {
        let text = "python aws docker engineer";
        let report = score_resume(
            text,
            text,
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        assert_eq!(report.details.exact_score, 100.0);
        assert_eq!(report.details.semantic, 100.0);
        assert_eq!(report.overall, 100.0);
    }

    #[test]
    fn test_report_json_shape() {
        let report = score_resume(
            "python",
            "python aws",
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["overall"].is_number());
        assert!(value["details"]["exact_score"].is_number());
        assert!(value["details"]["semantic"].is_number());
        assert!(value["details"]["category_breakdown"]["General"]["coverage"].is_number());
        assert_eq!(value["matched"], serde_json::json!(["python"]));
        assert_eq!(value["missing"], serde_json::json!(["aws"]));
    }

    #[test]
    fn test_report_lists_are_sorted() {
        let report = score_resume(
            "",
            "docker aws python",
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["missing"], serde_json::json!(["aws", "docker", "python"]));
    }

    #[test]
    fn test_report_json_roundtrip_preserves_sets() {
        let report = score_resume(
            "python docker",
            "python aws docker",
            &catalog(),
            &SimilarityEstimator::uncached(),
            &ScoreWeights::default(),
        );
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: ScoreReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.matched, report.matched);
        assert_eq!(parsed.missing, report.missing);
        for (name, coverage) in &report.details.category_breakdown {
            let recovered = &parsed.details.category_breakdown[name];
            assert_eq!(recovered.matched, coverage.matched);
            assert_eq!(recovered.missing, coverage.missing);
        }
    }
}
