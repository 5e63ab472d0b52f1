use serde::{Deserialize, Serialize};

use crate::scoring::exact::round1;

/// Blend weights for the overall score. Defaults: 70% exact keywords, 30% semantic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub exact: f64,
    pub semantic: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact: 0.7,
            semantic: 0.3,
        }
    }
}

/// overall = round(exact_weight × exact_score + semantic_weight × semantic_pct, 1)
///
/// Both inputs are on the 0 – 100 scale.
pub fn blend(exact_score: f64, semantic_pct: f64, weights: &ScoreWeights) -> f64 {
    round1(weights.exact * exact_score + weights.semantic * semantic_pct)
}
