//! Scoring weights for keyword placement

use serde::{Deserialize, Serialize};

/// Words the scorer refuses to displace.
pub const STRUCTURAL_CONNECTIVES: [&str; 5] =
    ["however", "therefore", "because", "although", "meanwhile"];

/// Tunable constants of the placement heuristic.
///
/// `Default` yields the stock heuristic; configuration may override any
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementWeights {
    /// Added when the token contains a keyword component's prefix
    pub strong_match: i32,
    /// Added when a keyword component contains the token's prefix
    pub partial_match: i32,
    /// Added for the first token and tokens following a period
    pub sentence_start: i32,
    /// Subtracted for structural connectives
    pub connective_penalty: i32,
    /// Minimum score for a strong anchor
    pub threshold: i32,
    /// Number of leading characters compared between token and component
    pub prefix_len: usize,
    /// Tokens whose cleaned form is shorter than this are never anchors
    pub min_token_len: usize,
    /// Preferred anchor when nothing reaches the threshold
    pub fallback_index: usize,
    /// Cleaned words penalized by `connective_penalty`
    pub connectives: Vec<String>,
}

impl Default for PlacementWeights {
    fn default() -> Self {
        Self {
            strong_match: 5,
            partial_match: 3,
            sentence_start: 3,
            connective_penalty: 10,
            threshold: 3,
            prefix_len: 3,
            min_token_len: 3,
            fallback_index: 3,
            connectives: STRUCTURAL_CONNECTIVES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PlacementWeights {
    pub fn is_connective(&self, clean: &str) -> bool {
        self.connectives.iter().any(|c| c == clean)
    }
}
