//! Keyword placement
//!
//! Decides where in the working text a keyword goes. Pure: the same text,
//! phrase and weights always give the same decision, and no input makes it
//! fail.

mod scorer;
mod weights;

pub use scorer::{score_token, select_span, KeywordPhrase, Scorer, Span, SpanDecision};
pub use weights::{PlacementWeights, STRUCTURAL_CONNECTIVES};
