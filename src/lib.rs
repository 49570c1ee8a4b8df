//! Keyweave: Keyword Placement Engine
//!
//! Given prose and a list of suggested keywords, decides where each keyword
//! belongs and splices it into the text in place of existing words rather
//! than appending it.
//!
//! # Core Concepts
//!
//! - **Working text**: the submitted text as modified by insertions so far
//! - **Placement**: scoring each word against a keyword by prefix overlap
//!   and sentence position, then choosing the span to replace
//! - **Session**: working text plus the ledger of inserted keywords, reset
//!   whenever a new analysis completes
//! - **Emphasis markers**: `⟦keyword⟧`, which the presentation layer
//!   highlights and plain-text export strips
//!
//! # Example
//!
//! ```
//! use keyweave::{AnalysisResult, Metrics, Session};
//!
//! let mut session = Session::new();
//! let ticket = session.begin_analysis("Results improve when models learn").unwrap();
//! let result = AnalysisResult::new(
//!     Metrics { readability_score: 70.0, keyword_density: 1.0, content_length: 5 },
//!     Vec::new(),
//! );
//! session.complete_analysis(ticket, result).unwrap();
//!
//! session.insert("machine learning").unwrap();
//! assert_eq!(session.working_text(), "Results improve when models ⟦machine learning⟧");
//! assert_eq!(session.plain_text(), "Results improve when models machine learning");
//! ```

pub mod analysis;
pub mod config;
pub mod marker;
pub mod optimizer;
pub mod placement;
pub mod session;
pub mod text;
pub mod tips;

pub use analysis::{
    AnalysisError, AnalysisResult, Analyzer, HeuristicAnalyzer, HeuristicSettings, KeywordRecord,
    Metrics, MockAnalyzer,
};
pub use config::{Config, ConfigError};
pub use optimizer::{Optimizer, OptimizerError};
pub use placement::{KeywordPhrase, PlacementWeights, Scorer, Span, SpanDecision};
pub use session::{AnalysisTicket, InsertOutcome, KeywordView, Session, SessionError, SessionView};
pub use text::{Token, WorkingText};
pub use tips::{expert_tips, optimizer_tips, Tip};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
