//! Text analysis boundary
//!
//! The placement core never computes keywords itself: it receives them,
//! together with readability metrics, from an `Analyzer`. This module
//! defines that boundary and the result types that cross it.
//!
//! # Implementations
//!
//! - **HeuristicAnalyzer**: local Flesch reading ease plus frequency-ranked
//!   keywords
//! - **MockAnalyzer**: preconfigured response or failure, for tests
//!
//! # Example
//!
//! ```ignore
//! use keyweave::analysis::{Analyzer, HeuristicAnalyzer};
//!
//! let analyzer = HeuristicAnalyzer::default();
//! let result = analyzer.analyze("Rust makes systems programming safe.").await?;
//! for keyword in &result.keywords {
//!     println!("{} {}%", keyword.text, keyword.relevance_percent());
//! }
//! ```

mod client;
mod heuristic;
mod types;

pub use client::{AnalysisError, Analyzer, MockAnalyzer};
pub use heuristic::{HeuristicAnalyzer, HeuristicSettings};
pub use types::{AnalysisResult, KeywordRecord, Metrics};
