//! Analyzer trait: the boundary to whatever produces keywords and metrics
//!
//! Two implementations ship with the crate:
//! - `HeuristicAnalyzer`: computes metrics and keywords locally
//! - `MockAnalyzer`: returns a preconfigured result (testing)

use super::types::AnalysisResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Errors from an analysis call.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analyzer not available: {0}")]
    Unavailable(String),
    #[error("analysis failed: {0}")]
    Failed(String),
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Produces keyword suggestions and metrics for a text.
///
/// Abstracts over transport (local, remote service, mock) so the session
/// logic does not depend on where analysis happens.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl<T: Analyzer + ?Sized> Analyzer for std::sync::Arc<T> {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(text).await
    }
}

enum MockBehavior {
    Respond(AnalysisResult),
    Fail(String),
    Unavailable,
}

/// Mock analyzer for testing; returns a preconfigured result.
pub struct MockAnalyzer {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    /// Always return `result`.
    pub fn responding(result: AnalysisResult) -> Self {
        Self {
            behavior: MockBehavior::Respond(result),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `AnalysisError::Failed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `AnalysisError::Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            behavior: MockBehavior::Unavailable,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `analyze` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.behavior {
            MockBehavior::Respond(result) => Ok(result.clone()),
            MockBehavior::Fail(message) => Err(AnalysisError::Failed(message.clone())),
            MockBehavior::Unavailable => Err(AnalysisError::Unavailable(
                "mock analyzer configured as unavailable".to_string(),
            )),
        }
    }
}
