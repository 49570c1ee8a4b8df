//! Optimizer: drives one session against one analyzer
//!
//! `submit` holds `&mut self` across the analysis call, so nothing can
//! insert into the session while the analysis is in flight. If the
//! `submit` future is dropped before it resolves, the session stays
//! pending until the next `submit` supersedes it.

use crate::analysis::{AnalysisError, AnalysisResult, Analyzer};
use crate::session::{InsertOutcome, Session, SessionError, SessionView};
use thiserror::Error;

/// Errors from optimizer operations
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("could not analyze text: {0}")]
    AnalysisFailed(#[source] AnalysisError),
}

/// A session paired with the analyzer that feeds it.
pub struct Optimizer<A> {
    analyzer: A,
    session: Session,
}

impl<A: Analyzer> Optimizer<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_session(analyzer, Session::new())
    }

    pub fn with_session(analyzer: A, session: Session) -> Self {
        Self { analyzer, session }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Analyze `text` and start a fresh session on it.
    ///
    /// On failure the previous working text and inserted keywords are kept.
    pub async fn submit(&mut self, text: &str) -> Result<&AnalysisResult, OptimizerError> {
        let ticket = self.session.begin_analysis(text)?;
        let outcome = self.analyzer.analyze(ticket.text()).await;
        match outcome {
            Ok(result) => Ok(self.session.complete_analysis(ticket, result)?),
            Err(e) => {
                self.session.fail_analysis(&ticket);
                Err(OptimizerError::AnalysisFailed(e))
            }
        }
    }

    /// Insert `keyword` into the current working text.
    pub fn insert(&mut self, keyword: &str) -> Result<InsertOutcome, OptimizerError> {
        Ok(self.session.insert(keyword)?)
    }

    /// Insert each keyword in order, stopping at the first error.
    pub fn insert_all<I, S>(&mut self, keywords: I) -> Result<Vec<InsertOutcome>, OptimizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keywords
            .into_iter()
            .map(|k| self.insert(k.as_ref()))
            .collect()
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
