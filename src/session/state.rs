//! Session: working text, inserted keywords and the analysis generation

use crate::analysis::AnalysisResult;
use crate::marker;
use crate::placement::{PlacementWeights, Scorer, Span, SpanDecision};
use crate::text::WorkingText;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors raised by session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("text to analyze is empty")]
    EmptyText,

    #[error("keyword is empty")]
    EmptyKeyword,

    #[error("keyword contains an emphasis marker: {0}")]
    MarkerInKeyword(String),

    #[error("no analysis has completed yet")]
    NoAnalysis,

    #[error("analysis {0} is still pending")]
    AnalysisPending(u64),

    #[error("stale analysis result (generation {ticket}, current {current})")]
    StaleAnalysis { ticket: u64, current: u64 },
}

/// Handle for one in-flight analysis.
///
/// Returned by [`Session::begin_analysis`] and handed back to
/// [`Session::complete_analysis`] or [`Session::fail_analysis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
    text: String,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The text submitted for analysis.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What an `insert` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The keyword was inserted earlier; nothing changed
    AlreadyInserted,
    /// The keyword already occurs in the text; recorded without editing
    AlreadyPresent,
    /// The span was replaced by the marked keyword
    Replaced(Span),
    /// The marked keyword was added after the last token
    Appended,
}

impl InsertOutcome {
    /// Whether the working text was edited.
    pub fn changed_text(&self) -> bool {
        matches!(self, Self::Replaced(_) | Self::Appended)
    }
}

/// Trim a keyword and collapse its inner whitespace to single spaces.
///
/// Splicing re-joins tokens with single spaces, so only the normalized
/// form survives later edits.
fn normalize_keyword(keyword: &str) -> String {
    keyword.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone)]
struct CompletedAnalysis {
    generation: u64,
    result: AnalysisResult,
    completed_at: DateTime<Utc>,
}

/// One user's annotation session.
///
/// Owns the working text and the inserted-keyword ledger. A single writer
/// drives it: analyses are tracked by a monotonically increasing
/// generation so that results of superseded analyses are discarded, and
/// no insertion runs while an analysis is pending.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    scorer: Scorer,
    generation: u64,
    pending: Option<u64>,
    current: Option<CompletedAnalysis>,
    working_text: String,
    inserted: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the stock placement weights.
    pub fn new() -> Self {
        Self::with_weights(PlacementWeights::default())
    }

    pub fn with_weights(weights: PlacementWeights) -> Self {
        Self {
            id: Uuid::new_v4(),
            scorer: Scorer::new(weights),
            generation: 0,
            pending: None,
            current: None,
            working_text: String::new(),
            inserted: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Generation of the most recently started analysis.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Working text including emphasis markers.
    pub fn working_text(&self) -> &str {
        &self.working_text
    }

    /// Working text with emphasis markers removed.
    pub fn plain_text(&self) -> String {
        marker::strip(&self.working_text)
    }

    /// Inserted keywords in insertion order.
    pub fn inserted(&self) -> &[String] {
        &self.inserted
    }

    /// Whether `keyword`, with its whitespace normalized, was inserted.
    pub fn is_inserted(&self, keyword: &str) -> bool {
        self.inserted.contains(&normalize_keyword(keyword))
    }

    /// Result of the analysis the working text belongs to.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.current.as_ref().map(|c| &c.result)
    }

    /// Generation of the analysis the working text belongs to.
    pub fn analysis_generation(&self) -> Option<u64> {
        self.current.as_ref().map(|c| c.generation)
    }

    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|c| c.completed_at)
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Start a new analysis of `text`.
    ///
    /// Supersedes any analysis still pending. Working text and inserted
    /// keywords stay as they are until the analysis completes.
    pub fn begin_analysis(
        &mut self,
        text: impl Into<String>,
    ) -> Result<AnalysisTicket, SessionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        self.generation += 1;
        if let Some(previous) = self.pending.replace(self.generation) {
            debug!(
                session = %self.id,
                previous,
                generation = self.generation,
                "superseding pending analysis"
            );
        }

        Ok(AnalysisTicket {
            generation: self.generation,
            text,
        })
    }

    /// Apply a finished analysis.
    ///
    /// Only the pending generation is accepted. On success the working text
    /// becomes the analyzed text exactly and the inserted set is cleared.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: AnalysisResult,
    ) -> Result<&AnalysisResult, SessionError> {
        if self.pending != Some(ticket.generation) {
            warn!(
                session = %self.id,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale analysis result"
            );
            return Err(SessionError::StaleAnalysis {
                ticket: ticket.generation,
                current: self.generation,
            });
        }

        self.pending = None;
        self.working_text = ticket.text;
        self.inserted.clear();
        info!(
            session = %self.id,
            generation = ticket.generation,
            keywords = result.keywords.len(),
            words = result.metrics.content_length,
            "analysis complete"
        );

        let completed = self.current.insert(CompletedAnalysis {
            generation: ticket.generation,
            result,
            completed_at: Utc::now(),
        });
        Ok(&completed.result)
    }

    /// Record that the analysis for `ticket` failed.
    ///
    /// Clears the pending flag if `ticket` is still current and returns
    /// whether it was. Working text and inserted keywords are untouched.
    pub fn fail_analysis(&mut self, ticket: &AnalysisTicket) -> bool {
        if self.pending == Some(ticket.generation) {
            self.pending = None;
            warn!(session = %self.id, generation = ticket.generation, "analysis failed");
            true
        } else {
            false
        }
    }

    /// Insert `keyword` into the working text.
    ///
    /// Repeating an inserted keyword is a no-op. A keyword already present
    /// in the text is recorded without editing.
    pub fn insert(&mut self, keyword: &str) -> Result<InsertOutcome, SessionError> {
        if let Some(generation) = self.pending {
            return Err(SessionError::AnalysisPending(generation));
        }
        if self.current.is_none() {
            return Err(SessionError::NoAnalysis);
        }
        let keyword = normalize_keyword(keyword);
        if keyword.is_empty() {
            return Err(SessionError::EmptyKeyword);
        }
        if marker::contains_marker(&keyword) {
            return Err(SessionError::MarkerInKeyword(keyword));
        }
        if self.inserted.contains(&keyword) {
            return Ok(InsertOutcome::AlreadyInserted);
        }

        let text = WorkingText::parse(&self.working_text);
        let outcome = match self.scorer.select(&text, &keyword) {
            SpanDecision::AlreadyPresent => InsertOutcome::AlreadyPresent,
            SpanDecision::Replace(span) => {
                self.working_text = text.splice(span.start, span.end, &marker::wrap(&keyword));
                InsertOutcome::Replaced(span)
            }
            SpanDecision::Append => {
                self.working_text = text.append(&marker::wrap(&keyword));
                InsertOutcome::Appended
            }
        };

        info!(session = %self.id, keyword = %keyword, outcome = ?outcome, "keyword inserted");
        self.inserted.push(keyword);
        Ok(outcome)
    }
}
