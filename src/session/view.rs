//! Read-only snapshot of a session for the presentation layer

use super::state::Session;
use crate::analysis::Metrics;
use crate::marker::{self, Segment};
use crate::tips::{expert_tips, optimizer_tips, Tip};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A suggested keyword and whether it has been inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordView {
    pub text: String,
    pub relevance_percent: i64,
    pub inserted: bool,
}

/// Everything a renderer needs, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub generation: u64,
    pub pending: bool,
    pub analyzed_at: Option<DateTime<Utc>>,
    /// Working text with emphasis markers
    pub working_text: String,
    /// Working text with markers stripped, for export
    pub plain_text: String,
    pub inserted: Vec<String>,
    pub keywords: Vec<KeywordView>,
    pub metrics: Option<Metrics>,
    pub tips: Vec<Tip>,
    /// Fixed usage advice, present once an analysis has completed
    pub expert_tips: Vec<Tip>,
}

impl SessionView {
    /// Plain and emphasized pieces of the working text.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        marker::segments(&self.working_text)
    }
}

impl Session {
    /// Snapshot the session for rendering.
    pub fn view(&self) -> SessionView {
        let analysis = self.analysis();
        let keywords = analysis
            .map(|a| {
                a.keywords
                    .iter()
                    .map(|k| KeywordView {
                        text: k.text.clone(),
                        relevance_percent: k.relevance_percent(),
                        inserted: self.is_inserted(&k.text),
                    })
                    .collect()
            })
            .unwrap_or_default();

        SessionView {
            session_id: self.id(),
            generation: self.generation(),
            pending: self.is_pending(),
            analyzed_at: self.analyzed_at(),
            working_text: self.working_text().to_string(),
            plain_text: self.plain_text(),
            inserted: self.inserted().to_vec(),
            keywords,
            metrics: analysis.map(|a| a.metrics.clone()),
            tips: analysis.map(|a| optimizer_tips(&a.metrics)).unwrap_or_default(),
            expert_tips: analysis.map(|_| expert_tips()).unwrap_or_default(),
        }
    }
}
