//! Shared helpers for keyweave integration tests

#![allow(dead_code)]

use keyweave::{AnalysisResult, KeywordRecord, Metrics, Session};

/// Metrics inside every tip threshold.
pub fn healthy_metrics(words: usize) -> Metrics {
    Metrics {
        readability_score: 70.0,
        keyword_density: 1.5,
        content_length: words,
    }
}

/// An analysis result suggesting `keywords` with falling relevance.
pub fn canned_result(keywords: &[&str]) -> AnalysisResult {
    let records = keywords
        .iter()
        .enumerate()
        .map(|(i, k)| KeywordRecord::new(*k, 1.0 - i as f64 * 0.1))
        .collect();
    AnalysisResult::new(healthy_metrics(10), records)
}

/// A session whose analysis of `text` has completed.
pub fn ready_session(text: &str) -> Session {
    let mut session = Session::new();
    let ticket = session.begin_analysis(text).expect("non-empty text");
    session
        .complete_analysis(ticket, canned_result(&[]))
        .expect("ticket is current");
    session
}
