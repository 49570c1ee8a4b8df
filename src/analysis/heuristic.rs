//! Local analyzer: Flesch reading ease, keyword frequency and density
//!
//! Runs without any external service. Keywords are the most frequent
//! content words; density is the share of words taken by the top keyword.

use super::client::{AnalysisError, Analyzer};
use super::types::{AnalysisResult, KeywordRecord, Metrics};
use crate::text::WorkingText;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "because", "been", "before", "being",
    "below", "between", "both", "could", "does", "doing", "down", "during", "each", "even",
    "every", "from", "further", "have", "having", "here", "however", "into", "just", "many",
    "more", "most", "much", "must", "only", "other", "ours", "over", "same", "should", "some",
    "such", "than", "that", "their", "theirs", "them", "then", "there", "therefore", "these",
    "they", "this", "those", "through", "under", "until", "upon", "very", "were", "what",
    "when", "where", "which", "while", "will", "with", "within", "without", "would", "your",
    "yours",
];

/// Tuning for `HeuristicAnalyzer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicSettings {
    /// Maximum number of keywords returned
    pub max_keywords: usize,
    /// Minimum cleaned length of a keyword candidate
    pub min_keyword_len: usize,
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            max_keywords: 10,
            min_keyword_len: 4,
        }
    }
}

/// Analyzer that computes everything from the text itself.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnalyzer {
    settings: HeuristicSettings,
}

impl HeuristicAnalyzer {
    pub fn new(settings: HeuristicSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &HeuristicSettings {
        &self.settings
    }

    /// Analyze `text` synchronously.
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        let words = WorkingText::parse(text);
        let word_count = words.len();
        if word_count == 0 {
            return AnalysisResult::new(
                Metrics {
                    readability_score: 0.0,
                    keyword_density: 0.0,
                    content_length: 0,
                },
                Vec::new(),
            );
        }

        let syllables: usize = words.tokens().iter().map(|t| count_syllables(t.raw())).sum();
        let readability = flesch_reading_ease(word_count, count_sentences(text), syllables);

        let ranked = self.rank_keywords(&words);
        let top_count = ranked.first().map(|(_, count)| *count).unwrap_or(0);
        let density = round_to(top_count as f64 / word_count as f64 * 100.0, 2);

        let keywords = ranked
            .into_iter()
            .map(|(word, count)| {
                KeywordRecord::new(word, round_to(count as f64 / top_count as f64, 2))
            })
            .collect::<Vec<_>>();

        debug!(
            words = word_count,
            readability,
            density,
            keywords = keywords.len(),
            "heuristic analysis"
        );

        AnalysisResult::new(
            Metrics {
                readability_score: readability,
                keyword_density: density,
                content_length: word_count,
            },
            keywords,
        )
    }

    /// Candidate words with their counts, most frequent first, ties
    /// alphabetical.
    fn rank_keywords(&self, words: &WorkingText) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in words.tokens() {
            let clean = token.clean();
            if token.clean_len() < self.settings.min_keyword_len
                || STOPWORDS.contains(&clean)
                || clean.chars().all(|c| c.is_numeric())
            {
                continue;
            }
            *counts.entry(clean).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.settings.max_keywords);
        ranked
    }
}

#[async_trait]
impl Analyzer for HeuristicAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::Failed("no text to analyze".to_string()));
        }
        Ok(self.analyze_text(text))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Flesch reading ease, rounded to one decimal.
fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    let words = words.max(1) as f64;
    let sentences = sentences.max(1) as f64;
    let score = 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables as f64 / words);
    round_to(score, 1)
}

/// Non-empty runs of text terminated by `.`, `!` or `?` (at least one).
fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1)
}

/// Vowel groups in a word, dropping a silent trailing `e`.
fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    if groups > 1 && letters[n - 1] == 'e' && letters[n - 2] != 'l' && !is_vowel(letters[n - 2]) {
        groups -= 1;
    }
    groups.max(1)
}
