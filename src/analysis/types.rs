//! Analysis result types as delivered by an analysis service

use serde::{Deserialize, Deserializer, Serialize};

/// Accept either a JSON number or a numeric string.
///
/// Analysis services commonly format percentages with `toFixed`, which
/// arrives as `"1.25"` rather than `1.25`.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Readability and keyword metrics for one analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Flesch reading ease
    #[serde(deserialize_with = "number_or_string")]
    pub readability_score: f64,
    /// Percentage of words taken by the primary keyword
    #[serde(deserialize_with = "number_or_string")]
    pub keyword_density: f64,
    /// Length in words
    pub content_length: usize,
}

/// A suggested keyword with its relevance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub text: String,
    pub score: f64,
}

impl KeywordRecord {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    /// Relevance as a whole percentage.
    pub fn relevance_percent(&self) -> i64 {
        (self.score * 100.0).round() as i64
    }
}

/// Everything an analysis returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metrics: Metrics,
    #[serde(default)]
    pub keywords: Vec<KeywordRecord>,
}

impl AnalysisResult {
    pub fn new(metrics: Metrics, keywords: Vec<KeywordRecord>) -> Self {
        Self { metrics, keywords }
    }

    /// Parse a JSON analysis payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
