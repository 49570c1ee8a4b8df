//! Optimizer tips derived from analysis metrics, plus the fixed expert
//! usage tips

use crate::analysis::Metrics;
use serde::Serialize;

/// Readability below this suggests simplifying.
pub const MIN_READABILITY: f64 = 60.0;

/// Keyword density (percent) below this suggests adding keywords.
pub const MIN_KEYWORD_DENSITY: f64 = 0.5;

/// Keyword density (percent) above this suggests keyword stuffing.
pub const MAX_KEYWORD_DENSITY: f64 = 3.0;

/// A single piece of optimization advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tip {
    HeaderTags,
    MetaDescription,
    Links,
    ImproveReadability,
    AddPrimaryKeywords,
    ReduceKeywordStuffing,
    EachTermOnce,
    KeywordsInHeadings,
    LsiKeywords,
}

impl Tip {
    pub fn message(&self) -> &'static str {
        match self {
            Self::HeaderTags => {
                "Include relevant header tags (H1, H2, H3) to structure your content"
            }
            Self::MetaDescription => {
                "Add meta description between 150-160 characters with keywords"
            }
            Self::Links => "Adding sufficient internal and external links for improved SEO",
            Self::ImproveReadability => {
                "Improve readability by using shorter sentences and simpler words"
            }
            Self::AddPrimaryKeywords => {
                "Consider adding primary keywords (0.5%-1%) to improve search visibility"
            }
            Self::ReduceKeywordStuffing => {
                "Keyword density too high (above 3%). Try to reduce keyword stuffing"
            }
            Self::EachTermOnce => "Include each key SEO term at least once",
            Self::KeywordsInHeadings => {
                "Place important keywords in headings and the first paragraph"
            }
            Self::LsiKeywords => {
                "Consider LSI (Latent Semantic Indexing) keywords for improved ranking"
            }
        }
    }
}

impl std::fmt::Display for Tip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Tips for `metrics`: the three general tips, then any triggered by
/// thresholds.
pub fn optimizer_tips(metrics: &Metrics) -> Vec<Tip> {
    let mut tips = vec![Tip::HeaderTags, Tip::MetaDescription, Tip::Links];
    if metrics.readability_score < MIN_READABILITY {
        tips.push(Tip::ImproveReadability);
    }
    if metrics.keyword_density < MIN_KEYWORD_DENSITY {
        tips.push(Tip::AddPrimaryKeywords);
    }
    if metrics.keyword_density > MAX_KEYWORD_DENSITY {
        tips.push(Tip::ReduceKeywordStuffing);
    }
    tips
}

/// Usage advice shown with every analysis, independent of metrics.
pub fn expert_tips() -> Vec<Tip> {
    vec![Tip::EachTermOnce, Tip::KeywordsInHeadings, Tip::LsiKeywords]
}
