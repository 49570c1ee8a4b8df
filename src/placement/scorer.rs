//! Span selection: which words of the working text a keyword replaces
//!
//! Every token is scored against the keyword's components by prefix
//! overlap, with a bonus for sentence-initial positions and a penalty for
//! structural connectives. The best token anchors the replacement span;
//! when nothing scores high enough a fixed fallback position is used.

use super::weights::PlacementWeights;
use crate::text::{Token, WorkingText};
use serde::Serialize;
use tracing::debug;

/// A keyword phrase split into lower-cased components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPhrase {
    text: String,
    lowered: String,
    components: Vec<String>,
}

impl KeywordPhrase {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lowered = text.trim().to_lowercase();
        let components = lowered.split_whitespace().map(str::to_string).collect();
        Self {
            text,
            lowered,
            components,
        }
    }

    /// The phrase as supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn word_count(&self) -> usize {
        self.components.len()
    }

    pub fn is_blank(&self) -> bool {
        self.components.is_empty()
    }
}

/// Contiguous inclusive token range chosen for replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    /// Inclusive
    pub end: usize,
    /// Displaced tokens joined with single spaces
    pub original: String,
}

impl Span {
    fn covering(text: &WorkingText, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            original: text.join_range(start, end + 1),
        }
    }

    /// Number of tokens displaced.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of span selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanDecision {
    /// The keyword already occurs in the text; nothing to replace
    AlreadyPresent,
    /// Replace this span with the marked keyword
    Replace(Span),
    /// Every token is part of an earlier insertion; add after the last one
    Append,
}

/// First `n` characters of `s`.
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Score the token at `index` against `phrase`.
///
/// Tokens whose cleaned form is shorter than `min_token_len` score 0 with
/// no bonus or penalty. Returns `None` for tokens inside an emphasized
/// span, which are never candidates.
pub fn score_token(
    text: &WorkingText,
    index: usize,
    phrase: &KeywordPhrase,
    weights: &PlacementWeights,
) -> Option<i32> {
    let token = text.get(index)?;
    if token.is_locked() {
        return None;
    }
    if token.clean_len() < weights.min_token_len {
        return Some(0);
    }

    let clean = token.clean();
    let token_prefix = prefix(clean, weights.prefix_len);
    let mut score = 0;

    for component in phrase.components() {
        if clean.contains(prefix(component, weights.prefix_len)) {
            score += weights.strong_match;
        } else if component.contains(token_prefix) {
            score += weights.partial_match;
        }
    }

    let sentence_initial = index == 0 || text.get(index - 1).is_some_and(Token::ends_sentence);
    if sentence_initial {
        score += weights.sentence_start;
    }

    if weights.is_connective(clean) {
        score -= weights.connective_penalty;
    }

    Some(score)
}

/// Pick the span of `text` that `phrase` should replace.
///
/// Ties on the top score go to the lowest token index.
pub fn select_span(
    text: &WorkingText,
    phrase: &KeywordPhrase,
    weights: &PlacementWeights,
) -> SpanDecision {
    if phrase.is_blank() || text.joined().to_lowercase().contains(&phrase.lowered) {
        debug!(keyword = phrase.as_str(), "keyword already present");
        return SpanDecision::AlreadyPresent;
    }

    let best = (0..text.len())
        .filter_map(|i| score_token(text, i, phrase, weights).map(|s| (i, s)))
        .fold(None, |best: Option<(usize, i32)>, (i, s)| match best {
            Some((_, top)) if top >= s => best,
            _ => Some((i, s)),
        });

    if let Some((anchor, score)) = best.filter(|&(_, s)| s >= weights.threshold) {
        let wanted = phrase.word_count().max(1);
        let width = text.tokens()[anchor..]
            .iter()
            .take(wanted)
            .take_while(|t| !t.is_locked())
            .count();
        let span = Span::covering(text, anchor, anchor + width - 1);
        debug!(
            keyword = phrase.as_str(),
            anchor,
            score,
            width,
            original = %span.original,
            "strong anchor"
        );
        return SpanDecision::Replace(span);
    }

    match fallback_anchor(text, weights.fallback_index) {
        Some(index) => {
            debug!(keyword = phrase.as_str(), index, "fallback anchor");
            SpanDecision::Replace(Span::covering(text, index, index))
        }
        None => {
            debug!(keyword = phrase.as_str(), "no free token, appending");
            SpanDecision::Append
        }
    }
}

/// `min(preferred, last)`, moved to the nearest unlocked token (forward
/// first, then backward).
fn fallback_anchor(text: &WorkingText, preferred: usize) -> Option<usize> {
    let last = text.last_index()?;
    let target = preferred.min(last);
    let free = |i: &usize| text.get(*i).is_some_and(|t| !t.is_locked());
    (target..=last)
        .find(free)
        .or_else(|| (0..target).rev().find(free))
}

/// Span selection bound to a set of weights.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: PlacementWeights,
}

impl Scorer {
    pub fn new(weights: PlacementWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PlacementWeights {
        &self.weights
    }

    pub fn select(&self, text: &WorkingText, keyword: &str) -> SpanDecision {
        select_span(text, &KeywordPhrase::new(keyword), &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(text: &str, keyword: &str) -> SpanDecision {
        Scorer::default().select(&WorkingText::parse(text), keyword)
    }

    fn replaced(decision: SpanDecision) -> Span {
        match decision {
            SpanDecision::Replace(span) => span,
            other => panic!("expected a replacement, got {:?}", other),
        }
    }

    #[test]
    fn phrase_components_are_lowercased() {
        let phrase = KeywordPhrase::new("  Machine   Learning ");
        assert_eq!(phrase.components(), ["machine", "learning"]);
        assert_eq!(phrase.as_str(), "  Machine   Learning ");
        assert_eq!(phrase.word_count(), 2);
    }

    #[test]
    fn prefix_handles_short_and_multibyte_words() {
        assert_eq!(prefix("seo", 3), "seo");
        assert_eq!(prefix("ai", 3), "ai");
        assert_eq!(prefix("événement", 3), "évé");
    }

    #[test]
    fn present_keyword_is_not_replaced() {
        assert_eq!(select("the cat sat", "cat"), SpanDecision::AlreadyPresent);
        assert_eq!(select("The Cat sat", "cAT"), SpanDecision::AlreadyPresent);
    }

    #[test]
    fn present_check_spans_line_breaks() {
        assert_eq!(
            select("we study machine\nlearning daily", "machine learning"),
            SpanDecision::AlreadyPresent
        );
    }

    #[test]
    fn blank_keyword_counts_as_present() {
        assert_eq!(select("some words here", "   "), SpanDecision::AlreadyPresent);
    }

    #[test]
    fn strong_match_scores_five_per_component() {
        let text = WorkingText::parse("we publish marketing reports");
        let phrase = KeywordPhrase::new("market");
        let w = PlacementWeights::default();
        assert_eq!(score_token(&text, 2, &phrase, &w), Some(5));
    }

    #[test]
    fn partial_match_scores_three() {
        let w = PlacementWeights::default();
        let text = WorkingText::parse("we buy markets");
        let phrase = KeywordPhrase::new("supermarkets");
        // "markets" lacks "sup", but "supermarkets" contains "mar".
        assert_eq!(score_token(&text, 2, &phrase, &w), Some(3));
    }

    #[test]
    fn scores_accumulate_across_components() {
        let text = WorkingText::parse("we run content marketing plans");
        let phrase = KeywordPhrase::new("content market");
        let w = PlacementWeights::default();
        assert_eq!(score_token(&text, 2, &phrase, &w), Some(5));
        let phrase = KeywordPhrase::new("marketer markets");
        assert_eq!(score_token(&text, 3, &phrase, &w), Some(10));
    }

    #[test]
    fn sentence_start_bonus() {
        let text = WorkingText::parse("Quiet rooms. Bright lamps glow");
        let phrase = KeywordPhrase::new("zzz");
        let w = PlacementWeights::default();
        assert_eq!(score_token(&text, 0, &phrase, &w), Some(3));
        assert_eq!(score_token(&text, 1, &phrase, &w), Some(0));
        assert_eq!(score_token(&text, 2, &phrase, &w), Some(3));
        assert_eq!(score_token(&text, 3, &phrase, &w), Some(0));
    }

    #[test]
    fn short_tokens_score_zero() {
        let text = WorkingText::parse("an ox, up");
        let phrase = KeywordPhrase::new("ox");
        let w = PlacementWeights::default();
        for i in 0..text.len() {
            assert_eq!(score_token(&text, i, &phrase, &w), Some(0));
        }
    }

    #[test]
    fn zero_threshold_lets_short_token_anchor() {
        let weights = PlacementWeights {
            threshold: 0,
            ..PlacementWeights::default()
        };
        let decision = Scorer::new(weights).select(&WorkingText::parse("an ox up"), "zzz");
        assert_eq!(replaced(decision).start, 0);
        // The stock threshold falls back instead.
        assert_eq!(replaced(select("an ox up", "zzz")).start, 2);
    }

    #[test]
    fn connective_penalty_applies_to_cleaned_token() {
        let text = WorkingText::parse("Therefore, we act");
        let phrase = KeywordPhrase::new("theory");
        let w = PlacementWeights::default();
        // +5 strong ("the"), +3 sentence start, -10 connective
        assert_eq!(score_token(&text, 0, &phrase, &w), Some(-2));
    }

    #[test]
    fn connective_is_avoided_when_alternative_exists() {
        let span = replaced(select("However we proceed carefully", "however proceed"));
        assert_eq!(span.start, 2);
        assert_eq!(span.end, 3);
        assert_eq!(span.original, "proceed carefully");
    }

    #[test]
    fn connective_without_alternative_uses_fallback() {
        let span = replaced(select("However we proceed carefully", "howl"));
        assert_eq!((span.start, span.end), (3, 3));
        assert_eq!(span.original, "carefully");
    }

    #[test]
    fn multi_word_keyword_replaces_as_many_tokens() {
        let span = replaced(select(
            "Modern teams apply statistical methods to learn patterns quickly",
            "machine learning",
        ));
        assert_eq!((span.start, span.end), (6, 7));
        assert_eq!(span.width(), 2);
        assert_eq!(span.original, "learn patterns");
    }

    #[test]
    fn multi_word_span_truncates_at_text_end() {
        let span = replaced(select("Results improve when models learn", "machine learning"));
        assert_eq!((span.start, span.end), (4, 4));
        assert_eq!(span.original, "learn");
    }

    #[test]
    fn single_word_keyword_replaces_one_token() {
        let span = replaced(select("Our store sells marketing books", "marketer"));
        assert_eq!((span.start, span.end), (3, 3));
        assert_eq!(span.original, "marketing");
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // Both "marketing" tokens score 5; neither is sentence-initial.
        let span = replaced(select("we like marketing and marketing", "marketer"));
        assert_eq!(span.start, 2);
    }

    #[test]
    fn fallback_on_two_short_tokens() {
        let span = replaced(select("x y", "zzz"));
        assert_eq!((span.start, span.end), (1, 1));
        assert_eq!(span.original, "y");
    }

    #[test]
    fn fallback_caps_at_index_three() {
        let span = replaced(select("a b c d e f", "zzz"));
        assert_eq!((span.start, span.end), (3, 3));
        assert_eq!(span.original, "d");
    }

    #[test]
    fn single_token_text_resolves() {
        let span = replaced(select("ok", "zzz"));
        assert_eq!((span.start, span.end), (0, 0));
    }

    #[test]
    fn empty_text_appends() {
        assert_eq!(select("", "zzz"), SpanDecision::Append);
        assert_eq!(select(" \n ", "zzz"), SpanDecision::Append);
    }

    #[test]
    fn marked_tokens_are_never_anchors() {
        // Without the lock, "⟦marketing⟧" would win with 5 + 3.
        let span = replaced(select("⟦marketing⟧ plans for markets", "marketer"));
        assert_eq!(span.start, 3);
        assert_eq!(span.original, "markets");
    }

    #[test]
    fn multi_word_span_stops_before_marked_token() {
        let span = replaced(select("we learn ⟦seo⟧ daily", "learning paths"));
        assert_eq!((span.start, span.end), (1, 1));
        assert_eq!(span.original, "learn");
    }

    #[test]
    fn fallback_skips_marked_tokens() {
        let span = replaced(select("a b c ⟦seo tools⟧ x", "zzz"));
        assert_eq!(span.start, 5);
        let span = replaced(select("a b c ⟦seo tools⟧", "zzz"));
        assert_eq!(span.start, 2);
    }

    #[test]
    fn fully_marked_text_appends() {
        assert_eq!(select("⟦seo⟧ ⟦tools⟧", "zzz"), SpanDecision::Append);
    }

    #[test]
    fn custom_weights_change_threshold() {
        let weights = PlacementWeights {
            threshold: 6,
            ..Default::default()
        };
        let scorer = Scorer::new(weights);
        // "marketing" scores 5, below the raised threshold.
        let decision = scorer.select(&WorkingText::parse("we like marketing a lot"), "marketer");
        assert_eq!(
            decision,
            SpanDecision::Replace(Span {
                start: 3,
                end: 3,
                original: "a".to_string(),
            })
        );
    }
}
