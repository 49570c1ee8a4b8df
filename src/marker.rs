//! Emphasis markers for inserted keywords
//!
//! An inserted keyword is wrapped in a `⟦`/`⟧` pair (U+27E6, U+27E7). The
//! presentation layer highlights marked spans; plain-text export strips the
//! pair and recovers the keyword exactly. Neither character is a word
//! character, so cleaned token forms never see them.

use serde::Serialize;
use std::ops::Range;

/// Opening emphasis marker.
pub const OPEN: char = '\u{27E6}';

/// Closing emphasis marker.
pub const CLOSE: char = '\u{27E7}';

/// Wrap a keyword in the emphasis marker pair.
pub fn wrap(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + OPEN.len_utf8() + CLOSE.len_utf8());
    out.push(OPEN);
    out.push_str(keyword);
    out.push(CLOSE);
    out
}

/// Whether `s` contains either marker character.
pub fn contains_marker(s: &str) -> bool {
    s.contains(OPEN) || s.contains(CLOSE)
}

/// A piece of working text, either plain or emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasis(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain(s) | Self::Emphasis(s) => s,
        }
    }

    pub fn is_emphasis(&self) -> bool {
        matches!(self, Self::Emphasis(_))
    }
}

/// Byte ranges of balanced marker pairs, markers included.
///
/// Pairs never nest: an opening marker pairs with the next closing marker
/// unless another opening marker comes first. Leftover markers of either
/// kind are not part of any range.
pub fn emphasis_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut from = 0;

    while let Some(first) = text[from..].find(OPEN).map(|i| from + i) {
        let body = first + OPEN.len_utf8();
        let Some(close) = text[body..].find(CLOSE).map(|i| body + i) else {
            break;
        };
        let open = first + text[first..close].rfind(OPEN).unwrap_or(0);
        from = close + CLOSE.len_utf8();
        ranges.push(open..from);
    }
    ranges
}

/// Split text into plain and emphasized segments.
///
/// Only balanced pairs (see [`emphasis_ranges`]) count as emphasis;
/// unbalanced markers stay in the plain text.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut plain_from = 0;

    for range in emphasis_ranges(text) {
        if range.start > plain_from {
            out.push(Segment::Plain(&text[plain_from..range.start]));
        }
        let body = range.start + OPEN.len_utf8()..range.end - CLOSE.len_utf8();
        out.push(Segment::Emphasis(&text[body]));
        plain_from = range.end;
    }

    if plain_from < text.len() {
        out.push(Segment::Plain(&text[plain_from..]));
    }
    out
}

/// Remove every balanced marker pair, leaving the wrapped text in place.
pub fn strip(text: &str) -> String {
    segments(text).iter().map(Segment::text).collect()
}

/// All emphasized keywords in order of appearance.
pub fn marked(text: &str) -> Vec<&str> {
    segments(text)
        .into_iter()
        .filter(Segment::is_emphasis)
        .map(|s| s.text())
        .collect()
}

/// How many times `keyword` appears wrapped in markers.
pub fn count_marked(text: &str, keyword: &str) -> usize {
    marked(text).into_iter().filter(|m| *m == keyword).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_then_strip_recovers_keyword() {
        let marked = wrap("machine learning");
        assert_eq!(marked, "⟦machine learning⟧");
        assert_eq!(strip(&marked), "machine learning");
    }

    #[test]
    fn strip_keeps_surrounding_text() {
        let text = "Teams ⟦deploy⟧ models with ⟦machine learning⟧ daily.";
        assert_eq!(strip(text), "Teams deploy models with machine learning daily.");
    }

    #[test]
    fn segments_split_plain_and_emphasis() {
        let segs = segments("a ⟦b⟧ c");
        assert_eq!(
            segs,
            vec![
                Segment::Plain("a "),
                Segment::Emphasis("b"),
                Segment::Plain(" c"),
            ]
        );
    }

    #[test]
    fn unbalanced_markers_stay_plain() {
        assert_eq!(strip("open ⟦ only"), "open ⟦ only");
        assert_eq!(strip("close ⟧ only"), "close ⟧ only");
        assert!(marked("open ⟦ only").is_empty());
    }

    #[test]
    fn ranges_cover_balanced_pairs_only() {
        let text = "⟦a⟧ b ⟦c d";
        assert_eq!(emphasis_ranges(text), vec![0..7]);
        assert_eq!(&text[0..7], "⟦a⟧");
        assert!(emphasis_ranges("x ⟧ y ⟦").is_empty());
    }

    #[test]
    fn stray_opener_does_not_swallow_later_pair() {
        let text = "⟦draft our ⟦marketer⟧ plan";
        assert_eq!(marked(text), vec!["marketer"]);
        assert_eq!(strip(text), "⟦draft our marketer plan");
    }

    #[test]
    fn count_marked_matches_exact_keyword() {
        let text = "⟦seo⟧ and ⟦seo tools⟧ and ⟦seo⟧";
        assert_eq!(count_marked(text, "seo"), 2);
        assert_eq!(count_marked(text, "seo tools"), 1);
        assert_eq!(count_marked(text, "tools"), 0);
    }

    #[test]
    fn segment_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Segment::Emphasis("seo")).unwrap();
        assert_eq!(json, r#"{"kind":"emphasis","text":"seo"}"#);
    }
}
