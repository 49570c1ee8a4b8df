//! Token and WorkingText: whitespace tokenization of the canonical string

use crate::marker;

/// A single whitespace-delimited word of working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: String,
    clean: String,
    locked: bool,
}

impl Token {
    /// Build a token outside of any marked span.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let clean = clean_word(&raw);
        Self {
            raw,
            clean,
            locked: false,
        }
    }

    /// The token exactly as it appears in the text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lower-cased form with every non-word character removed.
    pub fn clean(&self) -> &str {
        &self.clean
    }

    /// Length of the cleaned form in characters.
    pub fn clean_len(&self) -> usize {
        self.clean.chars().count()
    }

    /// Whether this token is part of an emphasized (already inserted) span.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the raw token ends a sentence.
    pub fn ends_sentence(&self) -> bool {
        self.raw.ends_with('.')
    }
}

/// Lower-case a word and drop everything that is not alphanumeric or `_`.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Working text as an ordered sequence of tokens.
///
/// Rebuilt from the canonical string on every engine step. Joining the raw
/// tokens with single spaces yields the next canonical string, so runs of
/// whitespace and line breaks collapse after the first mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingText {
    tokens: Vec<Token>,
}

impl WorkingText {
    /// Tokenize `text` on whitespace, locking tokens that overlap a
    /// balanced emphasis marker pair.
    pub fn parse(text: &str) -> Self {
        let emphasized = marker::emphasis_ranges(text);
        let tokens = text
            .split_whitespace()
            .map(|raw| {
                // `raw` is a subslice of `text`
                let start = raw.as_ptr() as usize - text.as_ptr() as usize;
                let end = start + raw.len();
                let locked = emphasized.iter().any(|r| r.start < end && start < r.end);
                Token {
                    raw: raw.to_string(),
                    clean: clean_word(raw),
                    locked,
                }
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the last token, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.tokens.len().checked_sub(1)
    }

    /// Raw tokens joined with single spaces.
    pub fn joined(&self) -> String {
        self.join_range(0, self.tokens.len())
    }

    /// Raw tokens in `[start, end)` joined with single spaces.
    pub fn join_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        let start = start.min(end);
        self.tokens[start..end]
            .iter()
            .map(Token::raw)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace tokens `[start, end]` (inclusive) with `replacement` and
    /// return the new canonical string.
    pub fn splice(&self, start: usize, end: usize, replacement: &str) -> String {
        let end = end.min(self.last_index().unwrap_or(0));
        let mut parts: Vec<&str> = Vec::with_capacity(self.tokens.len());
        parts.extend(self.tokens[..start.min(self.tokens.len())].iter().map(Token::raw));
        parts.push(replacement);
        if end + 1 < self.tokens.len() {
            parts.extend(self.tokens[end + 1..].iter().map(Token::raw));
        }
        parts.join(" ")
    }

    /// Append `addition` after the last token and return the new canonical
    /// string.
    pub fn append(&self, addition: &str) -> String {
        let mut parts: Vec<&str> = self.tokens.iter().map(Token::raw).collect();
        parts.push(addition);
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_word_lowercases_and_strips_punctuation() {
        assert_eq!(clean_word("However,"), "however");
        assert_eq!(clean_word("(SEO-friendly)"), "seofriendly");
        assert_eq!(clean_word("snake_case"), "snake_case");
        assert_eq!(clean_word("..."), "");
    }

    #[test]
    fn parse_splits_on_any_whitespace() {
        let text = WorkingText::parse("  one\ttwo\n\nthree  ");
        let raws: Vec<_> = text.tokens().iter().map(Token::raw).collect();
        assert_eq!(raws, vec!["one", "two", "three"]);
        assert_eq!(text.joined(), "one two three");
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let text = WorkingText::parse(" \n\t ");
        assert!(text.is_empty());
        assert_eq!(text.last_index(), None);
        assert_eq!(text.joined(), "");
    }

    #[test]
    fn marked_span_tokens_are_locked() {
        let text = WorkingText::parse("we use ⟦machine learning⟧ today and ⟦seo⟧.");
        let locked: Vec<_> = text.tokens().iter().map(Token::is_locked).collect();
        assert_eq!(locked, vec![false, false, true, true, false, false, true]);
        assert_eq!(text.get(2).unwrap().clean(), "machine");
        assert_eq!(text.get(6).unwrap().clean(), "seo");
    }

    #[test]
    fn unbalanced_markers_lock_nothing() {
        let text = WorkingText::parse("Price ⟦draft our marketing plan");
        assert!(text.tokens().iter().all(|t| !t.is_locked()));

        let text = WorkingText::parse("stray⟧ close then ⟦kept⟧ and ⟦open");
        let locked: Vec<_> = text.tokens().iter().map(Token::is_locked).collect();
        assert_eq!(locked, vec![false, false, false, true, false, false]);
    }

    #[test]
    fn ends_sentence_checks_trailing_period() {
        assert!(Token::new("done.").ends_sentence());
        assert!(!Token::new("done!").ends_sentence());
    }

    #[test]
    fn splice_replaces_inclusive_range() {
        let text = WorkingText::parse("a b c d e");
        assert_eq!(text.splice(1, 2, "X"), "a X d e");
        assert_eq!(text.splice(4, 4, "X"), "a b c d X");
        assert_eq!(text.splice(0, 0, "X"), "X b c d e");
    }

    #[test]
    fn append_adds_after_last_token() {
        let text = WorkingText::parse("a b");
        assert_eq!(text.append("X"), "a b X");
        assert_eq!(WorkingText::default().append("X"), "X");
    }
}
