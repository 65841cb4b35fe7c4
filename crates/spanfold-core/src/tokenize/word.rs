//! Regex word tokenizer and its use as a word-level subword encoder.

use regex::Regex;

use super::{EncodedDocument, SubwordEncoder, WordSpan, WordTokenizer};
use crate::error::Result;

/// Runs of word characters, or a single character that is neither word nor space.
const DEFAULT_PATTERN: &str = r"\w+|[^\w\s]";

/// Word tokenizer backed by a regular expression.
///
/// Every match becomes one [`WordSpan`]; unmatched text (whitespace with the
/// default pattern) separates tokens.
#[derive(Debug, Clone)]
pub struct RegexWordTokenizer {
    pattern: Regex,
}

impl RegexWordTokenizer {
    /// Create a tokenizer with the default word/punctuation pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl WordTokenizer for RegexWordTokenizer {
    /// # Examples
    /// ```
    /// use spanfold_core::tokenize::{RegexWordTokenizer, WordTokenizer};
    ///
    /// let tokenizer = RegexWordTokenizer::new().unwrap();
    /// let spans = tokenizer.tokenize("Hi, you");
    /// assert_eq!(spans.len(), 3);
    /// assert_eq!((spans[2].start, spans[2].end), (4, 7));
    /// ```
    fn tokenize(&self, text: &str) -> Vec<WordSpan> {
        self.pattern
            .find_iter(text)
            .map(|m| WordSpan {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

/// Uses a word tokenizer as the subword encoder; each word is one token.
#[derive(Debug, Clone)]
pub struct WordLevelEncoder<W> {
    tokenizer: W,
}

impl<W: WordTokenizer> WordLevelEncoder<W> {
    pub fn new(tokenizer: W) -> Self {
        Self { tokenizer }
    }
}

impl<W: WordTokenizer> SubwordEncoder for WordLevelEncoder<W> {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<EncodedDocument>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut doc = EncodedDocument::default();
                for span in self.tokenizer.tokenize(text) {
                    doc.push(&text[span.start..span.end], span.end);
                }
                doc
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(spans: &[WordSpan]) -> Vec<(usize, usize)> {
        spans.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokenizer = RegexWordTokenizer::new().unwrap();
        let spans = tokenizer.tokenize("The quick-brown fox.");
        assert_eq!(
            bounds(&spans),
            vec![(0, 3), (4, 9), (9, 10), (10, 15), (16, 19), (19, 20)]
        );
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        let tokenizer = RegexWordTokenizer::new().unwrap();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_multibyte() {
        let tokenizer = RegexWordTokenizer::new().unwrap();
        let text = "São Paulo";
        let spans = tokenizer.tokenize(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].start..spans[0].end], "São");
        assert_eq!(&text[spans[1].start..spans[1].end], "Paulo");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexWordTokenizer::with_pattern("(").is_err());
    }

    #[test]
    fn test_word_level_encoder() {
        let encoder = WordLevelEncoder::new(RegexWordTokenizer::new().unwrap());
        let docs = encoder.encode_batch(&["a bc", ""]).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].tokens, vec!["a", "bc"]);
        assert_eq!(docs[0].token_ends, vec![1, 4]);
        assert_eq!(docs[0].token_bounds(&encoder), vec![(0, 1), (2, 4)]);
        assert!(docs[1].is_empty());
    }
}
