//! # Tokenizer collaborators
//!
//! The converters never tokenize on their own. They consume two seams:
//!
//! - [`SubwordEncoder`]: batch-encodes documents into subword tokens with end
//!   offsets. Used to widen training annotations to whole subword tokens.
//! - [`WordTokenizer`]: splits a document into word-like spans. Used to snap
//!   predicted spans to whole words.

pub mod hf;
pub mod word;

pub use hf::HfEncoder;
pub use word::{RegexWordTokenizer, WordLevelEncoder};

use crate::error::Result;

/// A word-like token span, byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
}

/// Splits raw text into ordered, non-overlapping word spans.
///
/// Spans should be valid byte ranges of `text` on char boundaries. Snapping
/// ignores boundaries that are not and keeps the located range instead.
pub trait WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<WordSpan>;
}

/// Subword tokens for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedDocument {
    /// Token strings in document order.
    pub tokens: Vec<String>,
    /// Byte offset where each token ends, parallel to `tokens`.
    pub token_ends: Vec<usize>,
}

impl EncodedDocument {
    pub fn push(&mut self, token: impl Into<String>, end: usize) {
        self.tokens.push(token.into());
        self.token_ends.push(end);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `(start, end)` for every token, with `start = end - token_length`.
    pub fn token_bounds<E: SubwordEncoder + ?Sized>(&self, encoder: &E) -> Vec<(usize, usize)> {
        self.tokens
            .iter()
            .zip(&self.token_ends)
            .map(|(token, &end)| (end.saturating_sub(encoder.token_length(token)), end))
            .collect()
    }
}

/// Batch subword encoder.
pub trait SubwordEncoder {
    /// Encodes every document in one call.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<EncodedDocument>>;

    /// Number of source bytes covered by `token`.
    fn token_length(&self, token: &str) -> usize {
        token.len()
    }
}

impl<T: SubwordEncoder + ?Sized> SubwordEncoder for Box<T> {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<EncodedDocument>> {
        (**self).encode_batch(texts)
    }

    fn token_length(&self, token: &str) -> usize {
        (**self).token_length(token)
    }
}
