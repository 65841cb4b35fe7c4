//! Hugging Face `tokenizers` adapter.

use std::path::Path;

use tokenizers::Tokenizer as HfTokenizer;

use super::{EncodedDocument, SubwordEncoder};
use crate::error::{Result, SpanfoldError};

/// Subword encoder backed by a Hugging Face tokenizer.
///
/// Token strings are the surface slices of the input covered by each token's
/// offsets, so [`SubwordEncoder::token_length`] is exact. Special tokens and
/// tokens with empty offsets are skipped.
pub struct HfEncoder {
    tokenizer: HfTokenizer,
}

impl HfEncoder {
    pub fn new(tokenizer: HfTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Load a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let tokenizer = HfTokenizer::from_file(path.as_ref())
            .map_err(|e| SpanfoldError::Tokenizer(e.to_string()))?;
        Ok(Self::new(tokenizer))
    }
}

impl SubwordEncoder for HfEncoder {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<EncodedDocument>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), false)
            .map_err(|e| SpanfoldError::Tokenizer(format!("encode error: {}", e)))?;

        Ok(texts
            .iter()
            .zip(&encodings)
            .map(|(text, encoding)| {
                let mut doc = EncodedDocument::default();
                let special = encoding.get_special_tokens_mask();
                for (i, &(start, end)) in encoding.get_offsets().iter().enumerate() {
                    if special.get(i).copied() == Some(1) || start >= end {
                        continue;
                    }
                    if let Some(surface) = text.get(start..end) {
                        doc.push(surface, end);
                    }
                }
                doc
            })
            .collect())
    }
}
