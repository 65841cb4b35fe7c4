//! # Conversion between annotation formats
//!
//! Two directions, structurally dual:
//!
//! - **Training path** (`to_finetune`): annotations → [`merge`] → [`gaps`] →
//!   labeled substrings.
//! - **Decoding path** (`to_indico`): predicted substrings → [`associate`] +
//!   [`reconstruct`] → annotations.
//!
//! Documents are converted independently; nothing is shared between them.

pub mod align;
pub mod associate;
pub mod gaps;
pub mod merge;
pub mod reconstruct;

use tracing::debug;

use crate::config::ConversionConfig;
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::{Result, SpanfoldError};
use crate::tokenize::{
    EncodedDocument, RegexWordTokenizer, SubwordEncoder, WordLevelEncoder, WordTokenizer,
};
use crate::types::{IndicoDocument, LabeledDocument, PredictedDocument};

use self::reconstruct::WordBoundaries;

/// Converter bundling the tokenizer collaborators with a configuration.
pub struct SequenceConverter<E, W> {
    encoder: E,
    words: W,
    config: ConversionConfig,
}

/// Converter using the regex word tokenizer for both collaborators.
pub type DefaultConverter = SequenceConverter<WordLevelEncoder<RegexWordTokenizer>, RegexWordTokenizer>;

impl DefaultConverter {
    /// Create a converter backed by [`RegexWordTokenizer`].
    pub fn with_config(config: ConversionConfig) -> Result<Self> {
        let words = RegexWordTokenizer::new()?;
        Ok(SequenceConverter::new(
            WordLevelEncoder::new(words.clone()),
            words,
            config,
        ))
    }
}

impl<E: SubwordEncoder, W: WordTokenizer> SequenceConverter<E, W> {
    pub fn new(encoder: E, words: W, config: ConversionConfig) -> Self {
        Self {
            encoder,
            words,
            config,
        }
    }

    /// Get the conversion configuration.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts annotated documents into labeled substring sequences.
    ///
    /// Fails on the first document that cannot be converted; use
    /// [`Self::to_finetune_document`] to isolate failures per document.
    pub fn to_finetune(&self, documents: &[IndicoDocument]) -> Result<Vec<LabeledDocument>> {
        debug!(documents = documents.len(), "converting annotations to substrings");
        let encoded = self.encode(documents)?;

        documents
            .iter()
            .enumerate()
            .map(|(i, document)| {
                self.finetune_document(document, encoded.as_ref().map(|docs| &docs[i]))
            })
            .collect()
    }

    /// Converts a single annotated document.
    pub fn to_finetune_document(&self, document: &IndicoDocument) -> Result<LabeledDocument> {
        let encoded = self.encode(std::slice::from_ref(document))?;
        self.finetune_document(document, encoded.as_ref().and_then(|docs| docs.first()))
    }

    /// Maps predicted substring sequences back to annotated documents.
    ///
    /// # Arguments
    /// * `documents` - Predicted documents, each with its source text
    /// * `sink` - Receives substrings that cannot be located; they are skipped
    ///
    /// # Returns
    /// One annotated document per input, or the first document's error.
    pub fn to_indico(
        &self,
        documents: &[PredictedDocument],
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Vec<IndicoDocument>> {
        debug!(documents = documents.len(), "converting substrings to annotations");
        documents
            .iter()
            .enumerate()
            .map(|(i, document)| self.to_indico_document(i, document, sink))
            .collect()
    }

    /// Maps one predicted document back to annotations.
    ///
    /// `index` identifies the document in diagnostics.
    pub fn to_indico_document(
        &self,
        index: usize,
        document: &PredictedDocument,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<IndicoDocument> {
        let none_value = &self.config.none_value;

        let links = match &document.associations {
            Some(candidates) => Some(associate::assign_associations(
                &document.sequence.labels,
                candidates,
                none_value,
            )?),
            None => None,
        };

        let words = if self.config.subtoken_predictions {
            None
        } else {
            Some(WordBoundaries::from_spans(
                &self.words.tokenize(&document.text),
            ))
        };

        let annotations = reconstruct::reconstruct_document(
            index,
            document,
            none_value,
            words.as_ref(),
            links.as_ref(),
            sink,
        )?;
        Ok(IndicoDocument::new(document.text.clone(), annotations))
    }

    /// Batch-encodes the documents when annotations must be widened to subword tokens.
    fn encode(&self, documents: &[IndicoDocument]) -> Result<Option<Vec<EncodedDocument>>> {
        if self.config.subtoken_labels {
            return Ok(None);
        }
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let encoded = self.encoder.encode_batch(&texts)?;
        if encoded.len() != texts.len() {
            return Err(SpanfoldError::LengthMismatch {
                what: "encoded documents",
                expected: texts.len(),
                found: encoded.len(),
            });
        }
        Ok(Some(encoded))
    }

    fn finetune_document(
        &self,
        document: &IndicoDocument,
        encoded: Option<&EncodedDocument>,
    ) -> Result<LabeledDocument> {
        let text = document.text.as_str();
        let mut spans = merge::collect_spans(text, &document.annotations)?;

        if let Some(encoded) = encoded {
            let tokens = encoded.token_bounds(&self.encoder);
            for span in &mut spans {
                let (start, end) = align::widen_to_tokens(span.start, span.end, &tokens);
                merge::check_bounds(text, start, end)?;
                span.start = start;
                span.end = end;
            }
        }

        let merged = merge::merge_spans(spans);
        let partition = gaps::fill_gaps(text, merged, &self.config.none_value);
        gaps::to_labeled_document(
            text,
            &partition,
            self.config.multi_label,
            &self.config.none_value,
        )
    }
}

/// Converts annotated documents with the default tokenizers.
///
/// # Examples
/// ```
/// use spanfold_core::{indico_to_finetune, Annotation, ConversionConfig, IndicoDocument};
///
/// let docs = vec![IndicoDocument::new(
///     "the quick brown fox",
///     vec![Annotation::new(4, 9, "ADJ"), Annotation::new(16, 19, "ANIMAL")],
/// )];
/// let labeled = indico_to_finetune(&docs, ConversionConfig::default()).unwrap();
///
/// assert_eq!(labeled[0].substrings, vec!["the ", "quick", " brown ", "fox"]);
/// assert_eq!(labeled[0].text(), "the quick brown fox");
/// ```
pub fn indico_to_finetune(
    documents: &[IndicoDocument],
    config: ConversionConfig,
) -> Result<Vec<LabeledDocument>> {
    DefaultConverter::with_config(config)?.to_finetune(documents)
}

/// Maps predictions back to annotations with the default tokenizers,
/// logging diagnostics through `tracing`.
pub fn finetune_to_indico(
    documents: &[PredictedDocument],
    config: ConversionConfig,
) -> Result<Vec<IndicoDocument>> {
    DefaultConverter::with_config(config)?.to_indico(documents, &mut TracingSink)
}
