//! # Spanfold Core
//!
//! Converts between character-offset annotations (a raw document plus
//! possibly overlapping `{start, end, label}` spans) and labeled substring
//! sequences (a gap-free partition of the document where each substring
//! carries zero, one or many labels).
//!
//! ## Quick Start
//!
//! ```rust
//! use spanfold_core::{
//!     finetune_to_indico, indico_to_finetune, Annotation, ConversionConfig, IndicoDocument,
//!     PredictedDocument,
//! };
//!
//! let docs = vec![IndicoDocument::new(
//!     "Jane lives in New York",
//!     vec![Annotation::new(0, 4, "PER"), Annotation::new(14, 22, "LOC")],
//! )];
//!
//! let config = ConversionConfig::default();
//! let labeled = indico_to_finetune(&docs, config.clone()).unwrap();
//! assert_eq!(labeled[0].text(), "Jane lives in New York");
//!
//! let predicted: Vec<_> = docs
//!     .iter()
//!     .zip(labeled)
//!     .map(|(doc, sequence)| PredictedDocument::new(doc.text.clone(), sequence))
//!     .collect();
//! let restored = finetune_to_indico(&predicted, config).unwrap();
//!
//! assert_eq!(restored[0].annotations[1].text.as_deref(), Some("New York"));
//! ```
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod tokenize;
pub mod types;

// Re-export primary API
pub use config::ConversionConfig;
pub use convert::{DefaultConverter, SequenceConverter, finetune_to_indico, indico_to_finetune};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, TracingSink};
pub use error::{Result, SpanfoldError};
pub use tokenize::{
    EncodedDocument, HfEncoder, RegexWordTokenizer, SubwordEncoder, WordLevelEncoder, WordSpan,
    WordTokenizer,
};
pub use types::{
    Annotation, Association, CandidateAssociation, Confidence, IndicoDocument, Label, LabelSet,
    LabeledDocument, PredictedDocument, ResolvedSpan, SequenceLabel,
};
