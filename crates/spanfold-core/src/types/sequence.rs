//! Labeled substring ("finetune") sequences.

use serde::{Deserialize, Serialize};

use super::annotation::Confidence;
use super::label::Label;
use crate::error::{Result, SpanfoldError};

/// The label attached to one substring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceLabel {
    /// A single category (single-label mode).
    Single(Label),
    /// A sorted label tuple (multi-label mode).
    Multi(Vec<Label>),
}

impl SequenceLabel {
    /// All labels carried by this substring, in order.
    pub fn labels(&self) -> &[Label] {
        match self {
            SequenceLabel::Single(label) => std::slice::from_ref(label),
            SequenceLabel::Multi(labels) => labels,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, SequenceLabel::Multi(_))
    }

    /// True when no label other than `none_value` is present.
    pub fn is_none(&self, none_value: &Label) -> bool {
        self.labels().iter().all(|label| label == none_value)
    }
}

impl From<Label> for SequenceLabel {
    fn from(label: Label) -> Self {
        SequenceLabel::Single(label)
    }
}

/// A document partitioned into substrings with parallel labels.
///
/// Concatenating `substrings` reproduces the source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub substrings: Vec<String>,
    pub labels: Vec<SequenceLabel>,
}

impl LabeledDocument {
    /// Checks that substrings and labels are parallel.
    pub fn validate(&self) -> Result<()> {
        if self.substrings.len() != self.labels.len() {
            return Err(SpanfoldError::LengthMismatch {
                what: "labels per substring",
                expected: self.substrings.len(),
                found: self.labels.len(),
            });
        }
        Ok(())
    }

    /// Rebuilds the source text.
    pub fn text(&self) -> String {
        self.substrings.concat()
    }

    pub fn len(&self) -> usize {
        self.substrings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }

    /// Iterates `(substring, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SequenceLabel)> {
        self.substrings
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter())
    }
}

/// One candidate link emitted by a relation head for a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAssociation {
    /// Subword token the candidate was produced for.
    pub token_index: usize,
    /// Subword token the candidate points at.
    pub candidate_index: usize,
    /// Relationship label of the candidate.
    pub candidate_label: Label,
    /// Score of the candidate.
    pub probability: f32,
}

/// Model output for one document, ready to be mapped back to annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictedDocument {
    /// Source text the prediction was made on.
    pub text: String,

    #[serde(flatten)]
    pub sequence: LabeledDocument,

    /// Per-substring confidences, parallel to `sequence`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidences: Option<Vec<Confidence>>,

    /// Per-substring association candidates, parallel to `sequence`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<Vec<CandidateAssociation>>>,
}

impl PredictedDocument {
    pub fn new(text: impl Into<String>, sequence: LabeledDocument) -> Self {
        Self {
            text: text.into(),
            sequence,
            confidences: None,
            associations: None,
        }
    }

    /// Checks that every per-substring sequence has the same length.
    pub fn validate(&self) -> Result<()> {
        self.sequence.validate()?;
        let expected = self.sequence.len();
        if let Some(confidences) = &self.confidences {
            if confidences.len() != expected {
                return Err(SpanfoldError::LengthMismatch {
                    what: "confidences per substring",
                    expected,
                    found: confidences.len(),
                });
            }
        }
        if let Some(associations) = &self.associations {
            if associations.len() != expected {
                return Err(SpanfoldError::LengthMismatch {
                    what: "associations per substring",
                    expected,
                    found: associations.len(),
                });
            }
        }
        Ok(())
    }
}
