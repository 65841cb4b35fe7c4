//! Character-offset ("indico") annotation records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::label::Label;

/// Per-label confidence scores keyed by the label's display form.
pub type Confidence = BTreeMap<String, f32>;

/// A resolved link from one annotation to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Index of the target annotation within the same document.
    pub index: usize,
    /// Relationship label carried by the link.
    pub relationship: Label,
    /// Probability of the selected candidate.
    pub prob: f32,
}

/// A labeled character span.
///
/// Offsets are byte offsets into the document text; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub label: Label,

    /// The covered text, `document[start..end]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    #[serde(
        default,
        rename = "associations",
        skip_serializing_if = "Option::is_none"
    )]
    pub association: Option<Association>,
}

impl Annotation {
    /// Creates an annotation without text, confidence or association.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<Label>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            text: None,
            confidence: None,
            association: None,
        }
    }

    /// Attaches the covered text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The `(start, end, label)` identity used for deduplication.
    pub fn key(&self) -> (usize, usize, &Label) {
        (self.start, self.end, &self.label)
    }
}

/// A raw document with its annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicoDocument {
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl IndicoDocument {
    pub fn new(text: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            text: text.into(),
            annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_keys() {
        let mut annotation = Annotation::new(0, 3, "ANIMAL").with_text("fox");
        annotation.association = Some(Association {
            index: 2,
            relationship: Label::from("eats"),
            prob: 0.5,
        });

        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["start"], 0);
        assert_eq!(json["end"], 3);
        assert_eq!(json["label"], "ANIMAL");
        assert_eq!(json["text"], "fox");
        assert_eq!(json["associations"]["index"], 2);
        assert!(json.get("confidence").is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let annotation: Annotation =
            serde_json::from_str(r#"{"start": 4, "end": 9, "label": 1}"#).unwrap();
        assert_eq!(annotation.key(), (4, 9, &Label::Id(1)));
        assert!(annotation.text.is_none());
        assert!(annotation.association.is_none());
    }
}
