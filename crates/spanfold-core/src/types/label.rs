use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A category label, either a name or a numeric class id.
///
/// Serialized untagged, so `"PER"` and `3` are both valid labels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Numeric class id.
    Id(i64),
    /// Named category.
    Text(String),
}

/// Unordered, deduplicated label collection used while resolving overlaps.
///
/// Backed by a `BTreeSet` so iteration order is stable when the set is
/// flattened into a public label tuple.
pub type LabelSet = BTreeSet<Label>;

impl Label {
    /// Returns the label name if this is a text label.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Label::Text(s) => Some(s),
            Label::Id(_) => None,
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Text("<PAD>".to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Id(id) => write!(f, "{id}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Id(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serde() {
        let text: Label = serde_json::from_str("\"PER\"").unwrap();
        assert_eq!(text, Label::from("PER"));

        let id: Label = serde_json::from_str("7").unwrap();
        assert_eq!(id, Label::Id(7));
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_label_set_dedups_and_orders() {
        let set: LabelSet = ["Y", "X", "Y"].into_iter().map(Label::from).collect();
        let ordered: Vec<_> = set.iter().map(|l| l.to_string()).collect();
        assert_eq!(ordered, vec!["X", "Y"]);
    }

    #[test]
    fn test_default_is_pad() {
        assert_eq!(Label::default().as_str(), Some("<PAD>"));
    }
}
