//! # Gap Filler
//!
//! Turns a merged span list into a gap-free partition of the document and
//! flattens it into the public substring/label form.

use crate::error::{Result, SpanfoldError};
use crate::types::{Label, LabeledDocument, ResolvedSpan, SequenceLabel};

/// Inserts `none_value` spans before, between and after the merged spans so
/// the result covers `0..text.len()`.
///
/// `merged` must be ordered by start and non-overlapping.
pub fn fill_gaps(text: &str, merged: Vec<ResolvedSpan>, none_value: &Label) -> Vec<ResolvedSpan> {
    let mut filled = Vec::with_capacity(merged.len() * 2 + 1);
    let mut cursor = 0;

    for span in merged {
        debug_assert!(span.start >= cursor, "spans must be ordered and disjoint");
        if span.start > cursor {
            filled.push(ResolvedSpan::single(cursor, span.start, none_value.clone()));
        }
        cursor = span.end;
        filled.push(span);
    }

    if cursor < text.len() {
        filled.push(ResolvedSpan::single(cursor, text.len(), none_value.clone()));
    }
    filled
}

/// Flattens a partition into substrings with parallel labels.
///
/// In multi-label mode every label set becomes a sorted tuple. Otherwise each
/// span must carry a single label; a span with several labels is rejected
/// with [`SpanfoldError::MultiLabelSpan`].
pub fn to_labeled_document(
    text: &str,
    partition: &[ResolvedSpan],
    multi_label: bool,
    none_value: &Label,
) -> Result<LabeledDocument> {
    let mut document = LabeledDocument::default();

    for span in partition {
        let label = if multi_label {
            SequenceLabel::Multi(span.labels.iter().cloned().collect())
        } else {
            single_label(text, span, none_value)?
        };
        document.substrings.push(span.text(text).to_string());
        document.labels.push(label);
    }
    Ok(document)
}

fn single_label(text: &str, span: &ResolvedSpan, none_value: &Label) -> Result<SequenceLabel> {
    let mut labels = span.labels.iter();
    match (labels.next(), labels.next()) {
        (Some(label), None) => Ok(SequenceLabel::Single(label.clone())),
        (None, _) => Ok(SequenceLabel::Single(none_value.clone())),
        _ => Err(SpanfoldError::MultiLabelSpan {
            annotation: format!("{} {:?}", span, span.text(text)),
        }),
    }
}
