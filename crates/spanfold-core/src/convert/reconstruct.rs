//! # Span Reconstructor
//!
//! Maps a predicted substring sequence back onto its source text, producing
//! one annotation per non-none label occurrence.
//!
//! Each substring is stripped of surrounding whitespace and searched for at or
//! after a cursor that only moves forward. Substrings that cannot be found are
//! reported to the [`DiagnosticsSink`] and skipped; the rest of the document
//! is still processed. When snapping is enabled, located ranges are widened to
//! whole words with [`WordBoundaries::snap`].

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::Result;
use crate::tokenize::WordSpan;
use crate::types::{Annotation, Association, Label, PredictedDocument};

/// Start and end offsets of every word in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBoundaries {
    starts: Vec<usize>,
    ends: Vec<usize>,
}

/// Scan positions into [`WordBoundaries`], carried between snaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapCursor {
    start_idx: usize,
    end_idx: usize,
}

impl WordBoundaries {
    pub fn from_spans(spans: &[WordSpan]) -> Self {
        Self {
            starts: spans.iter().map(|span| span.start).collect(),
            ends: spans.iter().map(|span| span.end).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Snaps `start..end` outward to word boundaries.
    ///
    /// `start` moves to the start of the last word beginning at or before it;
    /// `end` moves to the end of the first word ending at or after it. The
    /// cursor persists between calls so consecutive snaps scan forward only;
    /// `reset` rewinds it first, which gives every label of a multi-label
    /// substring an independent snap. Boundaries never shrink the range.
    pub fn snap(&self, start: usize, end: usize, cursor: &mut SnapCursor, reset: bool) -> (usize, usize) {
        if reset {
            *cursor = SnapCursor::default();
        }
        let n = self.starts.len();
        if n == 0 {
            return (start, end);
        }

        while cursor.start_idx < n && start >= self.starts[cursor.start_idx] {
            cursor.start_idx += 1;
        }
        let snapped_start = match cursor.start_idx {
            0 => start,
            idx => self.starts[idx - 1].min(start),
        };

        while cursor.end_idx < n - 1 && end > self.ends[cursor.end_idx] {
            cursor.end_idx += 1;
        }
        let snapped_end = self.ends[cursor.end_idx].max(end);

        (snapped_start, snapped_end)
    }
}

/// Rebuilds the annotations of one predicted document.
///
/// # Arguments
/// * `document` - Index of the document, used in diagnostics
/// * `predicted` - Source text with its predicted substrings and labels
/// * `none_value` - Label that marks unlabeled substrings
/// * `words` - Word boundaries to snap to; `None` keeps located ranges as is
/// * `associations` - Resolved links keyed by annotation emission index
/// * `sink` - Receives substrings that could not be located
///
/// # Returns
/// Annotations ordered by start, or an error when the parallel sequences
/// of `predicted` disagree in length.
pub fn reconstruct_document(
    document: usize,
    predicted: &PredictedDocument,
    none_value: &Label,
    words: Option<&WordBoundaries>,
    associations: Option<&BTreeMap<usize, Association>>,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Vec<Annotation>> {
    predicted.validate()?;
    let text = predicted.text.as_str();

    let mut cursor = 0;
    let mut snap_cursor = SnapCursor::default();
    let mut emitted: HashSet<(usize, usize, Label)> = HashSet::new();
    let mut annotations = Vec::new();

    for (position, (substring, label)) in predicted.sequence.iter().enumerate() {
        let stripped = substring.trim();
        if stripped.is_empty() {
            if !label.is_none(none_value) {
                sink.report(Diagnostic::EmptyPrediction { document, position });
            }
            continue;
        }

        let Some(offset) = text[cursor..].find(stripped) else {
            sink.report(Diagnostic::not_found(document, position, stripped));
            continue;
        };
        let raw_start = cursor + offset;
        let raw_end = raw_start + stripped.len();
        cursor = raw_end;

        for occurrence in label.labels() {
            if occurrence == none_value {
                continue;
            }

            let snapped = words
                .map(|words| words.snap(raw_start, raw_end, &mut snap_cursor, label.is_multi()));
            let (start, end) = match snapped {
                Some((start, end)) if text.get(start..end).is_some() => (start, end),
                Some((start, end)) => {
                    debug!(start, end, "word boundaries do not slice the text; keeping located range");
                    (raw_start, raw_end)
                }
                None => (raw_start, raw_end),
            };

            if !emitted.insert((start, end, occurrence.clone())) {
                debug!(start, end, label = %occurrence, "dropping duplicate annotation");
                continue;
            }

            let mut annotation =
                Annotation::new(start, end, occurrence.clone()).with_text(&text[start..end]);
            if let Some(link) = associations.and_then(|links| links.get(&annotations.len())) {
                annotation.association = Some(link.clone());
            }
            if let Some(confidences) = &predicted.confidences {
                annotation.confidence = Some(confidences[position].clone());
            }
            annotations.push(annotation);
        }
    }

    annotations.sort_by_key(|annotation| annotation.start);
    Ok(annotations)
}
