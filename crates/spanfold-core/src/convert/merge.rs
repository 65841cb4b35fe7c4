//! # Interval Merge Engine
//!
//! Resolves possibly-overlapping labeled spans into a non-overlapping,
//! start-ordered partition where each span carries the set of every label
//! that covered it.
//!
//! ## Algorithm
//!
//! A worklist is seeded with the input spans sorted by start. Each popped span
//! is compared against the already-merged spans in start order:
//!
//! 1. A merged span starting after the popped span's end ends the scan; the
//!    popped span is accepted.
//! 2. An overlapping merged span is removed, the pair is split into up to
//!    three pieces ([`split_overlap`]), and the pieces go back to the front of
//!    the worklist, since a piece may still overlap a third span.
//! 3. If nothing conflicts, the popped span is accepted.
//!
//! Zero-width spans, including empty split pieces, are dropped when popped.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{Result, SpanfoldError};
use crate::types::{Annotation, LabelSet, ResolvedSpan};

/// Converts annotations into single-label spans after checking their bounds.
///
/// Zero-width annotations are skipped before any check, wherever they point.
pub fn collect_spans(text: &str, annotations: &[Annotation]) -> Result<Vec<ResolvedSpan>> {
    let mut spans = Vec::with_capacity(annotations.len());
    for annotation in annotations {
        if annotation.start == annotation.end {
            debug!(
                start = annotation.start,
                label = %annotation.label,
                "skipping zero-width annotation"
            );
            continue;
        }
        check_bounds(text, annotation.start, annotation.end)?;
        spans.push(ResolvedSpan::single(
            annotation.start,
            annotation.end,
            annotation.label.clone(),
        ));
    }
    Ok(spans)
}

/// Verifies `start..end` is a valid slice range of `text`.
pub fn check_bounds(text: &str, start: usize, end: usize) -> Result<()> {
    if start > end || end > text.len() {
        return Err(SpanfoldError::SpanOutOfBounds {
            start,
            end,
            len: text.len(),
        });
    }
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(SpanfoldError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// Resolves overlapping spans into a non-overlapping partition ordered by start.
///
/// # Examples
/// ```
/// use spanfold_core::convert::merge::merge_spans;
/// use spanfold_core::types::{Label, ResolvedSpan};
///
/// let merged = merge_spans(vec![
///     ResolvedSpan::single(0, 10, Label::from("X")),
///     ResolvedSpan::single(5, 15, Label::from("Y")),
/// ]);
///
/// let ranges: Vec<_> = merged.iter().map(|s| (s.start, s.end, s.labels.len())).collect();
/// assert_eq!(ranges, vec![(0, 5, 1), (5, 10, 2), (10, 15, 1)]);
/// ```
pub fn merge_spans(spans: impl IntoIterator<Item = ResolvedSpan>) -> Vec<ResolvedSpan> {
    let mut sorted: Vec<ResolvedSpan> = spans.into_iter().collect();
    sorted.sort_by_key(|span| span.start);
    let mut queue = VecDeque::from(sorted);

    // Invariant: non-overlapping and sorted by start.
    let mut merged: Vec<ResolvedSpan> = Vec::new();
    let mut splits = 0usize;
    let mut dropped = 0usize;

    while let Some(current) = queue.pop_front() {
        if current.is_degenerate() {
            dropped += 1;
            continue;
        }

        match find_overlap(&merged, &current) {
            Some(idx) => {
                let existing = merged.remove(idx);
                for piece in split_overlap(current, existing).into_iter().rev() {
                    queue.push_front(piece);
                }
                splits += 1;
            }
            None => {
                let idx = merged.partition_point(|span| span.start <= current.start);
                merged.insert(idx, current);
            }
        }
    }

    debug!(spans = merged.len(), splits, dropped, "resolved overlapping spans");
    merged
}

/// Index of the first merged span overlapping `current`, if any.
fn find_overlap(merged: &[ResolvedSpan], current: &ResolvedSpan) -> Option<usize> {
    for (idx, span) in merged.iter().enumerate() {
        if span.start > current.end {
            return None;
        }
        if span.overlaps(current) {
            return Some(idx);
        }
    }
    None
}

/// Splits two overlapping spans into leading, shared and trailing pieces.
///
/// With `first` the span starting earlier (ties keep argument order):
///
/// - `[first.start, second.start)` keeps `first`'s labels,
/// - `[second.start, cut)` carries the union of both label sets,
/// - `[cut, end)` keeps the labels of whichever span reaches further,
///
/// where `cut` is the smaller and `end` the larger of the two ends. Pieces
/// may be zero-width.
pub fn split_overlap(a: ResolvedSpan, b: ResolvedSpan) -> [ResolvedSpan; 3] {
    let (first, second) = if a.start <= b.start { (a, b) } else { (b, a) };

    let cut = first.end.min(second.end);
    let end = first.end.max(second.end);
    let tail_labels = if second.end > first.end {
        second.labels.clone()
    } else {
        first.labels.clone()
    };
    let shared: LabelSet = first.labels.union(&second.labels).cloned().collect();

    [
        ResolvedSpan::new(first.start, second.start, first.labels),
        ResolvedSpan::new(second.start, cut, shared),
        ResolvedSpan::new(cut, end, tail_labels),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;

    fn span(start: usize, end: usize, label: &str) -> ResolvedSpan {
        ResolvedSpan::single(start, end, Label::from(label))
    }

    fn summary(spans: &[ResolvedSpan]) -> Vec<(usize, usize, Vec<String>)> {
        spans
            .iter()
            .map(|s| {
                (
                    s.start,
                    s.end,
                    s.labels.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_overlap() {
        let merged = merge_spans(vec![span(0, 10, "X"), span(5, 15, "Y")]);
        assert_eq!(
            summary(&merged),
            vec![
                (0, 5, labels(&["X"])),
                (5, 10, labels(&["X", "Y"])),
                (10, 15, labels(&["Y"])),
            ]
        );
    }

    #[test]
    fn test_containment() {
        let merged = merge_spans(vec![span(0, 20, "X"), span(5, 10, "Y")]);
        assert_eq!(
            summary(&merged),
            vec![
                (0, 5, labels(&["X"])),
                (5, 10, labels(&["X", "Y"])),
                (10, 20, labels(&["X"])),
            ]
        );
    }

    #[test]
    fn test_identical_ranges_union_labels() {
        let merged = merge_spans(vec![span(3, 8, "X"), span(3, 8, "Y")]);
        assert_eq!(summary(&merged), vec![(3, 8, labels(&["X", "Y"]))]);
    }

    #[test]
    fn test_shared_start() {
        let merged = merge_spans(vec![span(0, 4, "X"), span(0, 9, "Y")]);
        assert_eq!(
            summary(&merged),
            vec![(0, 4, labels(&["X", "Y"])), (4, 9, labels(&["Y"]))]
        );
    }

    #[test]
    fn test_degenerate_spans_dropped() {
        let merged = merge_spans(vec![span(4, 4, "X"), span(0, 0, "Y")]);
        assert!(merged.is_empty());

        let merged = merge_spans(vec![span(2, 2, "X"), span(0, 5, "Y")]);
        assert_eq!(summary(&merged), vec![(0, 5, labels(&["Y"]))]);
    }

    #[test]
    fn test_adjacent_spans_untouched() {
        let merged = merge_spans(vec![span(5, 9, "Y"), span(0, 5, "X")]);
        assert_eq!(
            summary(&merged),
            vec![(0, 5, labels(&["X"])), (5, 9, labels(&["Y"]))]
        );
    }

    #[test]
    fn test_chain_of_three() {
        let merged = merge_spans(vec![span(0, 6, "A"), span(4, 10, "B"), span(8, 12, "C")]);
        assert_eq!(
            summary(&merged),
            vec![
                (0, 4, labels(&["A"])),
                (4, 6, labels(&["A", "B"])),
                (6, 8, labels(&["B"])),
                (8, 10, labels(&["B", "C"])),
                (10, 12, labels(&["C"])),
            ]
        );
    }

    #[test]
    fn test_span_covering_several_merged() {
        let merged = merge_spans(vec![span(2, 4, "A"), span(6, 8, "B"), span(0, 10, "C")]);
        assert_eq!(
            summary(&merged),
            vec![
                (0, 2, labels(&["C"])),
                (2, 4, labels(&["A", "C"])),
                (4, 6, labels(&["C"])),
                (6, 8, labels(&["B", "C"])),
                (8, 10, labels(&["C"])),
            ]
        );
    }

    #[test]
    fn test_split_overlap_pieces() {
        let [head, shared, tail] = split_overlap(span(5, 15, "Y"), span(0, 10, "X"));
        assert_eq!((head.start, head.end), (0, 5));
        assert_eq!((shared.start, shared.end), (5, 10));
        assert_eq!(shared.labels.len(), 2);
        assert_eq!((tail.start, tail.end), (10, 15));
        assert!(tail.labels.contains(&Label::from("Y")));
    }

    /// Every byte must carry exactly the labels of the input spans covering it.
    #[test]
    fn test_label_coverage_matches_brute_force() {
        let mut seed = 0x2545_f491_u64;
        let mut next = move |bound: usize| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) as usize) % bound
        };

        for _ in 0..200 {
            let len = 1 + next(40);
            let count = next(7);
            let input: Vec<ResolvedSpan> = (0..count)
                .map(|i| {
                    let a = next(len + 1);
                    let b = next(len + 1);
                    span(a.min(b), a.max(b), ["A", "B", "C"][i % 3])
                })
                .collect();

            let merged = merge_spans(input.clone());

            for pair in merged.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap in {merged:?}");
            }
            for pos in 0..len {
                let expected: LabelSet = input
                    .iter()
                    .filter(|s| s.start <= pos && pos < s.end)
                    .flat_map(|s| s.labels.iter().cloned())
                    .collect();
                let actual: LabelSet = merged
                    .iter()
                    .filter(|s| s.start <= pos && pos < s.end)
                    .flat_map(|s| s.labels.iter().cloned())
                    .collect();
                assert_eq!(expected, actual, "position {pos} of {input:?}");
            }
        }
    }

    #[test]
    fn test_collect_spans_checks_bounds() {
        let annotations = vec![Annotation::new(0, 12, "X")];
        assert!(matches!(
            collect_spans("short", &annotations),
            Err(SpanfoldError::SpanOutOfBounds { len: 5, .. })
        ));

        let annotations = vec![Annotation::new(3, 1, "X")];
        assert!(collect_spans("short", &annotations).is_err());
    }

    #[test]
    fn test_collect_spans_checks_char_boundaries() {
        let annotations = vec![Annotation::new(0, 2, "X")];
        assert_eq!(collect_spans("éa", &annotations).unwrap().len(), 1);

        let annotations = vec![Annotation::new(1, 3, "X")];
        assert!(matches!(
            collect_spans("éa", &annotations),
            Err(SpanfoldError::NotCharBoundary { offset: 1 })
        ));
    }

    #[test]
    fn test_collect_spans_skips_zero_width() {
        let annotations = vec![Annotation::new(50, 50, "X"), Annotation::new(0, 2, "Y")];
        let spans = collect_spans("abc", &annotations).unwrap();
        assert_eq!(spans, vec![ResolvedSpan::single(0, 2, "Y".into())]);

        let annotations = vec![Annotation::new(1, 1, "X")];
        assert!(collect_spans("éa", &annotations).unwrap().is_empty());
    }
}
