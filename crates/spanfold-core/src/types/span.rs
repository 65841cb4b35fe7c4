use std::fmt;

use super::label::{Label, LabelSet};

/// A span under overlap resolution: byte range plus the set of labels covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    pub start: usize,
    pub end: usize,
    pub labels: LabelSet,
}

impl ResolvedSpan {
    pub fn new(start: usize, end: usize, labels: LabelSet) -> Self {
        Self { start, end, labels }
    }

    /// A span carrying exactly one label.
    pub fn single(start: usize, end: usize, label: Label) -> Self {
        Self::new(start, end, LabelSet::from([label]))
    }

    /// Zero-width spans carry no text and are dropped during resolution.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// True when either span's end falls inside the other's `(start, end]` range.
    pub fn overlaps(&self, other: &ResolvedSpan) -> bool {
        (self.start < other.end && other.end <= self.end)
            || (other.start < self.end && self.end <= other.end)
    }

    /// The covered slice of `text`.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        write!(f, "{}..{} {{{}}}", self.start, self.end, labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> ResolvedSpan {
        ResolvedSpan::single(start, end, Label::from("X"))
    }

    #[test]
    fn test_overlaps() {
        assert!(span(0, 10).overlaps(&span(5, 15)));
        assert!(span(5, 15).overlaps(&span(0, 10)));
        assert!(span(0, 20).overlaps(&span(5, 10)));
        assert!(span(0, 10).overlaps(&span(0, 10)));
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        assert!(!span(0, 5).overlaps(&span(5, 10)));
        assert!(!span(5, 10).overlaps(&span(0, 5)));
        assert!(!span(0, 3).overlaps(&span(7, 9)));
    }

    #[test]
    fn test_display() {
        let s = ResolvedSpan::new(
            2,
            4,
            [Label::from("B"), Label::from("A")].into_iter().collect(),
        );
        assert_eq!(s.to_string(), "2..4 {A, B}");
    }
}
