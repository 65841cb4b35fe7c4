//! Recoverable conversion problems, reported through an injectable sink.

use std::fmt;

/// Longest excerpt of predicted text quoted in a diagnostic.
const MAX_EXCERPT_CHARS: usize = 100;

/// A non-fatal problem found while mapping predictions back to annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The predicted substring does not occur at or after the search cursor.
    PredictionNotFound {
        /// Document index within the batch.
        document: usize,
        /// Substring index within the document.
        position: usize,
        /// Excerpt of the stripped substring.
        text: String,
    },
    /// A labeled substring is empty once surrounding whitespace is stripped.
    EmptyPrediction { document: usize, position: usize },
}

impl Diagnostic {
    pub fn not_found(document: usize, position: usize, text: &str) -> Self {
        Diagnostic::PredictionNotFound {
            document,
            position,
            text: truncate_text(text, MAX_EXCERPT_CHARS),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PredictionNotFound {
                document,
                position,
                text,
            } => write!(
                f,
                "failed to find predicted sequence in text (document {document}, substring {position}): {text:?}"
            ),
            Diagnostic::EmptyPrediction { document, position } => write!(
                f,
                "labeled substring is blank (document {document}, substring {position})"
            ),
        }
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticsSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("ééééé", 2), "éé...");
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.report(Diagnostic::not_found(0, 3, "missing"));
        sink.report(Diagnostic::EmptyPrediction {
            document: 1,
            position: 0,
        });

        assert_eq!(sink.len(), 2);
        assert!(sink.diagnostics()[0].to_string().contains("\"missing\""));
    }

    #[test]
    fn test_not_found_excerpt_is_truncated() {
        let long = "x".repeat(500);
        match Diagnostic::not_found(0, 0, &long) {
            Diagnostic::PredictionNotFound { text, .. } => {
                assert_eq!(text.len(), MAX_EXCERPT_CHARS + 3)
            }
            other => panic!("unexpected diagnostic {other:?}"),
        }
    }
}
