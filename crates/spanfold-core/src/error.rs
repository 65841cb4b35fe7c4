use thiserror::Error;

/// Errors that can occur while converting between annotation formats.
#[derive(Debug, Error)]
pub enum SpanfoldError {
    /// A resolved span carries several labels while multi-label mode is off.
    #[error(
        "found overlapping annotations: {annotation}. \
         Enable multi-label sequences in the conversion config"
    )]
    MultiLabelSpan {
        /// Debug rendering of the offending span.
        annotation: String,
    },

    /// A span reaches past the end of its document or has `start > end`.
    #[error("span {start}..{end} is out of bounds for text of length {len}")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// An offset splits a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// The offending byte offset.
        offset: usize,
    },

    /// Two sequences that must be parallel have different lengths.
    #[error("{what}: expected {expected} entries, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The word tokenizer pattern failed to compile.
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// The subword encoder failed.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

/// Result type alias for spanfold operations.
pub type Result<T> = std::result::Result<T, SpanfoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SpanfoldError::MultiLabelSpan {
            annotation: "0..5 {X, Y}".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0..5 {X, Y}"));
        assert!(msg.contains("multi-label"));

        let err = SpanfoldError::SpanOutOfBounds {
            start: 3,
            end: 12,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "span 3..12 is out of bounds for text of length 10"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpanfoldError>();
    }
}
