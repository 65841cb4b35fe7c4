//! Widening annotation boundaries to whole subword tokens.

/// Moves `start` back to the start of the token containing it and `end`
/// forward to the end of the token containing it.
///
/// `tokens` holds `(start, end)` byte ranges ordered by start. Offsets that
/// fall between tokens, and zero-width ranges, are returned unchanged.
pub fn widen_to_tokens(start: usize, end: usize, tokens: &[(usize, usize)]) -> (usize, usize) {
    if start >= end {
        return (start, end);
    }

    let before_start = tokens.partition_point(|&(token_start, _)| token_start <= start);
    let widened_start = match before_start.checked_sub(1).map(|i| tokens[i]) {
        Some((token_start, token_end)) if start < token_end => token_start,
        _ => start,
    };

    let before_end = tokens.partition_point(|&(token_start, _)| token_start < end);
    let widened_end = match before_end.checked_sub(1).map(|i| tokens[i]) {
        Some((_, token_end)) if end < token_end => token_end,
        _ => end,
    };

    (widened_start, widened_end)
}
