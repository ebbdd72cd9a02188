//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` Unicode scalar values.
///
/// Counts characters, not bytes, so multi-byte text is never split in the
/// middle of a character. Returns the input unchanged when it already fits.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
