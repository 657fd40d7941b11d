//! Glob matching for cache keys.
//!
//! Only `*` is special; it matches any run of characters, including none.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use cachemgmt_core::cache::pattern_matches;
///
/// assert!(pattern_matches("People", "People"));
/// assert!(pattern_matches("Person-*", "Person-7d1f0e52-3c5a-4b8e-9f21-0a6c2b4d8e10"));
/// assert!(!pattern_matches("Person-*", "People"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut pieces = pattern.split('*');

    // `split` always yields at least one piece: the literal before the first `*`
    let head = pieces.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = pieces.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard at all
        return rest.is_empty();
    };

    // Leftmost placement of each inner literal leaves the most room for the rest
    for piece in middle {
        match rest.find(piece) {
            Some(pos) => rest = &rest[pos + piece.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}
