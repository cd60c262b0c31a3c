//! Derived text metrics

/// Number of non-empty whitespace-separated tokens.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Text up to, not including, the first `\n`; the whole content if there is none.
pub fn first_line(content: &str) -> &str {
    match content.find('\n') {
        Some(idx) => &content[..idx],
        None => content,
    }
}
