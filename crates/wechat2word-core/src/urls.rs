//! Article link extraction from the raw URL input.

/// Literal prefix a line must start with to count as an article link.
pub const URL_PREFIX: &str = "http";

/// Extract candidate article URLs from a multi-line buffer.
///
/// Lines are trimmed and kept only when they start with `http`
/// (case-sensitive). Order and duplicates are preserved.
pub fn parse_article_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(URL_PREFIX))
        .map(ToOwned::to_owned)
        .collect()
}

/// Number of lines [`parse_article_urls`] would keep.
pub fn count_article_urls(raw: &str) -> usize {
    raw.lines()
        .filter(|line| line.trim().starts_with(URL_PREFIX))
        .count()
}
