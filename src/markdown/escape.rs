//! Pure markdown escaping utilities.
//!
//! Unlike a fixed-charset escaper, each call site names exactly the
//! characters that are significant in its position: `[]` inside link text,
//! `()` inside link targets, `|` inside table cells, `*~\` inside formatted
//! runs.

use std::borrow::Cow;

/// Escape every occurrence of a character in `charset` with a backslash.
///
/// All charset members are escaped independently in a single pass, so a
/// backslash inserted for one character is never re-escaped for another.
/// Characters absent from `charset` pass through untouched — including
/// backslashes already present in `text`, unless backslash itself is a
/// member of `charset`. Re-escaping with a charset containing backslash
/// doubles the backslash count on every pass; that is the intended
/// behavior, not a defect.
///
/// # Examples
///
/// ```
/// use docmark::markdown::escape;
///
/// assert_eq!(escape("a|b", "|"), "a\\|b");
/// assert_eq!(escape("\\", "\\"), "\\\\");
/// assert_eq!(escape("\\", ""), "\\");
/// ```
pub fn escape<'a>(text: &'a str, charset: &str) -> Cow<'a, str> {
    if charset.is_empty() || !text.chars().any(|c| charset.contains(c)) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if charset.contains(c) {
            result.push('\\');
        }
        result.push(c);
    }
    Cow::Owned(result)
}
