//! Query-highlighted excerpts
//!
//! Sentences are found by splitting on `.`, which is a heuristic: it breaks
//! on abbreviations ("e.g."), decimals ("3.14") and domain names.

/// Returned when no sentence contains the query
pub const NO_SNIPPET: &str = "No snippet available";

const HIGHLIGHT_OPEN: &str = "<b>";
const HIGHLIGHT_CLOSE: &str = "</b>";
const ELLIPSIS: &str = "...";

/// Builds a snippet for `query` from `text`
///
/// Returns the first `.`-delimited sentence containing the query
/// (case-insensitive), trimmed, with the first match wrapped in `<b>` tags
/// and `...` appended.
///
/// # Example
///
/// ```
/// use ripple_search::index::snippet;
///
/// assert_eq!(
///     snippet("The cat sat. The cat ran fast.", "CAT"),
///     "The <b>cat</b> sat..."
/// );
/// assert_eq!(snippet("The dog sat.", "cat"), "No snippet available");
/// ```
pub fn snippet(text: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return NO_SNIPPET.to_string();
    }

    for sentence in text.split('.') {
        let sentence = sentence.trim();
        if let Some((start, end)) = find_ignore_case(sentence, query) {
            return format!(
                "{}{}{}{}{}{}",
                &sentence[..start],
                HIGHLIGHT_OPEN,
                &sentence[start..end],
                HIGHLIGHT_CLOSE,
                &sentence[end..],
                ELLIPSIS
            );
        }
    }

    NO_SNIPPET.to_string()
}

/// Byte range of the first case-insensitive occurrence of `needle`
///
/// Works on the original string so the range can slice it directly,
/// whatever the lowercase forms' byte lengths.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = true;

        for expected in needle.chars() {
            match rest.next() {
                Some((offset, actual)) if chars_match(actual, expected) => {
                    end = start + offset + actual.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }

        if matched {
            return Some((start, end));
        }
    }

    None
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
