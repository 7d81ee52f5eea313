//! Filesystem-safe tokens from arbitrary text.

use unicode_normalization::UnicodeNormalization;

/// Map `input` to `[a-z0-9]` words joined by single hyphens.
///
/// NFKD first, so `é` decomposes to `e` + a combining mark; the mark is
/// not `[a-z0-9]` and splits the word (`Crème` -> `cre-me`). Every run of
/// other characters becomes one `-`; edges are trimmed. Pure and
/// infallible; may return an empty string.
pub fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.nfkd().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }

    out
}
