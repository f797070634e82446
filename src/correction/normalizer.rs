//! Local rule-based text normalizer.
//!
//! [`normalize`] is the deterministic stand-in for the remote corrector.  It
//! does no spelling or grammar work, only mechanical cleanup, applied in a
//! fixed order because each rule relies on the output of the previous one:
//!
//! | # | Rule | Example |
//! |---|------|---------|
//! | 1 | CRLF → LF | `"a\r\nb"` → `"a\nb"` |
//! | 2 | Tab → space | `"a\tb"` → `"a b"` |
//! | 3 | Collapse whitespace runs, trim | `"  a   b "` → `"a b"` |
//! | 4 | Drop the space before `. , ; ! ?` | `"a , b ."` → `"a, b."` |
//! | 5 | Uppercase the first character | `"a b."` → `"A b."` |
//! | 6 | Ensure terminal `.`, `!` or `?` | `"A b"` → `"A b."` |
//!
//! Rules 5 and 6 only fire on a non-empty string, so blank input stays empty.
//!
//! "Whitespace" means the ASCII set (space, `\t`, `\n`, `\x0B`, `\x0C`,
//! `\r`).  Unicode spaces such as NBSP are ordinary characters here and
//! survive untouched.  Rule 5 keeps the first character as it is when its
//! uppercase form is more than one character (`ß` stays `ß`).

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Punctuation that must not be preceded by a space.
const TIGHT_PUNCTUATION: [char; 5] = ['.', ',', ';', '!', '?'];

/// Characters accepted as sentence terminators.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Whitespace collapsed by rule 3.
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\x0B', '\x0C', '\r'];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalize `input` with the fixed rule sequence described in the module docs.
///
/// Total, pure and idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use text_polisher::correction::normalize;
///
/// assert_eq!(normalize("  hello   world  "), "Hello world.");
/// assert_eq!(normalize("this is bad , ok ?"), "This is bad, ok?");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(input: &str) -> String {
    let unix = input.replace("\r\n", "\n");
    let untabbed = unix.replace('\t', " ");
    let collapsed = collapse_whitespace(&untabbed);
    let tightened = tighten_punctuation(&collapsed);

    if tightened.is_empty() {
        return tightened;
    }

    let mut out = capitalize_first(&tightened);
    if !out.ends_with(TERMINATORS) {
        out.push('.');
    }
    out
}

/// [`normalize`] for callers that may hold no text at all; `None` yields `""`.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Replace every maximal whitespace run with one space and trim both ends.
fn collapse_whitespace(s: &str) -> String {
    s.split(WHITESPACE)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove a single space sitting directly before tight punctuation.
///
/// Expects collapsed input, so there is never more than one space to drop.
fn tighten_punctuation(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ' ' && chars.peek().is_some_and(|next| TIGHT_PUNCTUATION.contains(next)) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Uppercase the first character and leave the remainder untouched.
///
/// A character whose uppercase form is not a single `char` is kept as is.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let first = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    std::iter::once(first).chain(chars).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
