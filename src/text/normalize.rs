//! Whitespace and punctuation normalization
//!
//! "Tokens" in budgeting are whitespace-delimited words, not model tokens.

/// Punctuation outside ASCII that shows up in captions: curly quotes,
/// guillemets, primes, dashes and ellipses.
const TYPOGRAPHIC_PUNCTUATION: &[char] = &[
    '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{201C}', '\u{201D}', '\u{201E}',
    '\u{201F}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}', '\u{00B4}', '\u{2032}',
    '\u{2033}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}',
    '\u{2026}', '\u{00A1}', '\u{00BF}', '\u{00B7}', '\u{2022}', '\u{300C}', '\u{300D}',
];

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || TYPOGRAPHIC_PUNCTUATION.contains(&c)
}

/// Collapse whitespace and replace punctuation with spaces.
///
/// Punctuation becomes a space rather than being removed so that
/// `"Hello-world"` stays two words. The result never contains punctuation,
/// leading/trailing spaces or repeated spaces, so applying it twice is the
/// same as applying it once.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() || is_punctuation(c) {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    out
}

/// Number of whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep at most `limit` whole words, joined by single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}
