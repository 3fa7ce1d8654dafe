// Line normalization and tokenization

use std::collections::HashSet;

/// Canonical comparison form of a raw line.
///
/// Trims control characters and spaces (`<= ' '`) from both ends, collapses
/// every run of ASCII whitespace into one space and lower-cases the result.
/// Spacing around punctuation is kept, so `Foo( a )` and `foo( a )` compare
/// equal while `foo(a)` does not.
///
/// Non-ASCII whitespace such as U+00A0 is ordinary text here.
pub fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| c <= ' ')
        .split(is_ascii_space)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `[ \t\n\x0B\f\r]`
fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Token set of a normalized line: maximal runs of `[0-9A-Za-z_]`.
///
/// The candidate filter, the scorer and split refinement all go through this
/// one function so they always agree on what a token is.
pub fn tokenize(normalized: &str) -> HashSet<&str> {
    normalized
        .split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Jaccard index `|a ∩ b| / |a ∪ b|`, with two empty sets counting as 1.0.
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
