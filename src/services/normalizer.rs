//! Scientific name normalization.
//!
//! Produces the canonical lookup key used for cache entries, local table
//! keys and outgoing web queries, so that records differing only in case
//! or stray punctuation resolve identically.

/// Rank qualifiers dropped from names longer than two words.
const RANK_QUALIFIERS: [&str; 5] = ["var", "ssp", "subsp", "x", "f"];

/// Normalize a free-text scientific name.
///
/// Lower-cases, keeps only `a-z` and spaces, trims, and when more than
/// two words remain removes rank qualifiers. Words are rejoined with
/// single spaces.
///
/// ```
/// use taxalign::services::normalize;
///
/// assert_eq!(normalize("Quercus alba var. alba"), "quercus alba alba");
/// assert_eq!(normalize("  Acer   rubrum "), "acer rubrum");
/// ```
pub fn normalize(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 2 {
        words
            .into_iter()
            .filter(|word| !RANK_QUALIFIERS.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        words.join(" ")
    }
}
