//! Topic classification by first keyword match.

use super::normalize::normalize;

/// Returned when no keyword of any topic matches.
pub const DEFAULT_TOPIC: &str = "other";

/// Topics in classification order; keywords are checked in listed order.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "politica",
        &["trump", "biden", "election", "president", "congress", "senado"],
    ),
    (
        "economia",
        &["inflation", "fed", "markets", "petróleo", "oil", "crisis"],
    ),
    (
        "migracion",
        &["border", "migrant", "immigration", "frontera", "deportación"],
    ),
    (
        "guerra",
        &["war", "attack", "drone", "missile", "guerra", "bombardeo"],
    ),
    (
        "crimen",
        &["shooting", "arrest", "crime", "police", "tiroteo", "asesinato"],
    ),
    (
        "farandula",
        &["celebrity", "hollywood", "oscars", "famoso", "escándalo"],
    ),
];

/// Classify a raw title. Substring containment on the normalized form, so
/// "fed" also hits "federal"; that is accepted.
pub fn classify(title: &str) -> &'static str {
    classify_normalized(&normalize(title))
}

/// Classify an already-normalized title.
pub fn classify_normalized(norm: &str) -> &'static str {
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, kws)| kws.iter().any(|kw| norm.contains(kw)))
        .map(|(topic, _)| *topic)
        .unwrap_or(DEFAULT_TOPIC)
}
