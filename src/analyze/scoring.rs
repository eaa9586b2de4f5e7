//! Impact scoring: additive keyword weights with a hard cap.
//!
//! Every term found as a substring of the normalized title contributes its
//! full weight; there is no partial credit. The sum is clamped to `MAX_SCORE`.

use super::normalize::normalize;

pub const MAX_SCORE: u32 = 40;

/// High-salience terms and their weights.
pub const IMPACT_TERMS: &[(&str, u32)] = &[
    ("breaking", 10),
    ("última hora", 12),
    ("urgent", 10),
    ("attack", 8),
    ("explosion", 9),
    ("crisis", 7),
    ("war", 9),
    ("tiroteo", 9),
];

/// Score a raw title.
pub fn impact_score(title: &str) -> u32 {
    impact_score_normalized(&normalize(title))
}

/// Score an already-normalized title.
pub fn impact_score_normalized(norm: &str) -> u32 {
    let raw: u32 = IMPACT_TERMS
        .iter()
        .filter(|(term, _)| norm.contains(term))
        .map(|(_, w)| *w)
        .sum();
    raw.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_matching_terms() {
        assert_eq!(impact_score("Breaking: attack on convoy"), 18);
        assert_eq!(impact_score("Nothing to see here"), 0);
    }

    #[test]
    fn multiword_term_matches() {
        assert_eq!(impact_score("Última hora: tiroteo en el centro"), 21);
    }

    #[test]
    fn capped_at_max() {
        // 10 + 12 + 10 + 8 + 9 + 7 + 9 + 9 = 74 -> 40
        let t = "breaking última hora urgent attack explosion crisis war tiroteo";
        assert_eq!(impact_score(t), MAX_SCORE);
    }

    #[test]
    fn substring_containment_counts_once_per_term() {
        // "warfare" contains "war"; repeated terms do not stack
        assert_eq!(impact_score("war war warfare"), 9);
    }
}
