//! Headline analysis: normalization, topic classification, impact scoring.

pub mod normalize;
pub mod scoring;
pub mod topics;

pub use crate::analyze::normalize::normalize;
pub use crate::analyze::scoring::{impact_score, MAX_SCORE};
pub use crate::analyze::topics::{classify, DEFAULT_TOPIC};

/// Topic and score for a single headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub topic: &'static str,
    pub score: u32,
}

/// Normalize once, then classify and score.
pub fn assess(title: &str) -> Assessment {
    let norm = normalize(title);
    Assessment {
        topic: topics::classify_normalized(&norm),
        score: scoring::impact_score_normalized(&norm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaking_war_attack_is_guerra_27() {
        let a = assess("Breaking: war attack kills dozens");
        assert_eq!(a.topic, "guerra");
        assert_eq!(a.score, 27);
    }

    #[test]
    fn urgent_crisis_war_explosion_scores_35() {
        let a = assess("URGENT crisis: war explosion rocks capital");
        assert_eq!(a.score, 35);
        // "crisis" is an economia keyword and economia is declared before guerra
        assert_eq!(a.topic, "economia");
    }
}
