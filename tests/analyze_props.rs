// tests/analyze_props.rs
//
// Randomized checks for normalizer / classifier / scorer invariants.
// Titles are assembled from keyword fragments plus noise so matches are common.

use rand::prelude::*;

use viral_news_watch::analyze::scoring::IMPACT_TERMS;
use viral_news_watch::analyze::topics::TOPIC_KEYWORDS;
use viral_news_watch::analyze::{assess, classify, impact_score, normalize, DEFAULT_TOPIC, MAX_SCORE};

const FRAGMENTS: &[&str] = &[
    "BREAKING", "Última Hora", "urgent", "ATTACK", "explosion", "crisis", "War", "tiroteo",
    "Trump", "FED", "Border", "missile", "Police", "Hollywood", "Escándalo", "deportación",
    "capital", "markets", "año", "niño", "Voilà", "Straße", "東京", "🚨", "42", "—", "!!", "\t",
    "\n", "  ", "...", "\"quoted\"", "l'été", "über",
];

fn random_title(rng: &mut impl Rng) -> String {
    let n = rng.random_range(0..10);
    let mut parts = Vec::with_capacity(n);
    for _ in 0..n {
        parts.push(*FRAGMENTS.choose(rng).unwrap());
    }
    let sep = [" ", "", ": ", "-"];
    parts.join(*sep.choose(rng).unwrap())
}

fn allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || "áéíóúüñ".contains(c)
}

fn reference_topic(norm: &str) -> &'static str {
    for (topic, kws) in TOPIC_KEYWORDS {
        for kw in kws.iter() {
            if norm.contains(kw) {
                return *topic;
            }
        }
    }
    DEFAULT_TOPIC
}

fn reference_score(norm: &str) -> u32 {
    let mut s: u32 = 0;
    for (term, w) in IMPACT_TERMS {
        if norm.contains(term) {
            s += w;
        }
    }
    s.min(MAX_SCORE)
}

#[test]
fn normalized_output_uses_only_allowed_chars_and_single_spaces() {
    let mut rng = rand::rng();
    for _ in 0..2_000 {
        let t = random_title(&mut rng);
        let n = normalize(&t);
        assert!(n.chars().all(allowed), "{t:?} -> {n:?}");
        assert!(!n.contains("  "), "{t:?} -> {n:?}");
        assert_eq!(n, n.trim(), "{t:?} -> {n:?}");
        // idempotent
        assert_eq!(normalize(&n), n);
    }
}

#[test]
fn classifier_and_scorer_match_reference() {
    let mut rng = rand::rng();
    for _ in 0..2_000 {
        let t = random_title(&mut rng);
        let n = normalize(&t);
        assert_eq!(classify(&t), reference_topic(&n), "{t:?}");
        let s = impact_score(&t);
        assert_eq!(s, reference_score(&n), "{t:?}");
        assert!(s <= MAX_SCORE);

        let a = assess(&t);
        assert_eq!(a.topic, classify(&t));
        assert_eq!(a.score, s);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(impact_score("Breaking news: attack reported"), 18);
    assert_eq!(normalize("Breaking: war attack kills dozens"), "breaking war attack kills dozens");
    assert_eq!(classify("Breaking: war attack kills dozens"), "guerra");
    assert_eq!(impact_score("Breaking: war attack kills dozens"), 27);
    assert_eq!(impact_score("URGENT crisis: war explosion rocks capital"), 35);
}
