//! Canonical comparable form for headlines.
//!
//! Lower-cases, replaces everything outside `[a-z0-9]`, the Spanish accented
//! vowels / `ü` / `ñ`, and whitespace with a space, then folds whitespace runs
//! and trims. Keyword tables are written against this form.

use once_cell::sync::OnceCell;
use regex::Regex;

fn re_disallowed() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9áéíóúüñ\s]").unwrap())
}

fn re_ws() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize a raw title. Empty input yields an empty string.
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let stripped = re_disallowed().replace_all(&lower, " ");
    let folded = re_ws().replace_all(&stripped, " ");
    folded.trim().to_string()
}
