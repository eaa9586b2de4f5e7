// src/dedup.rs
//! Seen-link cache. Append-only for the process lifetime; never evicted.

use std::collections::HashSet;

/// Set abstraction over already-processed item links.
pub trait SeenStore: Send {
    /// Insert `link`; returns `true` if it was not present before.
    fn insert(&mut self, link: &str) -> bool;
    fn contains(&self, link: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeenStore for HashSet<String> {
    fn insert(&mut self, link: &str) -> bool {
        HashSet::insert(self, link.to_string())
    }

    fn contains(&self, link: &str) -> bool {
        HashSet::contains(self, link)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_insert_reports_seen() {
        let mut seen: Box<dyn SeenStore> = Box::new(HashSet::new());
        assert!(seen.insert("https://example.com/a"));
        assert!(!seen.insert("https://example.com/a"));
        assert!(seen.contains("https://example.com/a"));
        assert!(!seen.contains("https://example.com/b"));
        assert_eq!(seen.len(), 1);
    }
}
