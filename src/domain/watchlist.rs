//! Watched asset ids.

use serde::Serialize;

/// Insertion-ordered set of asset ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Watchlist {
    ids: Vec<String>,
}

impl Watchlist {
    /// Build from stored ids, dropping blanks and duplicates (first occurrence wins).
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for id in ids {
            let id = id.into();
            if !id.trim().is_empty() && !list.contains(&id) {
                list.ids.push(id);
            }
        }
        list
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Add the id if absent, remove it if present. Returns whether it is now watched.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original() {
        let mut list = Watchlist::from_ids(["bitcoin"]);
        let original = list.clone();

        assert!(list.toggle("ethereum"));
        assert!(list.contains("ethereum"));
        assert!(!list.toggle("ethereum"));
        assert_eq!(list, original);

        assert!(!list.toggle("bitcoin"));
        assert!(list.toggle("bitcoin"));
        assert_eq!(list, original);
    }

    #[test]
    fn from_ids_deduplicates() {
        let list = Watchlist::from_ids(["a", "b", "a", " ", "c", "b"]);
        assert_eq!(list.ids(), ["a", "b", "c"]);
    }
}
