//! Per-session memo of alignment decisions.
//!
//! Keys are normalized queries; values are the final (name, authorship,
//! family) the record ended up with, including the case where the user
//! kept their original entry. Replaying an entry never re-prompts.

use std::collections::HashMap;

use crate::domain::models::AlignedName;

/// Unbounded map from normalized query to the decided alignment.
///
/// Cleared only as a whole, when policy configuration changes.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    entries: HashMap<String, AlignedName>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&AlignedName> {
        self.entries.get(query)
    }

    pub fn put(&mut self, query: impl Into<String>, aligned: AlignedName) {
        self.entries.insert(query.into(), aligned);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(name: &str) -> AlignedName {
        AlignedName {
            name: name.to_string(),
            authorship: "L.".to_string(),
            family: "Fagaceae".to_string(),
        }
    }

    #[test]
    fn test_put_get_clear() {
        let mut cache = SessionCache::new();
        assert!(cache.is_empty());

        cache.put("quercus alba", aligned("Quercus alba"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("quercus alba").unwrap().name, "Quercus alba");
        assert!(cache.get("quercus rubra").is_none());

        cache.clear();
        assert!(cache.get("quercus alba").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = SessionCache::new();
        cache.put("quercus alba", aligned("Quercus alba"));
        cache.put("quercus alba", aligned("Quercus alba L."));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("quercus alba").unwrap().name, "Quercus alba L.");
    }
}
