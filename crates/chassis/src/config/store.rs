//! The in-memory configuration store.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named sections of key/value string pairs.
///
/// The store is schemaless: applications decide which sections and
/// keys mean something. Keys are unique within a section and later
/// writes win, which is what lets command-line overrides layer cleanly
/// on top of file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the store holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Iterates section names in sorted order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Returns a section's key/value pairs, if the section exists.
    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(name)
    }

    /// Looks up one value.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Looks up one value and parses it into `T`.
    ///
    /// Returns `None` when the key is absent and `Some(Err(_))` when
    /// the value does not parse.
    pub fn get_parsed<T: FromStr>(&self, section: &str, key: &str) -> Option<Result<T, T::Err>> {
        self.get(section, key).map(str::parse)
    }

    /// Sets one value, creating the section if needed.
    ///
    /// A later write to the same section/key wins.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = ConfigStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.get("any", "key"), None);
    }

    #[test]
    fn test_set_creates_section_implicitly() {
        let mut store = ConfigStore::new();
        store.set("server", "host", "localhost");

        assert!(!store.is_empty());
        assert!(store.section("server").is_some());
        assert_eq!(store.get("server", "host"), Some("localhost"));
    }

    #[test]
    fn test_later_write_wins() {
        let mut store = ConfigStore::new();
        store.set("server", "port", "8080");
        store.set("server", "port", "9090");

        assert_eq!(store.get("server", "port"), Some("9090"));
        assert_eq!(store.section("server").map(BTreeMap::len), Some(1));
    }

    #[test]
    fn test_sections_are_sorted() {
        let mut store = ConfigStore::new();
        store.set("zeta", "k", "v");
        store.set("alpha", "k", "v");

        let names: Vec<&str> = store.sections().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_get_parsed() {
        let mut store = ConfigStore::new();
        store.set("limits", "max", "42");
        store.set("limits", "bogus", "not-a-number");

        assert_eq!(store.get_parsed::<u32>("limits", "max"), Some(Ok(42)));
        assert!(matches!(
            store.get_parsed::<u32>("limits", "bogus"),
            Some(Err(_))
        ));
        assert_eq!(store.get_parsed::<u32>("limits", "absent"), None);
    }
}
