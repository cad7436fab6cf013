//! In-memory virtual file store
//!
//! Every generated or edited file lives here until export. Paths are flat
//! POSIX-style keys (`"my_package/README.md"`); directories are implied by
//! prefixes and never stored on their own.

use std::collections::BTreeMap;

/// Mapping of relative path to text content
///
/// Enumeration is always in lexicographic byte order, so listings and
/// archives are reproducible regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFileStore {
    entries: BTreeMap<String, String>,
}

impl VirtualFileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new file or overwrite an existing one
    pub fn add_or_update(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(path.into(), content.into());
    }

    /// Content stored at `path`, or `""` if there is no such file
    pub fn get(&self, path: &str) -> &str {
        self.entries.get(path).map(String::as_str).unwrap_or("")
    }

    /// Overwrite an existing file. Returns false (and writes nothing) if `path` is absent.
    pub fn update(&mut self, path: &str, content: impl Into<String>) -> bool {
        match self.entries.get_mut(path) {
            Some(existing) => {
                *existing = content.into();
                true
            }
            None => false,
        }
    }

    /// Remove a file. Returns whether anything was removed.
    pub fn delete(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    /// All paths, sorted lexicographically
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(path, content)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for VirtualFileStore {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (path, content) in iter {
            store.add_or_update(path, content);
        }
        store
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        #[test]
        fn list_is_sorted_distinct_written_paths(
            writes in prop::collection::vec(("[a-z/._-]{1,12}", ".{0,16}"), 0..32)
        ) {
            let mut store = VirtualFileStore::new();
            for (path, content) in &writes {
                store.add_or_update(path.as_str(), content.as_str());
            }

            let expected: Vec<String> = writes
                .iter()
                .map(|(path, _)| path.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            prop_assert_eq!(store.list(), expected);
        }

        #[test]
        fn last_write_wins(path in "[a-z]{1,8}", first in ".*", second in ".*") {
            let mut store = VirtualFileStore::new();
            store.add_or_update(path.as_str(), first);
            store.add_or_update(path.as_str(), second.as_str());
            prop_assert_eq!(store.get(&path), second.as_str());
            prop_assert_eq!(store.len(), 1);
        }
    }
}
