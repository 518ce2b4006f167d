//! Pattern tables mapping variant spellings to canonical ones
//!
//! A [`PatternTable`] is immutable once built and owns the compiled matcher
//! used by substitution. Changing the mappings means building a new table.

mod automaton;
pub mod config;
pub mod loader;

pub(crate) use automaton::{Hit, Matcher};

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A `(variant, canonical)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatternEntry {
    /// Spelling to look for
    pub variant: String,
    /// Replacement text
    pub canonical: String,
}

impl PatternEntry {
    /// Create an entry
    pub fn new(variant: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            canonical: canonical.into(),
        }
    }

    fn key_len(&self) -> usize {
        self.variant.chars().count()
    }
}

/// Longer keys first, then lexicographic
fn table_order(a: &PatternEntry, b: &PatternEntry) -> Ordering {
    b.key_len()
        .cmp(&a.key_len())
        .then_with(|| a.variant.cmp(&b.variant))
}

/// Mutable staging area for a [`PatternTable`]
///
/// Later inserts override earlier ones. Identity mappings are kept while
/// staging, so they can cancel an earlier entry, and are dropped by
/// [`build`](Self::build) together with empty keys.
#[derive(Debug, Clone, Default)]
pub struct PatternTableBuilder {
    entries: HashMap<String, String>,
}

impl PatternTableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage one mapping
    pub fn insert(&mut self, variant: impl Into<String>, canonical: impl Into<String>) -> &mut Self {
        self.entries.insert(variant.into(), canonical.into());
        self
    }

    /// Stage mappings in order
    pub fn extend<I, K, V>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (variant, canonical) in mapping {
            self.insert(variant, canonical);
        }
        self
    }

    /// Freeze the staged mappings
    pub fn build(&self) -> PatternTable {
        let mut entries: Vec<PatternEntry> = self
            .entries
            .iter()
            .filter(|(variant, canonical)| !variant.is_empty() && variant != canonical)
            .map(|(variant, canonical)| PatternEntry::new(variant.as_str(), canonical.as_str()))
            .collect();
        entries.sort_by(table_order);
        PatternTable::from_sorted(entries)
    }
}

/// Immutable mapping table with its compiled matcher
#[derive(Clone)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    index: HashMap<String, usize>,
    matcher: Matcher,
    max_key_len: usize,
}

impl PatternTable {
    fn from_sorted(entries: Vec<PatternEntry>) -> Self {
        let matcher = Matcher::new(entries.iter().map(|e| e.variant.as_str()));
        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.variant.clone(), idx))
            .collect();
        let max_key_len = entries.first().map_or(0, PatternEntry::key_len);
        let table = Self {
            entries,
            index,
            matcher,
            max_key_len,
        };

        tracing::debug!(
            entries = table.len(),
            max_key_len = table.max_key_len,
            "built pattern table"
        );
        let unstable = table.unstable_entries().len();
        if unstable > 0 {
            tracing::warn!(
                unstable,
                "pattern table has canonical values that are rewritten again"
            );
        }
        table
    }

    /// Table without any mapping
    pub fn empty() -> Self {
        Self::from_sorted(Vec::new())
    }

    /// Merge ordered sources into a table
    ///
    /// Returns the table and the entries it ended up holding.
    pub fn build<S, I, K, V>(sources: S) -> (Self, Vec<PatternEntry>)
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = PatternTableBuilder::new();
        for source in sources {
            builder.extend(source);
        }
        let table = builder.build();
        let installed = table.entries.clone();
        (table, installed)
    }

    /// Build a new table from this one plus `mapping`
    ///
    /// The returned entries are the ones that changed the table: new keys
    /// and keys whose canonical value differs. A mapping to itself removes
    /// the key and is not reported.
    pub fn register<I, K, V>(&self, mapping: I) -> (Self, Vec<PatternEntry>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut staged = PatternTableBuilder::new();
        staged.extend(mapping);

        let mut builder = self.to_builder();
        let mut effective = Vec::new();
        for (variant, canonical) in staged.entries {
            let changes = !variant.is_empty()
                && variant != canonical
                && self.get(&variant) != Some(canonical.as_str());
            if changes {
                effective.push(PatternEntry::new(variant.as_str(), canonical.as_str()));
            }
            builder.insert(variant, canonical);
        }
        effective.sort_by(table_order);
        (builder.build(), effective)
    }

    /// Staging copy of this table
    pub fn to_builder(&self) -> PatternTableBuilder {
        let mut builder = PatternTableBuilder::new();
        builder.extend(
            self.entries
                .iter()
                .map(|e| (e.variant.as_str(), e.canonical.as_str())),
        );
        builder
    }

    /// Entries by descending key length, ties in lexicographic order
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Canonical value for a variant
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.index
            .get(variant)
            .map(|&idx| self.entries[idx].canonical.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest key in code points
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Entries whose canonical value contains another key
    ///
    /// Substitution never rescans its output, so such entries make
    /// normalization non-idempotent.
    pub fn unstable_entries(&self) -> Vec<&PatternEntry> {
        self.entries
            .iter()
            .filter(|e| self.matcher.occurs_in(&e.canonical))
            .collect()
    }

    pub(crate) fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub(crate) fn canonical_of(&self, hit: Hit) -> &str {
        &self.entries[hit.entry as usize].canonical
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for PatternTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternTable")
            .field("len", &self.entries.len())
            .field("max_key_len", &self.max_key_len)
            .finish()
    }
}

impl PartialEq for PatternTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for PatternTable {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(table: &PatternTable) -> Vec<&str> {
        table.entries().iter().map(|e| e.variant.as_str()).collect()
    }

    #[test]
    fn test_later_sources_override() {
        let (table, installed) =
            PatternTable::build([vec![("a", "x"), ("b", "y")], vec![("a", "z")]]);
        assert_eq!(table.get("a"), Some("z"));
        assert_eq!(table.get("b"), Some("y"));
        assert_eq!(installed.len(), 2);
    }

    #[test]
    fn test_identity_and_empty_keys_dropped() {
        let (table, installed) = PatternTable::build([vec![("a", "a"), ("", "x"), ("b", "c")]]);
        assert_eq!(keys(&table), vec!["b"]);
        assert_eq!(installed, vec![PatternEntry::new("b", "c")]);
    }

    #[test]
    fn test_identity_cancels_earlier_entry() {
        let (table, _) = PatternTable::build([vec![("a", "x")], vec![("a", "a")]]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_entry_order() {
        let (table, _) = PatternTable::build([vec![
            ("b", "1"),
            ("abc", "2"),
            ("a", "3"),
            ("zz", "4"),
            ("ab", "5"),
        ]]);
        assert_eq!(keys(&table), vec!["abc", "ab", "zz", "a", "b"]);
        assert_eq!(table.max_key_len(), 3);
    }

    #[test]
    fn test_key_length_counts_code_points() {
        let (table, _) = PatternTable::build([vec![("ｶﾞ", "ガ"), ("abc", "x")]]);
        assert_eq!(keys(&table), vec!["abc", "ｶﾞ"]);
    }

    #[test]
    fn test_register_returns_effective_entries() {
        let (table, _) = PatternTable::build([vec![("a", "x"), ("b", "y")]]);
        let (next, effective) = table.register([("a", "x"), ("b", "w"), ("c", "c"), ("d", "v")]);

        assert_eq!(
            effective,
            vec![PatternEntry::new("b", "w"), PatternEntry::new("d", "v")]
        );
        assert_eq!(next.get("b"), Some("w"));
        assert_eq!(next.len(), 3);
        // The receiver is untouched
        assert_eq!(table.get("b"), Some("y"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_register_last_write_wins() {
        let (next, effective) = PatternTable::empty().register([("k", "1"), ("k", "2")]);
        assert_eq!(effective, vec![PatternEntry::new("k", "2")]);
        assert_eq!(next.get("k"), Some("2"));
    }

    #[test]
    fn test_register_identity_removes_key() {
        let (table, _) = PatternTable::build([vec![("a", "x")]]);
        let (next, effective) = table.register([("a", "a")]);
        assert!(effective.is_empty());
        assert!(next.get("a").is_none());
    }

    #[test]
    fn test_unstable_entries() {
        let (table, _) = PatternTable::build([vec![("a", "b"), ("b", "c"), ("x", "y")]]);
        let unstable: Vec<&str> = table
            .unstable_entries()
            .iter()
            .map(|e| e.variant.as_str())
            .collect();
        assert_eq!(unstable, vec!["a"]);
    }

    #[test]
    fn test_builder_roundtrip() {
        let (table, _) = PatternTable::build([vec![("a", "x"), ("bb", "y")]]);
        assert_eq!(table.to_builder().build(), table);
    }
}
