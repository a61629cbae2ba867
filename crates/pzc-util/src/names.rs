//! Name table - insertion-ordered spelling storage.
//!
//! The scanner records every identifier and number spelling it encounters
//! in a [`NameTable`] and emits tokens that carry a [`NameId`] instead of
//! the spelling itself. The table deduplicates by spelling: interning the
//! same string twice yields the same id. Ids are dense and assigned in
//! first-occurrence order, which makes the table trivially serializable as
//! a whitespace-separated list (position 0 is the first entry).
//!
//! The table is append-only while the scanner runs and read-only for the
//! rest of the pipeline.

use indexmap::IndexSet;
use std::fmt;

/// A compact handle to a spelling stored in a [`NameTable`].
///
/// Comparing two `NameId`s compares table positions, so two tokens refer
/// to the same spelling exactly when their ids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(u32);

impl NameId {
    /// Returns the table position as a plain index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deduplicating, insertion-ordered table of spellings.
///
/// # Example
///
/// ```
/// use pzc_util::NameTable;
///
/// let mut names = NameTable::new();
/// let a = names.intern("x");
/// let b = names.intern("count");
/// let c = names.intern("x");
///
/// assert_eq!(a, c);
/// assert_ne!(a, b);
/// assert_eq!(names.get(b), "count");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameTable {
    entries: IndexSet<String>,
}

impl NameTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a spelling if it is not already present and returns its id.
    pub fn intern(&mut self, spelling: &str) -> NameId {
        let (index, _) = self.entries.insert_full(spelling.to_owned());
        NameId(index as u32)
    }

    /// Looks up a spelling without inserting.
    pub fn lookup(&self, spelling: &str) -> Option<NameId> {
        self.entries.get_index_of(spelling).map(|i| NameId(i as u32))
    }

    /// Returns the spelling for an id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not produced by this table.
    pub fn get(&self, id: NameId) -> &str {
        self.entries
            .get_index(id.index())
            .map(String::as_str)
            .unwrap_or_else(|| panic!("NameId {} out of range", id))
    }

    /// Number of distinct spellings in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no spelling has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates spellings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Serializes the table in its persisted form: spellings in insertion
    /// order, separated by single spaces.
    pub fn to_table_string(&self) -> String {
        self.entries
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rebuilds a table from its persisted form.
    pub fn from_table_string(text: &str) -> Self {
        let mut table = Self::new();
        for word in text.split_whitespace() {
            table.intern(word);
        }
        table
    }
}
