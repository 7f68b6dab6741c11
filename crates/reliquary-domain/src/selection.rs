//! Selection module - the user's ordered list of chosen items

use crate::{ItemKey, ItemRecord, Tier};

/// One chosen item instance
///
/// Several entries may share the same `(name, tier)`; each one counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionEntry {
    /// Item name
    pub name: String,
    /// Chosen tier (may stop resolving after a catalog reload)
    pub tier: Tier,
}

impl SelectionEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }

    /// Display key for this entry
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.name.clone(), self.tier)
    }
}

impl From<&ItemRecord> for SelectionEntry {
    fn from(record: &ItemRecord) -> Self {
        Self::new(record.name.clone(), record.tier)
    }
}

/// Ordered sequence of selection entries
///
/// Order is display order only; totals do not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<SelectionEntry>);

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end
    pub fn push(&mut self, entry: SelectionEntry) {
        self.0.push(entry);
    }

    /// Remove the entry at `position`, if any
    pub fn remove(&mut self, position: usize) -> Option<SelectionEntry> {
        (position < self.0.len()).then(|| self.0.remove(position))
    }

    /// Get the entry at `position`
    pub fn get(&self, position: usize) -> Option<&SelectionEntry> {
        self.0.get(position)
    }

    /// Get a mutable reference to the entry at `position`
    pub fn get_mut(&mut self, position: usize) -> Option<&mut SelectionEntry> {
        self.0.get_mut(position)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the selection is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in display order
    pub fn iter(&self) -> std::slice::Iter<'_, SelectionEntry> {
        self.0.iter()
    }

    /// Entries as a slice
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.0
    }
}

impl From<Vec<SelectionEntry>> for Selection {
    fn from(entries: Vec<SelectionEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<SelectionEntry> for Selection {
    fn from_iter<I: IntoIterator<Item = SelectionEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Selection {
    type Item = SelectionEntry;
    type IntoIter = std::vec::IntoIter<SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
