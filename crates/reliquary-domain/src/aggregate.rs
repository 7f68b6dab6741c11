//! Aggregation engine - owns the selection and sums attributes against the catalog
//!
//! Totals are recomputed from scratch on every read. Selections hold tens of
//! entries, so there is no incremental state to keep in sync.

use crate::{Catalog, ItemRecord, Selection, SelectionEntry, Tier};
use indexmap::IndexMap;

/// Attribute sums over a selection, in first-seen attribute order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals(IndexMap<String, f64>);

impl Totals {
    /// Sum for one attribute
    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.0.get(attribute).copied()
    }

    /// All sums, including zero-valued attributes
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sums worth displaying (non-zero)
    pub fn non_zero(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.iter().filter(|(_, v)| *v != 0.0)
    }

    /// Number of attributes present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attribute was matched at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> IndexMap<String, f64> {
        self.0
    }

    fn add(&mut self, record: &ItemRecord) {
        for (attribute, value) in &record.attributes {
            *self.0.entry(attribute.clone()).or_insert(0.0) += value;
        }
    }
}

/// Occurrence count per display key (`"<name> (tier <T>)"`), in first-seen order
pub type Counts = IndexMap<String, usize>;

/// Selection-aggregation engine
///
/// Owns the current catalog and the current selection. Positions are plain
/// display indices; callers re-index after every mutation.
///
/// # Examples
///
/// ```
/// use reliquary_domain::{AggregationEngine, Catalog, ItemRecord, Tier};
/// use reliquary_domain::record::Attributes;
///
/// let mut attributes = Attributes::new();
/// attributes.insert("power".to_string(), 10.0);
/// let ring = ItemRecord::new("Ring", Tier::FIRST, attributes);
///
/// let mut engine = AggregationEngine::new(Catalog::from_records(vec![ring.clone()]));
/// engine.select(&ring);
/// engine.select(&ring);
///
/// assert_eq!(engine.compute_totals().get("power"), Some(20.0));
/// assert_eq!(engine.compute_counts()["Ring (tier 1)"], 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    catalog: Catalog,
    selection: Selection,
}

impl AggregationEngine {
    /// Create an engine over a catalog with an empty selection
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
        }
    }

    /// Current catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the catalog wholesale; the selection is kept as is
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Replace the selection (e.g. with a loaded snapshot)
    pub fn replace_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Append an entry for `record`
    pub fn select(&mut self, record: &ItemRecord) {
        self.selection.push(SelectionEntry::from(record));
    }

    /// Remove the entry at `position`; out of range is a no-op
    pub fn remove(&mut self, position: usize) {
        self.selection.remove(position);
    }

    /// Overwrite the tier of the entry at `position`; out of range is a no-op
    ///
    /// The tier is not checked against the catalog. An unknown combination
    /// simply stops resolving.
    pub fn set_tier(&mut self, position: usize, tier: Tier) {
        if let Some(entry) = self.selection.get_mut(position) {
            entry.tier = tier;
        }
    }

    /// Empty the selection
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Record behind the entry at `position`, if it resolves
    pub fn resolve(&self, position: usize) -> Option<&ItemRecord> {
        let entry = self.selection.get(position)?;
        self.catalog.get(&entry.name, entry.tier)
    }

    /// Positions whose entry has no matching record in the catalog
    pub fn unresolved(&self) -> Vec<usize> {
        self.selection
            .iter()
            .enumerate()
            .filter(|(_, e)| !self.catalog.contains(&e.name, e.tier))
            .map(|(position, _)| position)
            .collect()
    }

    /// Sum every attribute over the entries that resolve
    pub fn compute_totals(&self) -> Totals {
        let mut totals = Totals::default();
        for entry in &self.selection {
            if let Some(record) = self.catalog.get(&entry.name, entry.tier) {
                totals.add(record);
            }
        }
        totals
    }

    /// Count entries per display key
    pub fn compute_counts(&self) -> Counts {
        let mut counts = Counts::new();
        for entry in &self.selection {
            *counts.entry(entry.key().to_string()).or_insert(0) += 1;
        }
        counts
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::record::Attributes;
    use proptest::prelude::*;

    const NAMES: [&str; 3] = ["Ring", "Amulet", "Crown"];

    /// Catalog holding every name in tiers 1..=2; tier 3 never resolves
    fn catalog() -> Catalog {
        let mut records = Vec::new();
        for (i, name) in NAMES.iter().enumerate() {
            for t in 1..=2u32 {
                let mut attributes = Attributes::new();
                attributes.insert("power".to_string(), (i as f64 + 1.0) * t as f64);
                attributes.insert("luck".to_string(), t as f64);
                records.push(ItemRecord::new(*name, Tier::new(t).unwrap(), attributes));
            }
        }
        Catalog::from_records(records)
    }

    fn selection_strategy() -> impl Strategy<Value = Vec<(usize, u32)>> {
        prop::collection::vec((0..NAMES.len(), 1..=3u32), 0..30)
    }

    proptest! {
        /// Property: totals equal the sum over matched entries only
        #[test]
        fn test_totals_sum_matched_entries(picks in selection_strategy()) {
            let mut engine = AggregationEngine::new(catalog());
            let entries: Vec<SelectionEntry> = picks
                .iter()
                .map(|(n, t)| SelectionEntry::new(NAMES[*n], Tier::new(*t).unwrap()))
                .collect();
            engine.replace_selection(Selection::from(entries));

            let mut expected_power = 0.0;
            let mut expected_luck = 0.0;
            let mut matched = 0;
            for (n, t) in &picks {
                if *t <= 2 {
                    expected_power += (*n as f64 + 1.0) * *t as f64;
                    expected_luck += *t as f64;
                    matched += 1;
                }
            }

            let totals = engine.compute_totals();
            if matched == 0 {
                prop_assert!(totals.is_empty());
            } else {
                prop_assert_eq!(totals.get("power"), Some(expected_power));
                prop_assert_eq!(totals.get("luck"), Some(expected_luck));
            }
        }

        /// Property: counts always add up to the selection length
        #[test]
        fn test_counts_sum_to_length(picks in selection_strategy()) {
            let mut engine = AggregationEngine::new(catalog());
            for (n, t) in &picks {
                let entry = SelectionEntry::new(NAMES[*n], Tier::new(*t).unwrap());
                let mut selection = engine.selection().clone();
                selection.push(entry);
                engine.replace_selection(selection);
            }

            let total: usize = engine.compute_counts().values().sum();
            prop_assert_eq!(total, picks.len());
        }
    }
}
