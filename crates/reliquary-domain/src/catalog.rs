//! Catalog module - the full set of records available for selection

use crate::{ItemKey, ItemRecord, Tier};
use std::collections::{BTreeMap, HashMap};

/// Minimum number of tier columns a catalog view shows
pub const MIN_TIER_COLUMNS: u32 = 4;

/// Parsed catalog of item records, unique per `(name, tier)`
///
/// A catalog is replaced wholesale whenever a new source is loaded and is
/// never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ItemRecord>,
    index: HashMap<ItemKey, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records in source order
    ///
    /// When two records share a `(name, tier)` key the later one wins and
    /// takes the position of the earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let mut catalog = Self::new();
        for record in records {
            let key = record.key();
            match catalog.index.get(&key) {
                Some(&position) => catalog.records[position] = record,
                None => {
                    catalog.index.insert(key, catalog.records.len());
                    catalog.records.push(record);
                }
            }
        }
        catalog
    }

    /// Look up a record by exact identity
    pub fn get(&self, name: &str, tier: Tier) -> Option<&ItemRecord> {
        self.index
            .get(&ItemKey::new(name, tier))
            .map(|&position| &self.records[position])
    }

    /// Whether a record exists for the given identity
    pub fn contains(&self, name: &str, tier: Tier) -> bool {
        self.get(name, tier).is_some()
    }

    /// All records, in source order
    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    /// All tiers of one item, in source order
    pub fn find_by_name<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a ItemRecord> + 'n
    where
        'a: 'n,
    {
        self.records.iter().filter(move |r| r.name == name)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of tier columns to show: the highest tier present, but never
    /// fewer than [`MIN_TIER_COLUMNS`]
    pub fn max_tier(&self) -> u32 {
        self.records
            .iter()
            .map(|r| r.tier.get())
            .max()
            .unwrap_or(0)
            .max(MIN_TIER_COLUMNS)
    }

    /// Records bucketed by tier, in ascending tier order
    ///
    /// Tiers `1..=MIN_TIER_COLUMNS` always get a bucket, empty or not; higher
    /// tiers get one only when a record carries them.
    pub fn grouped_by_tier(&self) -> Vec<(Tier, Vec<&ItemRecord>)> {
        let mut groups: BTreeMap<Tier, Vec<&ItemRecord>> = (1..=MIN_TIER_COLUMNS)
            .filter_map(Tier::new)
            .map(|tier| (tier, Vec::new()))
            .collect();
        for record in &self.records {
            groups.entry(record.tier).or_default().push(record);
        }
        groups.into_iter().collect()
    }
}
