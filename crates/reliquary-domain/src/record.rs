//! Item records - the rows of a catalog

use crate::Tier;
use indexmap::IndexMap;
use std::fmt;

/// Ordered attribute values of a record, in source column order
pub type Attributes = IndexMap<String, f64>;

/// Identity of an item record: the `(name, tier)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    /// Item name
    pub name: String,
    /// Item tier
    pub tier: Tier,
}

impl ItemKey {
    /// Create a new key
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }
}

impl fmt::Display for ItemKey {
    /// Display key used for grouped counts, e.g. `Ring (tier 1)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tier {})", self.name, self.tier)
    }
}

/// A single parsed item
///
/// Records are immutable once parsed and owned by the [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// Item name
    pub name: String,

    /// Tier this record belongs to
    pub tier: Tier,

    /// Numeric attributes (identity, tier and index columns excluded)
    pub attributes: Attributes,
}

impl ItemRecord {
    /// Create a new record
    pub fn new(name: impl Into<String>, tier: Tier, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            tier,
            attributes,
        }
    }

    /// Identity key of this record
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.name.clone(), self.tier)
    }

    /// Whether this record has the given identity
    pub fn matches(&self, name: &str, tier: Tier) -> bool {
        self.tier == tier && self.name == name
    }

    /// Get one attribute value
    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }

    /// Attributes with a non-zero value, in column order
    pub fn non_zero_attributes(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.attributes
            .iter()
            .filter(|(_, value)| **value != 0.0)
            .map(|(key, value)| (key.as_str(), *value))
    }
}
