//! Named snapshots of a selection ("builds")

use crate::StoreError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use reliquary_domain::traits::SnapshotBackend;
use reliquary_domain::{Selection, SelectionEntry, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Storage key holding every snapshot
pub const SNAPSHOT_KEY: &str = "savedBuilds";

/// Prefix of generated snapshot names
pub const AUTO_NAME_PREFIX: &str = "Build_";

/// Stored form of one selection entry
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    name: String,
    tier: u32,
}

/// Stored form of the whole mapping: name -> entries
type StoredSnapshots = IndexMap<String, Vec<StoredEntry>>;

/// Generate a snapshot name from a timestamp, e.g. `Build_2024-05-01_13-45`
pub fn auto_name(now: DateTime<Utc>) -> String {
    format!("{}{}", AUTO_NAME_PREFIX, now.format("%Y-%m-%d_%H-%M"))
}

/// Store of named selection snapshots
///
/// The whole mapping lives under one backend key. It is read once by
/// [`SnapshotStore::load_all`] and written back in full by every `save` and
/// `delete`, before those calls return.
///
/// # Examples
///
/// ```
/// use reliquary_domain::{Selection, SelectionEntry, Tier};
/// use reliquary_store::{MemoryBackend, SnapshotStore};
///
/// let mut store = SnapshotStore::load_all(MemoryBackend::new());
/// let selection = Selection::from(vec![SelectionEntry::new("Ring", Tier::FIRST)]);
///
/// let name = store.save(Some("duelist"), &selection).unwrap();
/// assert_eq!(name, "duelist");
/// assert_eq!(store.load("duelist", &Selection::new()), selection);
/// ```
pub struct SnapshotStore<B> {
    backend: B,
    key: String,
    snapshots: IndexMap<String, Selection>,
}

impl<B> SnapshotStore<B>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    /// Read every snapshot from the backend
    ///
    /// Never fails: a missing, unreadable or malformed value yields an empty
    /// store and a warning.
    pub fn load_all(backend: B) -> Self {
        Self::load_all_with_key(backend, SNAPSHOT_KEY)
    }

    /// Read every snapshot stored under a custom key
    pub fn load_all_with_key(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let snapshots = match backend.read(&key) {
            Ok(Some(blob)) => decode(&blob).unwrap_or_else(|e| {
                warn!("Ignoring malformed snapshot data under '{}': {}", key, e);
                IndexMap::new()
            }),
            Ok(None) => IndexMap::new(),
            Err(e) => {
                warn!("Could not read snapshots under '{}': {}", key, e);
                IndexMap::new()
            }
        };

        debug!("Loaded {} snapshots", snapshots.len());
        Self {
            backend,
            key,
            snapshots,
        }
    }

    /// Save a copy of `selection` under `name`, or under a generated name
    ///
    /// The name is stored as given; an absent or empty name is replaced by
    /// [`auto_name`] of the current time. An existing snapshot with the same name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] if the backend write fails; the store is
    /// then left as it was before the call.
    pub fn save(&mut self, name: Option<&str>, selection: &Selection) -> Result<String, StoreError> {
        self.save_at(name, selection, Utc::now())
    }

    /// [`save`](Self::save) with an explicit clock reading
    pub fn save_at(
        &mut self,
        name: Option<&str>,
        selection: &Selection,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let name = match name.filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => auto_name(now),
        };

        let previous = self.snapshots.insert(name.clone(), selection.clone());
        if let Err(e) = self.persist() {
            match previous {
                Some(previous) => {
                    self.snapshots.insert(name, previous);
                }
                None => {
                    self.snapshots.shift_remove(&name);
                }
            }
            return Err(e);
        }

        info!("Saved snapshot '{}' ({} entries)", name, selection.len());
        Ok(name)
    }

    /// Stored selection for `name`, or `current` unchanged if there is none
    pub fn load(&self, name: &str, current: &Selection) -> Selection {
        match self.snapshots.get(name) {
            Some(selection) => selection.clone(),
            None => {
                debug!("No snapshot named '{}'", name);
                current.clone()
            }
        }
    }

    /// Remove the snapshot `name`; absent names are a no-op
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persist`] if the backend write fails; the snapshot
    /// is then kept.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let Some((index, name, selection)) = self.snapshots.shift_remove_full(name) else {
            return Ok(());
        };

        if let Err(e) = self.persist() {
            self.snapshots.shift_insert(index, name, selection);
            return Err(e);
        }

        info!("Deleted snapshot '{}'", name);
        Ok(())
    }

    /// Get a stored snapshot
    pub fn get(&self, name: &str) -> Option<&Selection> {
        self.snapshots.get(name)
    }

    /// Whether a snapshot exists
    pub fn contains(&self, name: &str) -> bool {
        self.snapshots.contains_key(name)
    }

    /// Snapshot names, in the order they were first saved
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.snapshots.keys().map(String::as_str)
    }

    /// All snapshots
    pub fn snapshots(&self) -> &IndexMap<String, Selection> {
        &self.snapshots
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot is stored
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give back the underlying backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let blob = encode(&self.snapshots)?;
        self.backend
            .write(&self.key, &blob)
            .map_err(|e| StoreError::Persist(e.to_string()))
    }
}

fn encode(snapshots: &IndexMap<String, Selection>) -> Result<String, StoreError> {
    let stored: StoredSnapshots = snapshots
        .iter()
        .map(|(name, selection)| {
            let entries = selection
                .iter()
                .map(|e| StoredEntry {
                    name: e.name.clone(),
                    tier: e.tier.get(),
                })
                .collect();
            (name.clone(), entries)
        })
        .collect();
    Ok(serde_json::to_string(&stored)?)
}

fn decode(blob: &str) -> Result<IndexMap<String, Selection>, StoreError> {
    let stored: StoredSnapshots = serde_json::from_str(blob)?;
    stored
        .into_iter()
        .map(|(name, entries)| {
            let selection = entries
                .into_iter()
                .map(|e| {
                    Tier::new(e.tier)
                        .map(|tier| SelectionEntry::new(e.name, tier))
                        .ok_or_else(|| StoreError::InvalidData(format!("tier 0 in snapshot '{}'", name)))
                })
                .collect::<Result<Selection, _>>()?;
            Ok((name, selection))
        })
        .collect()
}
