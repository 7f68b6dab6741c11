//! Reliquary Storage Layer
//!
//! Keeps named snapshots ("builds") of a selection in durable local storage.
//!
//! # Architecture
//!
//! - [`SnapshotBackend`](reliquary_domain::traits::SnapshotBackend) is a single
//!   string-keyed slot; [`SqliteBackend`] keeps slots in a SQLite table and
//!   [`MemoryBackend`] keeps them in a map
//! - [`SnapshotStore`] holds every snapshot in memory and rewrites the whole
//!   JSON blob under one key on every change
//!
//! # Examples
//!
//! ```no_run
//! use reliquary_store::{SnapshotStore, SqliteBackend};
//!
//! let backend = SqliteBackend::new("reliquary.db").unwrap();
//! let store = SnapshotStore::load_all(backend);
//! for name in store.names() {
//!     println!("{}", name);
//! }
//! ```

#![warn(missing_docs)]

mod backend;
mod snapshot;

pub use backend::{MemoryBackend, SqliteBackend};
pub use snapshot::{auto_name, SnapshotStore, AUTO_NAME_PREFIX, SNAPSHOT_KEY};

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The backend refused a write; nothing was persisted
    #[error("Snapshot not persisted: {0}")]
    Persist(String),
}
