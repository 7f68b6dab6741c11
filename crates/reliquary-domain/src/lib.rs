//! Reliquary Domain Layer
//!
//! This crate contains the data model and the selection-aggregation engine.
//! Its only dependency is `indexmap`, which keeps attribute maps in source
//! column order. Storage, parsing and presentation live in other crates.
//!
//! ## Key Concepts
//!
//! - **ItemRecord**: one parsed item, identified by `(name, tier)`
//! - **Catalog**: every record available for selection
//! - **Selection**: the user's ordered list of chosen items (duplicates count)
//! - **AggregationEngine**: owns the selection and sums attributes against the catalog
//! - **Tier**: numbered level, always at least 1

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod catalog;
pub mod record;
pub mod selection;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use aggregate::{AggregationEngine, Counts, Totals};
pub use catalog::Catalog;
pub use record::{ItemKey, ItemRecord};
pub use selection::{Selection, SelectionEntry};
pub use tier::Tier;
