//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Durable string-keyed storage slot
///
/// Implemented by the infrastructure layer (reliquary-store). Reads happen once
/// at startup; writes replace the whole value and must be durable before they
/// return.
pub trait SnapshotBackend {
    /// Error type for storage operations
    type Error;

    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
