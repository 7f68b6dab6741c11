//! Error types for overlay operations

use thiserror::Error;

/// Errors that can occur while driving the overlay
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The dispatcher has stopped and no longer accepts events
    #[error("Overlay dispatcher is closed")]
    Closed,
}
