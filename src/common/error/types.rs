//! Unified error types for anim-keeper.
//!
//! Field-level and record-level host faults never surface here; they are
//! absorbed where they happen. This type only covers failures the caller has
//! to act on.
use thiserror::Error;

/// Main error type for anim-keeper operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reported by the host automation surface
    #[error("Host error: {0}")]
    Host(crate::timeline::HostError),

    /// The timeline could not be captured at all
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Restore aborted during the clear or lead-insert phase
    #[error("Restore failed: {0}")]
    Restore(String),

    /// Snapshot or options could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for anim-keeper operations.
pub type Result<T> = std::result::Result<T, Error>;
