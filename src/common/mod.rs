//! Common types shared across the crate.
//!
//! This module provides the unified error type and the reserved host codes
//! used by the capture, cleanup and restore passes.

// Submodule declarations
pub mod codes;
pub mod error;

// Re-exports for convenience
pub use codes::{TriggerKind, effect_type_name, is_media_effect};
pub use error::{Error, Result};
