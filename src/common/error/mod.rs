//! Unified error types for anim-keeper.
//!
//! This module provides the crate-level error type returned by the
//! orchestration, configuration and serialization entry points.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
