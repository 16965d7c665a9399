//! Per-field fault isolation.
//!
//! The host may refuse any single property read or write. Capture and restore
//! touch dozens of properties per effect and must keep going past each
//! refusal, so every optional host call goes through one of these two
//! adapters: the outcome becomes an `Option` or a `bool`, the failure is
//! logged and dropped.

use super::host::{Field, HostResult};
use tracing::{debug, trace};

/// Fault-isolating adapters for single host calls.
pub trait Probe<T> {
    /// Outcome of an optional read: the value, or `None` when the host did
    /// not expose it.
    fn probe(self, field: Field) -> Option<T>;
}

impl<T> Probe<T> for HostResult<T> {
    #[inline]
    fn probe(self, field: Field) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(%field, error = %err, "host read unavailable");
                None
            },
        }
    }
}

/// Fault-isolating adapter for an optional host write.
pub trait Apply {
    /// Whether the write landed. A refused write is logged and dropped.
    fn apply(self, field: Field) -> bool;
}

impl Apply for HostResult<()> {
    #[inline]
    fn apply(self, field: Field) -> bool {
        match self {
            Ok(()) => true,
            Err(err) => {
                debug!(%field, error = %err, "host write refused");
                false
            },
        }
    }
}
