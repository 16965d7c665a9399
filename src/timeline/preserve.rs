//! Preserve animations around a disruptive media insertion.
//!
//! Runs the whole workflow: clean orphans, capture, ask the gate, let the
//! caller insert the media, then rebuild the timeline with the new media
//! effect first.

use super::capture::capture;
use super::config::PreserveOptions;
use super::gate::evaluate_with;
use super::host::Timeline;
use super::orphans::clean_orphans;
use super::restore::{RestoreReport, restore_with};
use super::types::Snapshot;
use crate::common::{Error, Result};
use tracing::{info, warn};

/// Result of [`preserve_animations`].
#[derive(Debug, Clone, PartialEq)]
pub enum PreserveOutcome {
    /// The gate advised against inserting; nothing was changed after capture.
    Declined { reason: String, snapshot: Snapshot },
    /// The media was inserted and the timeline rebuilt.
    Restored(RestoreReport),
}

impl PreserveOutcome {
    pub fn is_declined(&self) -> bool {
        matches!(self, PreserveOutcome::Declined { .. })
    }

    pub fn report(&self) -> Option<&RestoreReport> {
        match self {
            PreserveOutcome::Restored(report) => Some(report),
            PreserveOutcome::Declined { .. } => None,
        }
    }
}

/// Insert media with `insert` while keeping the slide's animation timeline.
///
/// `insert` performs the disruptive operation and returns the shape of the
/// newly inserted media. It is not called when the timeline cannot be
/// captured or when the gate declines.
///
/// # Errors
///
/// - [`Error::Config`] if `options` fail validation
/// - [`Error::Capture`] if the timeline could not be read at all
/// - any error returned by `insert`
/// - [`Error::Restore`] if the timeline could not be cleared or the lead
///   effect could not be added
pub fn preserve_animations<T, F>(
    timeline: &mut T,
    options: &PreserveOptions,
    insert: F,
) -> Result<PreserveOutcome>
where
    T: Timeline,
    F: FnOnce(&mut T) -> Result<T::Shape>,
{
    options.validate()?;

    if options.clean_orphans {
        clean_orphans(timeline);
    }

    let snapshot = capture(timeline);
    if let Some(err) = &snapshot.capture_error {
        return Err(Error::Capture(err.clone()));
    }

    let verdict = evaluate_with(&snapshot, options.listed_shape_limit);
    if verdict.should_skip {
        if !options.proceed_with_text_animations {
            info!(reason = %verdict.reason, "media insertion declined");
            return Ok(PreserveOutcome::Declined {
                reason: verdict.reason,
                snapshot,
            });
        }
        warn!(reason = %verdict.reason, "inserting media despite text animations");
    }

    let resource = insert(timeline)?;

    let report = restore_with(timeline, &snapshot, &resource, options.lead_effect());
    if !report.success {
        return Err(Error::Restore(
            "timeline could not be rebuilt after media insertion".to_string(),
        ));
    }
    Ok(PreserveOutcome::Restored(report))
}
