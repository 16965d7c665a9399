//! Timeline restore.
//!
//! Rebuilds a slide's sequence from a [`Snapshot`] after the host has
//! scrambled it: clear everything, insert the lead media effect, then replay
//! the captured effects in their original order against re-resolved shapes.
//!
//! Only the first two phases can fail the restore. Replay is best effort per
//! record, and within a record per field.

use super::host::{
    BehaviorHandle, EffectHandle, Field, HostError, HostResult, MotionCoord, PropertyEnd,
    SmoothEdge, Timeline,
};
use super::probe::{Apply, Probe};
use super::resolver::resolve_shape;
use super::types::{BehaviorDetail, BehaviorRecord, EffectRecord, Snapshot};
use crate::common::TriggerKind;
use crate::common::codes::{EFFECT_MEDIA_PLAY, effect_type_name};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Label used for text-scoped records whose shape name was not captured.
pub const UNKNOWN_SHAPE: &str = "unknown";

/// Timing of the lead effect inserted ahead of the replayed sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadEffect {
    pub trigger: TriggerKind,
    /// Delay in seconds
    pub delay: f64,
}

impl Default for LeadEffect {
    fn default() -> Self {
        Self {
            trigger: TriggerKind::AfterPrevious,
            delay: 0.0,
        }
    }
}

/// Outcome of a restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Clear and lead insertion both completed
    pub success: bool,
    /// Shapes whose text-scoped effects were not replayed
    pub skipped_shapes: BTreeSet<String>,
    /// Number of text-scoped records not replayed
    pub skipped_text_effects: usize,
    /// Records replayed onto the timeline
    pub restored: usize,
    /// Records dropped because their shape was gone or creation failed
    pub dropped: usize,
}

impl RestoreReport {
    fn failed() -> Self {
        Self::default()
    }

    /// User-facing note about text animations that need manual reapplying.
    pub fn notice(&self) -> Option<String> {
        if self.skipped_text_effects == 0 {
            return None;
        }
        let shapes = self
            .skipped_shapes
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "Skipped {} text animation(s) on shape(s): {}. \
             Text animations (by paragraph/word) must be manually reapplied after media insertion.",
            self.skipped_text_effects, shapes
        ))
    }
}

impl From<RestoreReport> for (bool, BTreeSet<String>) {
    fn from(report: RestoreReport) -> Self {
        (report.success, report.skipped_shapes)
    }
}

/// Rebuild the timeline from `snapshot` with `new_resource`'s media effect
/// first.
pub fn restore<T: Timeline>(timeline: &mut T, snapshot: &Snapshot, new_resource: &T::Shape) -> RestoreReport {
    restore_with(timeline, snapshot, new_resource, LeadEffect::default())
}

/// [`restore`] with custom lead effect timing.
pub fn restore_with<T: Timeline>(
    timeline: &mut T,
    snapshot: &Snapshot,
    new_resource: &T::Shape,
    lead: LeadEffect,
) -> RestoreReport {
    if let Err(err) = clear(timeline) {
        warn!(error = %err, "restore aborted: timeline could not be cleared");
        return RestoreReport::failed();
    }
    if let Err(err) = insert_lead(timeline, new_resource, lead) {
        warn!(error = %err, "restore aborted: lead effect could not be inserted");
        return RestoreReport::failed();
    }

    let mut report = RestoreReport {
        success: true,
        ..RestoreReport::default()
    };
    let shapes = match timeline.shapes() {
        Ok(shapes) => shapes,
        Err(err) => {
            warn!(error = %err, "shape collection unavailable, no effect can be rebound");
            Vec::new()
        },
    };

    for record in &snapshot.effects {
        match replay(timeline, &shapes, record) {
            Replay::Restored => report.restored += 1,
            Replay::TextScoped => {
                report.skipped_text_effects += 1;
                let name = record.shape_ref.name.as_deref().unwrap_or(UNKNOWN_SHAPE);
                report.skipped_shapes.insert(name.to_string());
            },
            Replay::Unresolved | Replay::Failed => report.dropped += 1,
        }
    }

    if report.skipped_text_effects > 0 {
        warn!(
            count = report.skipped_text_effects,
            shapes = ?report.skipped_shapes,
            "text animations were not restored"
        );
    }
    info!(
        restored = report.restored,
        dropped = report.dropped,
        skipped_text = report.skipped_text_effects,
        "timeline restored"
    );
    report
}

/// Empty the sequence by deleting the front entry until nothing is left.
/// Positions are re-read after every delete; no index range is cached.
fn clear<T: Timeline>(timeline: &mut T) -> HostResult<()> {
    let mut count = timeline.effect_count()?;
    while count > 0 {
        timeline.delete_effect(1)?;
        let remaining = timeline.effect_count()?;
        if remaining >= count {
            return Err(HostError::Host(format!(
                "effect count stayed at {} after delete",
                remaining
            )));
        }
        count = remaining;
    }
    Ok(())
}

fn insert_lead<T: Timeline>(timeline: &mut T, shape: &T::Shape, lead: LeadEffect) -> HostResult<()> {
    let mut effect = timeline.add_effect(shape, EFFECT_MEDIA_PLAY)?;
    effect.set_trigger_type(lead.trigger.code())?;
    effect.set_trigger_delay(lead.delay)?;
    Ok(())
}

enum Replay {
    Restored,
    TextScoped,
    Unresolved,
    Failed,
}

fn replay<T: Timeline>(timeline: &mut T, shapes: &[T::Shape], record: &EffectRecord) -> Replay {
    if record.is_text_scoped() {
        debug!(index = record.index, shape = %record.shape_ref.label(), "text-scoped effect not replayed");
        return Replay::TextScoped;
    }

    let Some(shape) = resolve_shape(&record.shape_ref, shapes) else {
        debug!(index = record.index, shape = %record.shape_ref.label(), "shape no longer on slide");
        return Replay::Unresolved;
    };

    let mut effect = match create_effect(timeline, &shape, record) {
        Ok(effect) => effect,
        Err(err) => {
            debug!(
                index = record.index,
                shape = %record.shape_ref.label(),
                effect = effect_type_name(record.effect_type).unwrap_or("custom"),
                error = %err,
                "effect could not be recreated"
            );
            return Replay::Failed;
        },
    };

    let mut tally = WriteTally::default();
    apply_timing(&mut effect, record, &mut tally);
    for (key, value) in record.effect_options.iter() {
        tally.note(effect.set_option(key, value).apply(Field::Option(key)));
    }
    apply_behaviors(&effect, &record.behaviors, &mut tally);

    if tally.refused > 0 {
        debug!(index = record.index, refused = tally.refused, "effect replayed with refused properties");
    }
    Replay::Restored
}

/// Add the effect and set its mandatory timing.
fn create_effect<T: Timeline>(timeline: &mut T, shape: &T::Shape, record: &EffectRecord) -> HostResult<T::Effect> {
    let mut effect = timeline.add_effect(shape, record.effect_type)?;
    effect.set_trigger_type(record.trigger.kind.code())?;
    effect.set_trigger_delay(record.trigger.delay)?;
    effect.set_duration(record.duration)?;
    Ok(effect)
}

#[derive(Default)]
struct WriteTally {
    refused: usize,
}

impl WriteTally {
    fn note(&mut self, landed: bool) {
        if !landed {
            self.refused += 1;
        }
    }
}

fn apply_timing<E: EffectHandle>(effect: &mut E, record: &EffectRecord, tally: &mut WriteTally) {
    if let Some(speed) = record.speed {
        tally.note(effect.set_speed(speed).apply(Field::Speed));
    }
    if let Some(rewind) = record.rewind {
        tally.note(effect.set_rewind(rewind).apply(Field::Rewind));
    }
    if let Some(count) = record.repeat_count {
        tally.note(effect.set_repeat_count(count).apply(Field::RepeatCount));
    }
    if let Some(auto_reverse) = record.auto_reverse {
        tally.note(effect.set_auto_reverse(auto_reverse).apply(Field::AutoReverse));
    }
}

/// Behaviors are matched by position: the host is expected to regenerate the
/// same behaviors, in the same order, for an effect of the same type. That is
/// an assumption, not a guarantee, so positions past the regenerated count
/// are left alone.
fn apply_behaviors<E: EffectHandle>(effect: &E, captured: &[BehaviorRecord], tally: &mut WriteTally) {
    if captured.is_empty() {
        return;
    }
    let available = effect
        .behavior_count()
        .probe(Field::BehaviorCount)
        .unwrap_or(0);
    if available < captured.len() {
        debug!(captured = captured.len(), available, "fewer behaviors regenerated than captured");
    }

    for (position, record) in captured.iter().enumerate().take(available) {
        if let Some(mut behavior) = effect.behavior(position + 1).probe(Field::Behavior) {
            apply_behavior(&mut behavior, record, tally);
        }
    }
}

fn apply_behavior<B: BehaviorHandle>(behavior: &mut B, record: &BehaviorRecord, tally: &mut WriteTally) {
    if let Some(value) = record.accumulate {
        tally.note(behavior.set_accumulate(value).apply(Field::Accumulate));
    }
    if let Some(value) = record.additive {
        tally.note(behavior.set_additive(value).apply(Field::Additive));
    }

    match &record.detail {
        BehaviorDetail::Motion(fields) => {
            let coords = [
                (MotionCoord::FromX, fields.from_x),
                (MotionCoord::FromY, fields.from_y),
                (MotionCoord::ToX, fields.to_x),
                (MotionCoord::ToY, fields.to_y),
            ];
            for (coord, value) in coords {
                if let Some(value) = value {
                    tally.note(behavior.set_motion(coord, value).apply(Field::Motion(coord)));
                }
            }
        },
        BehaviorDetail::Property(fields) => {
            let values = [
                (PropertyEnd::From, &fields.from_value),
                (PropertyEnd::To, &fields.to_value),
            ];
            for (end, value) in values {
                if let Some(value) = value {
                    tally.note(
                        behavior
                            .set_property_value(end, value)
                            .apply(Field::PropertyValue(end)),
                    );
                }
            }
        },
        BehaviorDetail::Other => {},
    }

    for (edge, value) in [
        (SmoothEdge::Start, record.smooth_start),
        (SmoothEdge::End, record.smooth_end),
    ] {
        if let Some(value) = value {
            tally.note(behavior.set_smoothing(edge, value).apply(Field::Smooth(edge)));
        }
    }
}
