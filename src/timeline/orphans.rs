//! Orphaned media effect cleanup.
//!
//! A previous insertion can leave a media playback effect pointing at a shape
//! that is gone. Such entries are removed before capture so the snapshot
//! starts from a clean sequence.
//!
//! Deleting from a live sequence renumbers every later entry. The pass
//! therefore walks from the tail: an entry's position is only ever affected by
//! deletions at lower positions, which have not happened yet.

use super::host::{EffectHandle, Field, ShapeHandle, Timeline};
use super::probe::Probe;
use super::resolver::resolve_shape;
use super::types::ShapeRef;
use crate::common::is_media_effect;
use tracing::{debug, info};

/// Remove media playback effects whose shape no longer resolves.
///
/// Best effort: errors while inspecting or deleting an entry are logged and
/// the pass moves on. Returns the number of entries removed.
pub fn clean_orphans<T: Timeline>(timeline: &mut T) -> usize {
    let count = match timeline.effect_count() {
        Ok(count) => count,
        Err(err) => {
            debug!(error = %err, "orphan cleanup skipped, timeline unavailable");
            return 0;
        },
    };
    let live_shapes = timeline.shapes().probe(Field::Shapes);

    let mut removed = 0;
    for index in (1..=count).rev() {
        let orphaned = match timeline.effect(index) {
            Ok(effect) => is_orphan(&effect, live_shapes.as_deref()),
            Err(err) => {
                debug!(index, error = %err, "effect unreadable during orphan cleanup");
                false
            },
        };
        if !orphaned {
            continue;
        }

        match timeline.delete_effect(index) {
            Ok(()) => {
                removed += 1;
                debug!(index, "orphaned media effect removed");
            },
            Err(err) => debug!(index, error = %err, "orphaned media effect could not be removed"),
        }
    }

    if removed > 0 {
        info!(removed, "orphaned media effects cleaned up");
    }
    removed
}

/// A media effect whose shape cannot be read, or is no longer on the slide.
fn is_orphan<E: EffectHandle>(effect: &E, live_shapes: Option<&[E::Shape]>) -> bool {
    match effect.effect_type() {
        Ok(code) if is_media_effect(code) => {},
        _ => return false,
    }

    let Ok(shape) = effect.shape() else {
        return true;
    };
    let Ok(name) = shape.name() else {
        return true;
    };

    match live_shapes {
        Some(shapes) => {
            let shape_ref = ShapeRef::new(shape.id().ok(), Some(name));
            resolve_shape(&shape_ref, shapes).is_none()
        },
        None => false,
    }
}
