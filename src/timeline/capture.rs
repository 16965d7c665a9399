//! Timeline capture.
//!
//! Walks the live sequence in host order and records every non-media effect.
//! The mandatory fields (type, trigger, duration) decide whether a record
//! exists at all; everything else is read independently through
//! [`Probe`], so one missing property never costs another.

use super::host::{
    BehaviorHandle, EffectHandle, Field, HostResult, MotionCoord, PropertyEnd, ShapeHandle,
    SmoothEdge, Timeline,
};
use super::probe::Probe;
use super::types::{
    BehaviorDetail, BehaviorKind, BehaviorRecord, EffectOption, EffectOptions, EffectRecord,
    MotionFields, PropertyFields, ShapeRef, Snapshot, TextDescriptor, Trigger,
};
use crate::common::codes::effect_type_name;
use crate::common::is_media_effect;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

/// Capture the animation sequence of a slide.
///
/// Media playback effects are left out. Effects whose mandatory fields cannot
/// be read are dropped. If the sequence itself cannot be read the returned
/// snapshot is empty and carries `capture_error`.
pub fn capture<T: Timeline>(timeline: &T) -> Snapshot {
    let count = match timeline.effect_count() {
        Ok(count) => count,
        Err(err) => {
            warn!(error = %err, "timeline unavailable, nothing captured");
            return Snapshot::failed(format!("timeline unavailable: {}", err));
        },
    };

    let mut snapshot = Snapshot::new();
    let mut media = 0usize;
    let mut dropped = 0usize;

    for index in 1..=count {
        let captured = timeline
            .effect(index)
            .and_then(|effect| capture_effect(index, &effect));
        match captured {
            Ok(Some(record)) => snapshot.push(record),
            Ok(None) => media += 1,
            Err(err) => {
                dropped += 1;
                debug!(index, error = %err, "effect dropped from snapshot");
            },
        }
    }

    info!(
        effects = snapshot.len(),
        media,
        dropped,
        text_animations = snapshot.has_text_animations,
        "timeline captured"
    );
    snapshot
}

/// Capture one effect. `Ok(None)` for a media effect, `Err` when a mandatory
/// field is unreadable.
fn capture_effect<E: EffectHandle>(index: usize, effect: &E) -> HostResult<Option<EffectRecord>> {
    let effect_type = effect.effect_type()?;
    if is_media_effect(effect_type) {
        return Ok(None);
    }

    let trigger = Trigger::new(effect.trigger_type()?.into(), effect.trigger_delay()?);
    let duration = effect.duration()?;

    let mut record = EffectRecord::new(index, capture_shape_ref(effect), effect_type, trigger, duration);
    record.speed = effect.speed().probe(Field::Speed);
    record.rewind = effect.rewind().probe(Field::Rewind);
    record.repeat_count = effect.repeat_count().probe(Field::RepeatCount);
    record.auto_reverse = effect.auto_reverse().probe(Field::AutoReverse);
    record.effect_options = capture_options(effect);
    record.text_descriptor = capture_text(effect);
    record.behaviors = capture_behaviors(effect);

    if record.is_text_scoped() {
        debug!(
            index,
            shape = %record.shape_ref.label(),
            effect = effect_type_name(effect_type).unwrap_or("custom"),
            "text-scoped effect captured"
        );
    }
    Ok(Some(record))
}

fn capture_shape_ref<E: EffectHandle>(effect: &E) -> ShapeRef {
    match effect.shape().probe(Field::Shape) {
        Some(shape) => ShapeRef::new(
            shape.id().probe(Field::ShapeId),
            shape.name().probe(Field::ShapeName),
        ),
        None => ShapeRef::default(),
    }
}

fn capture_options<E: EffectHandle>(effect: &E) -> EffectOptions {
    let mut options = EffectOptions::default();
    for key in EffectOption::ALL {
        if let Some(value) = effect.option(key).probe(Field::Option(key)) {
            options.insert(key, value);
        }
    }
    options
}

/// Text descriptor, present only when the effect is text-scoped.
fn capture_text<E: EffectHandle>(effect: &E) -> Option<TextDescriptor> {
    let descriptor = TextDescriptor {
        text_unit_effect: effect.text_unit_effect().probe(Field::TextUnitEffect),
        paragraph: effect.paragraph().probe(Field::Paragraph),
        range_start: effect.text_range_start().probe(Field::TextRangeStart),
        range_length: effect.text_range_length().probe(Field::TextRangeLength),
    };
    descriptor.is_text_scoped().then_some(descriptor)
}

fn capture_behaviors<E: EffectHandle>(effect: &E) -> SmallVec<[BehaviorRecord; 2]> {
    let count = effect
        .behavior_count()
        .probe(Field::BehaviorCount)
        .unwrap_or(0);

    // An unreadable behavior still takes its slot so positions line up with
    // the behaviors the host regenerates on restore.
    (1..=count)
        .map(|position| {
            effect
                .behavior(position)
                .probe(Field::Behavior)
                .map(|behavior| capture_behavior(&behavior))
                .unwrap_or_default()
        })
        .collect()
}

fn capture_behavior<B: BehaviorHandle>(behavior: &B) -> BehaviorRecord {
    let type_code = behavior.type_code().probe(Field::BehaviorType);
    let detail = match BehaviorKind::from_code(type_code) {
        BehaviorKind::Motion => {
            let coord = |c: MotionCoord| behavior.motion(c).probe(Field::Motion(c));
            BehaviorDetail::Motion(MotionFields {
                from_x: coord(MotionCoord::FromX),
                from_y: coord(MotionCoord::FromY),
                to_x: coord(MotionCoord::ToX),
                to_y: coord(MotionCoord::ToY),
            })
        },
        BehaviorKind::Property => {
            let value = |end: PropertyEnd| {
                behavior
                    .property_value(end)
                    .probe(Field::PropertyValue(end))
            };
            BehaviorDetail::Property(PropertyFields {
                property_id: behavior.property_id().probe(Field::PropertyId),
                from_value: value(PropertyEnd::From),
                to_value: value(PropertyEnd::To),
            })
        },
        BehaviorKind::Other => BehaviorDetail::Other,
    };

    BehaviorRecord {
        detail,
        accumulate: behavior.accumulate().probe(Field::Accumulate),
        additive: behavior.additive().probe(Field::Additive),
        smooth_start: behavior
            .smoothing(SmoothEdge::Start)
            .probe(Field::Smooth(SmoothEdge::Start)),
        smooth_end: behavior
            .smoothing(SmoothEdge::End)
            .probe(Field::Smooth(SmoothEdge::End)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TriggerKind;
    use crate::common::codes::{EFFECT_MEDIA_PLAY, TRIGGER_AFTER_PREVIOUS};
    use crate::timeline::memory::{BehaviorState, EffectState, MemoryTimeline};
    use crate::timeline::types::OptionValue;

    const FADE: i32 = 10;
    const WIPE: i32 = 22;

    #[test]
    fn test_capture_skips_media_effects() {
        let mut timeline = MemoryTimeline::new();
        let audio = timeline.add_shape("Audio 1");
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(EffectState::new(&audio, EFFECT_MEDIA_PLAY));
        timeline.push_effect(EffectState::new(&box1, FADE));
        timeline.push_effect(EffectState::new(&box1, WIPE));

        let snapshot = capture(&timeline);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.effects.iter().all(|e| e.effect_type != EFFECT_MEDIA_PLAY));
        assert_eq!(snapshot.effects[0].index, 2);
        assert_eq!(snapshot.effects[1].index, 3);
        assert_eq!(snapshot.effects[1].effect_type, WIPE);
    }

    #[test]
    fn test_capture_mandatory_fields() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape_with_id(12, "Box1");
        timeline.push_effect(
            EffectState::new(&box1, FADE)
                .with_trigger(TRIGGER_AFTER_PREVIOUS, 0.25)
                .with_duration(1.5),
        );

        let snapshot = capture(&timeline);
        let record = &snapshot.effects[0];
        assert_eq!(record.shape_ref, ShapeRef::new(Some(12), Some("Box1".into())));
        assert_eq!(record.trigger.kind, TriggerKind::AfterPrevious);
        assert_eq!(record.trigger.delay, 0.25);
        assert_eq!(record.duration, 1.5);
        assert!(snapshot.capture_error.is_none());
    }

    #[test]
    fn test_unreadable_mandatory_field_drops_record() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        let box2 = timeline.add_shape("Box2");
        timeline.push_effect(EffectState::new(&box1, FADE).unreadable(Field::Duration));
        timeline.push_effect(EffectState::new(&box2, WIPE));

        let snapshot = capture(&timeline);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.effects[0].shape_ref.name.as_deref(), Some("Box2"));
    }

    #[test]
    fn test_optional_fields_are_isolated() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        box1.hide(Field::ShapeId);
        timeline.push_effect(
            EffectState::new(&box1, FADE)
                .with_speed(2.0)
                .with_repeat_count(3)
                .with_option(EffectOption::Direction, OptionValue::Int(4))
                .with_option(EffectOption::Amount, OptionValue::Float(150.0))
                .unreadable(Field::Rewind)
                .unreadable(Field::Option(EffectOption::Direction)),
        );

        let record = &capture(&timeline).effects[0];
        assert_eq!(record.speed, Some(2.0));
        assert_eq!(record.rewind, None);
        assert_eq!(record.repeat_count, Some(3));
        assert_eq!(record.auto_reverse, Some(false));
        assert_eq!(record.shape_ref, ShapeRef::named("Box1"));
        assert_eq!(record.effect_options.direction, None);
        assert_eq!(record.effect_options.amount, Some(150.0));
        assert_eq!(record.effect_options.len(), 1);
    }

    #[test]
    fn test_missing_shape_keeps_record() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(EffectState::new(&box1, FADE).unreadable(Field::Shape));

        let snapshot = capture(&timeline);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.effects[0].shape_ref.is_empty());
    }

    #[test]
    fn test_text_scoped_effects_are_flagged() {
        let mut timeline = MemoryTimeline::new();
        let body = timeline.add_shape("Body");
        let title = timeline.add_shape("Title");
        timeline.push_effect(EffectState::new(&body, FADE).with_paragraph(1));
        timeline.push_effect(EffectState::new(&body, WIPE).with_text_unit_effect(2));
        timeline.push_effect(
            EffectState::new(&title, FADE)
                .with_text_unit_effect(1)
                .with_text_range(0, 5),
        );

        let snapshot = capture(&timeline);
        assert!(snapshot.has_text_animations);
        assert_eq!(
            snapshot.text_animation_shapes.iter().collect::<Vec<_>>(),
            vec!["Body", "Title"]
        );
        let descriptor = snapshot.effects[2].text_descriptor.as_ref().unwrap();
        assert_eq!(descriptor.text_unit_effect, Some(1));
        assert_eq!(descriptor.paragraph, None);
        assert_eq!(descriptor.range_start, Some(0));
        assert_eq!(descriptor.range_length, Some(5));
    }

    #[test]
    fn test_text_range_alone_is_not_text_scoped() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(EffectState::new(&box1, FADE).with_text_range(0, 3));

        let snapshot = capture(&timeline);
        assert!(!snapshot.has_text_animations);
        assert!(snapshot.effects[0].text_descriptor.is_none());
    }

    #[test]
    fn test_behaviors_captured_by_kind() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(
            EffectState::new(&box1, FADE)
                .with_behavior(
                    BehaviorState::motion((0.0, 0.0), (0.5, -0.25))
                        .with_accumulate(1)
                        .with_smoothing(0.3, 0.7),
                )
                .with_behavior(BehaviorState::property(9, "0", "1").with_additive(2))
                .with_behavior(BehaviorState::other(6)),
        );

        let record = &capture(&timeline).effects[0];
        assert_eq!(record.behaviors.len(), 3);

        let motion = &record.behaviors[0];
        assert_eq!(motion.kind(), BehaviorKind::Motion);
        assert_eq!(
            motion.detail,
            BehaviorDetail::Motion(MotionFields {
                from_x: Some(0.0),
                from_y: Some(0.0),
                to_x: Some(0.5),
                to_y: Some(-0.25),
            })
        );
        assert_eq!(motion.accumulate, Some(1));
        assert_eq!(motion.smooth_start, Some(0.3));
        assert_eq!(motion.smooth_end, Some(0.7));

        let property = &record.behaviors[1];
        assert_eq!(
            property.detail,
            BehaviorDetail::Property(PropertyFields {
                property_id: Some(9),
                from_value: Some("0".into()),
                to_value: Some("1".into()),
            })
        );
        assert_eq!(property.additive, Some(2));
        assert_eq!(property.smooth_start, None);

        assert_eq!(record.behaviors[2].kind(), BehaviorKind::Other);
    }

    #[test]
    fn test_behavior_subfields_are_isolated() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(EffectState::new(&box1, FADE).with_behavior(
            BehaviorState::motion((1.0, 2.0), (3.0, 4.0))
                .unreadable(Field::Motion(MotionCoord::FromY))
                .unreadable(Field::Accumulate),
        ));

        let behavior = &capture(&timeline).effects[0].behaviors[0];
        let BehaviorDetail::Motion(fields) = &behavior.detail else {
            panic!("expected motion behavior");
        };
        assert_eq!(fields.from_x, Some(1.0));
        assert_eq!(fields.from_y, None);
        assert_eq!(fields.to_y, Some(4.0));
        assert_eq!(behavior.accumulate, None);
    }

    #[test]
    fn test_unreadable_behavior_count_keeps_record() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(
            EffectState::new(&box1, FADE)
                .with_behavior(BehaviorState::other(6))
                .unreadable(Field::BehaviorCount),
        );

        let snapshot = capture(&timeline);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.effects[0].behaviors.is_empty());
    }

    #[test]
    fn test_unusable_timeline_reports_error() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.push_effect(EffectState::new(&box1, FADE));
        timeline.fail_effect_count();

        let snapshot = capture(&timeline);
        assert!(snapshot.is_empty());
        assert!(snapshot.capture_error.as_deref().unwrap().contains("timeline unavailable"));
    }

    #[test]
    fn test_end_to_end_capture() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        let box2 = timeline.add_shape("Box2");
        timeline.push_effect(EffectState::new(&box1, FADE));
        timeline.push_effect(
            EffectState::new(&box2, WIPE)
                .with_trigger(TRIGGER_AFTER_PREVIOUS, 0.0)
                .with_paragraph(0),
        );

        let snapshot = capture(&timeline);
        assert!(snapshot.has_text_animations);
        assert_eq!(snapshot.text_animation_shapes.len(), 1);
        assert!(snapshot.text_animation_shapes.contains("Box2"));
    }
}
