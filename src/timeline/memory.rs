//! In-memory host.
//!
//! A self-contained implementation of the host traits with the same
//! observable rules as a live presentation: 1-based positions, renumbering on
//! delete, behaviors regenerated from the effect type on add, handles that go
//! stale when their shape is removed. Every property can be made unreadable or
//! write-refusing, and the sequence itself can be made to fail, so callers can
//! rehearse partial host failures without a presentation application.

use super::host::{
    BehaviorHandle, EffectHandle, Field, HostError, HostResult, MotionCoord, PropertyEnd,
    ShapeHandle, SmoothEdge, Timeline,
};
use super::types::{EffectOption, EffectOptions, OptionValue};
use crate::common::codes::{BEHAVIOR_MOTION, BEHAVIOR_PROPERTY, TRIGGER_ON_CLICK};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

fn unavailable<T>(field: Field) -> HostResult<T> {
    Err(HostError::Unavailable(field))
}

fn rejected(field: Field) -> HostError {
    HostError::Rejected {
        field,
        reason: "refused by host".to_string(),
    }
}

#[derive(Debug)]
struct ShapeCell {
    id: u32,
    name: RefCell<String>,
    removed: Cell<bool>,
    hidden: RefCell<HashSet<Field>>,
}

/// Shape on an in-memory slide.
#[derive(Debug, Clone)]
pub struct MemoryShape {
    cell: Rc<ShapeCell>,
}

impl MemoryShape {
    fn new(id: u32, name: &str) -> Self {
        Self {
            cell: Rc::new(ShapeCell {
                id,
                name: RefCell::new(name.to_string()),
                removed: Cell::new(false),
                hidden: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// Rename the shape, as a user editing the slide would.
    pub fn rename(&self, name: &str) {
        *self.cell.name.borrow_mut() = name.to_string();
    }

    /// Make one of `Field::ShapeId` / `Field::ShapeName` unreadable.
    pub fn hide(&self, field: Field) {
        self.cell.hidden.borrow_mut().insert(field);
    }

    /// Make both the id and the name unreadable.
    pub fn make_unreadable(&self) {
        self.hide(Field::ShapeId);
        self.hide(Field::ShapeName);
    }

    pub fn is_removed(&self) -> bool {
        self.cell.removed.get()
    }

    fn ptr_eq(&self, other: &MemoryShape) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    fn check(&self, field: Field) -> HostResult<()> {
        if self.cell.removed.get() {
            return Err(HostError::StaleReference(format!(
                "shape {} was removed",
                self.cell.id
            )));
        }
        if self.cell.hidden.borrow().contains(&field) {
            return unavailable(field);
        }
        Ok(())
    }
}

impl ShapeHandle for MemoryShape {
    fn id(&self) -> HostResult<u32> {
        self.check(Field::ShapeId)?;
        Ok(self.cell.id)
    }

    fn name(&self) -> HostResult<String> {
        self.check(Field::ShapeName)?;
        Ok(self.cell.name.borrow().clone())
    }
}

/// Behavior definition for in-memory effects and behavior templates.
#[derive(Debug, Clone, Default)]
pub struct BehaviorState {
    type_code: Option<i32>,
    accumulate: Option<i32>,
    additive: Option<i32>,
    motion: BTreeMap<MotionCoord, f64>,
    property_id: Option<i32>,
    values: BTreeMap<PropertyEnd, String>,
    smoothing: BTreeMap<SmoothEdge, f64>,
    unreadable: HashSet<Field>,
    rejected: HashSet<Field>,
}

impl BehaviorState {
    /// Motion behavior from `from` to `to`.
    pub fn motion(from: (f64, f64), to: (f64, f64)) -> Self {
        let mut state = Self::other(BEHAVIOR_MOTION);
        state.motion = BTreeMap::from([
            (MotionCoord::FromX, from.0),
            (MotionCoord::FromY, from.1),
            (MotionCoord::ToX, to.0),
            (MotionCoord::ToY, to.1),
        ]);
        state
    }

    /// Property behavior animating `property_id` between two values.
    pub fn property(property_id: i32, from: &str, to: &str) -> Self {
        let mut state = Self::other(BEHAVIOR_PROPERTY);
        state.property_id = Some(property_id);
        state.values = BTreeMap::from([
            (PropertyEnd::From, from.to_string()),
            (PropertyEnd::To, to.to_string()),
        ]);
        state
    }

    /// Behavior of any other type code.
    pub fn other(type_code: i32) -> Self {
        Self {
            type_code: Some(type_code),
            ..Self::default()
        }
    }

    pub fn with_accumulate(mut self, value: i32) -> Self {
        self.accumulate = Some(value);
        self
    }

    pub fn with_additive(mut self, value: i32) -> Self {
        self.additive = Some(value);
        self
    }

    pub fn with_smoothing(mut self, start: f64, end: f64) -> Self {
        self.smoothing = BTreeMap::from([(SmoothEdge::Start, start), (SmoothEdge::End, end)]);
        self
    }

    /// Reads of `field` fail.
    pub fn unreadable(mut self, field: Field) -> Self {
        self.unreadable.insert(field);
        self
    }

    /// Writes of `field` fail.
    pub fn rejecting(mut self, field: Field) -> Self {
        self.rejected.insert(field);
        self
    }

    fn is_kind(&self, code: i32) -> bool {
        self.type_code == Some(code)
    }
}

/// Live behavior of an in-memory effect.
#[derive(Debug, Clone)]
pub struct MemoryBehavior {
    state: Rc<RefCell<BehaviorState>>,
}

impl MemoryBehavior {
    fn read<T>(&self, field: Field, get: impl FnOnce(&BehaviorState) -> Option<T>) -> HostResult<T> {
        let state = self.state.borrow();
        if state.unreadable.contains(&field) {
            return unavailable(field);
        }
        get(&state).ok_or(HostError::Unavailable(field))
    }

    fn write(&mut self, field: Field, set: impl FnOnce(&mut BehaviorState) -> bool) -> HostResult<()> {
        let mut state = self.state.borrow_mut();
        if state.rejected.contains(&field) {
            return Err(rejected(field));
        }
        if set(&mut state) { Ok(()) } else { unavailable(field) }
    }
}

impl BehaviorHandle for MemoryBehavior {
    fn type_code(&self) -> HostResult<i32> {
        self.read(Field::BehaviorType, |s| s.type_code)
    }

    fn accumulate(&self) -> HostResult<i32> {
        self.read(Field::Accumulate, |s| s.accumulate)
    }

    fn set_accumulate(&mut self, value: i32) -> HostResult<()> {
        self.write(Field::Accumulate, |s| {
            s.accumulate = Some(value);
            true
        })
    }

    fn additive(&self) -> HostResult<i32> {
        self.read(Field::Additive, |s| s.additive)
    }

    fn set_additive(&mut self, value: i32) -> HostResult<()> {
        self.write(Field::Additive, |s| {
            s.additive = Some(value);
            true
        })
    }

    fn motion(&self, coord: MotionCoord) -> HostResult<f64> {
        self.read(Field::Motion(coord), |s| s.motion.get(&coord).copied())
    }

    fn set_motion(&mut self, coord: MotionCoord, value: f64) -> HostResult<()> {
        self.write(Field::Motion(coord), |s| {
            if !s.is_kind(BEHAVIOR_MOTION) {
                return false;
            }
            s.motion.insert(coord, value);
            true
        })
    }

    fn property_id(&self) -> HostResult<i32> {
        self.read(Field::PropertyId, |s| s.property_id)
    }

    fn property_value(&self, end: PropertyEnd) -> HostResult<String> {
        self.read(Field::PropertyValue(end), |s| s.values.get(&end).cloned())
    }

    fn set_property_value(&mut self, end: PropertyEnd, value: &str) -> HostResult<()> {
        self.write(Field::PropertyValue(end), |s| {
            if !s.is_kind(BEHAVIOR_PROPERTY) {
                return false;
            }
            s.values.insert(end, value.to_string());
            true
        })
    }

    fn smoothing(&self, edge: SmoothEdge) -> HostResult<f64> {
        self.read(Field::Smooth(edge), |s| s.smoothing.get(&edge).copied())
    }

    fn set_smoothing(&mut self, edge: SmoothEdge, value: f64) -> HostResult<()> {
        self.write(Field::Smooth(edge), |s| {
            s.smoothing.insert(edge, value);
            true
        })
    }
}

/// Effect definition for an in-memory timeline.
#[derive(Debug, Clone)]
pub struct EffectState {
    shape: MemoryShape,
    effect_type: i32,
    trigger_type: i32,
    trigger_delay: f64,
    duration: f64,
    speed: f64,
    rewind: bool,
    repeat_count: i32,
    auto_reverse: bool,
    text_unit_effect: Option<i32>,
    paragraph: Option<i32>,
    text_range: Option<(i32, i32)>,
    options: EffectOptions,
    behaviors: Vec<BehaviorState>,
    unreadable: HashSet<Field>,
    rejected: HashSet<Field>,
}

impl EffectState {
    /// On-click effect of `effect_type` bound to `shape`, with host defaults
    /// for every timing property.
    pub fn new(shape: &MemoryShape, effect_type: i32) -> Self {
        Self {
            shape: shape.clone(),
            effect_type,
            trigger_type: TRIGGER_ON_CLICK,
            trigger_delay: 0.0,
            duration: 0.5,
            speed: 1.0,
            rewind: false,
            repeat_count: 1,
            auto_reverse: false,
            text_unit_effect: None,
            paragraph: None,
            text_range: None,
            options: EffectOptions::default(),
            behaviors: Vec::new(),
            unreadable: HashSet::new(),
            rejected: HashSet::new(),
        }
    }

    pub fn with_trigger(mut self, trigger_type: i32, delay: f64) -> Self {
        self.trigger_type = trigger_type;
        self.trigger_delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_rewind(mut self, rewind: bool) -> Self {
        self.rewind = rewind;
        self
    }

    pub fn with_repeat_count(mut self, count: i32) -> Self {
        self.repeat_count = count;
        self
    }

    pub fn with_auto_reverse(mut self, auto_reverse: bool) -> Self {
        self.auto_reverse = auto_reverse;
        self
    }

    pub fn with_text_unit_effect(mut self, unit: i32) -> Self {
        self.text_unit_effect = Some(unit);
        self
    }

    pub fn with_paragraph(mut self, paragraph: i32) -> Self {
        self.paragraph = Some(paragraph);
        self
    }

    pub fn with_text_range(mut self, start: i32, length: i32) -> Self {
        self.text_range = Some((start, length));
        self
    }

    pub fn with_option(mut self, key: EffectOption, value: OptionValue) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorState) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Reads of `field` fail.
    pub fn unreadable(mut self, field: Field) -> Self {
        self.unreadable.insert(field);
        self
    }

    /// Writes of `field` fail.
    pub fn rejecting(mut self, field: Field) -> Self {
        self.rejected.insert(field);
        self
    }
}

#[derive(Debug)]
struct EffectCell {
    state: EffectState,
    behaviors: Vec<MemoryBehavior>,
}

/// Live effect of an in-memory timeline.
#[derive(Debug, Clone)]
pub struct MemoryEffect {
    cell: Rc<RefCell<EffectCell>>,
}

impl MemoryEffect {
    fn new(mut state: EffectState) -> Self {
        let behaviors = std::mem::take(&mut state.behaviors)
            .into_iter()
            .map(|behavior| MemoryBehavior {
                state: Rc::new(RefCell::new(behavior)),
            })
            .collect();
        Self {
            cell: Rc::new(RefCell::new(EffectCell { state, behaviors })),
        }
    }

    fn read<T>(&self, field: Field, get: impl FnOnce(&EffectState) -> Option<T>) -> HostResult<T> {
        let cell = self.cell.borrow();
        if cell.state.unreadable.contains(&field) {
            return unavailable(field);
        }
        get(&cell.state).ok_or(HostError::Unavailable(field))
    }

    fn write(&mut self, field: Field, set: impl FnOnce(&mut EffectState)) -> HostResult<()> {
        let mut cell = self.cell.borrow_mut();
        if cell.state.rejected.contains(&field) {
            return Err(rejected(field));
        }
        set(&mut cell.state);
        Ok(())
    }

    fn shape_name(&self) -> Option<String> {
        self.cell.borrow().state.shape.name().ok()
    }

    fn effect_type_raw(&self) -> i32 {
        self.cell.borrow().state.effect_type
    }
}

impl EffectHandle for MemoryEffect {
    type Shape = MemoryShape;
    type Behavior = MemoryBehavior;

    fn effect_type(&self) -> HostResult<i32> {
        self.read(Field::EffectType, |s| Some(s.effect_type))
    }

    fn shape(&self) -> HostResult<MemoryShape> {
        self.read(Field::Shape, |s| Some(s.shape.clone()))
    }

    fn trigger_type(&self) -> HostResult<i32> {
        self.read(Field::TriggerType, |s| Some(s.trigger_type))
    }

    fn set_trigger_type(&mut self, code: i32) -> HostResult<()> {
        self.write(Field::TriggerType, |s| s.trigger_type = code)
    }

    fn trigger_delay(&self) -> HostResult<f64> {
        self.read(Field::TriggerDelay, |s| Some(s.trigger_delay))
    }

    fn set_trigger_delay(&mut self, seconds: f64) -> HostResult<()> {
        self.write(Field::TriggerDelay, |s| s.trigger_delay = seconds)
    }

    fn duration(&self) -> HostResult<f64> {
        self.read(Field::Duration, |s| Some(s.duration))
    }

    fn set_duration(&mut self, seconds: f64) -> HostResult<()> {
        self.write(Field::Duration, |s| s.duration = seconds)
    }

    fn speed(&self) -> HostResult<f64> {
        self.read(Field::Speed, |s| Some(s.speed))
    }

    fn set_speed(&mut self, speed: f64) -> HostResult<()> {
        self.write(Field::Speed, |s| s.speed = speed)
    }

    fn rewind(&self) -> HostResult<bool> {
        self.read(Field::Rewind, |s| Some(s.rewind))
    }

    fn set_rewind(&mut self, rewind: bool) -> HostResult<()> {
        self.write(Field::Rewind, |s| s.rewind = rewind)
    }

    fn repeat_count(&self) -> HostResult<i32> {
        self.read(Field::RepeatCount, |s| Some(s.repeat_count))
    }

    fn set_repeat_count(&mut self, count: i32) -> HostResult<()> {
        self.write(Field::RepeatCount, |s| s.repeat_count = count)
    }

    fn auto_reverse(&self) -> HostResult<bool> {
        self.read(Field::AutoReverse, |s| Some(s.auto_reverse))
    }

    fn set_auto_reverse(&mut self, auto_reverse: bool) -> HostResult<()> {
        self.write(Field::AutoReverse, |s| s.auto_reverse = auto_reverse)
    }

    fn text_unit_effect(&self) -> HostResult<i32> {
        self.read(Field::TextUnitEffect, |s| s.text_unit_effect)
    }

    fn paragraph(&self) -> HostResult<i32> {
        self.read(Field::Paragraph, |s| s.paragraph)
    }

    fn text_range_start(&self) -> HostResult<i32> {
        self.read(Field::TextRangeStart, |s| s.text_range.map(|(start, _)| start))
    }

    fn text_range_length(&self) -> HostResult<i32> {
        self.read(Field::TextRangeLength, |s| s.text_range.map(|(_, length)| length))
    }

    fn option(&self, key: EffectOption) -> HostResult<OptionValue> {
        self.read(Field::Option(key), |s| s.options.get(key))
    }

    fn set_option(&mut self, key: EffectOption, value: OptionValue) -> HostResult<()> {
        self.write(Field::Option(key), |s| s.options.insert(key, value))
    }

    fn behavior_count(&self) -> HostResult<usize> {
        self.read(Field::BehaviorCount, |_| Some(()))?;
        Ok(self.cell.borrow().behaviors.len())
    }

    fn behavior(&self, index: usize) -> HostResult<MemoryBehavior> {
        self.read(Field::Behavior, |_| Some(()))?;
        let cell = self.cell.borrow();
        let count = cell.behaviors.len();
        index
            .checked_sub(1)
            .and_then(|i| cell.behaviors.get(i))
            .cloned()
            .ok_or(HostError::IndexOutOfRange { index, count })
    }
}

#[derive(Debug, Default)]
struct Faults {
    effect_count: bool,
    shapes: bool,
    delete_budget: Option<usize>,
    ignore_deletes: bool,
    add_types: HashSet<i32>,
    new_effect_rejects: HashSet<Field>,
}

/// One `add_effect` call observed by the in-memory host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub shape: Option<String>,
    pub effect_type: i32,
}

/// In-memory slide: a main sequence plus the slide's shapes.
#[derive(Debug, Default)]
pub struct MemoryTimeline {
    shapes: Vec<MemoryShape>,
    effects: Vec<MemoryEffect>,
    templates: HashMap<i32, Vec<BehaviorState>>,
    next_shape_id: u32,
    faults: Faults,
    deletions: usize,
    creations: Vec<Creation>,
}

impl MemoryTimeline {
    pub fn new() -> Self {
        Self {
            next_shape_id: 2,
            ..Self::default()
        }
    }

    /// Add a shape with the next free id.
    pub fn add_shape(&mut self, name: &str) -> MemoryShape {
        let id = self.next_shape_id;
        self.add_shape_with_id(id, name)
    }

    /// Add a shape with an explicit id.
    pub fn add_shape_with_id(&mut self, id: u32, name: &str) -> MemoryShape {
        self.next_shape_id = self.next_shape_id.max(id + 1);
        let shape = MemoryShape::new(id, name);
        self.shapes.push(shape.clone());
        shape
    }

    /// Remove a shape from the slide. Effects bound to it keep a stale
    /// handle.
    pub fn remove_shape(&mut self, shape: &MemoryShape) {
        shape.cell.removed.set(true);
        self.shapes.retain(|s| !s.ptr_eq(shape));
    }

    /// Shapes currently on the slide.
    pub fn shape_list(&self) -> Vec<MemoryShape> {
        self.shapes.clone()
    }

    /// Append an effect to the main sequence.
    pub fn push_effect(&mut self, state: EffectState) -> MemoryEffect {
        let effect = MemoryEffect::new(state);
        self.effects.push(effect.clone());
        effect
    }

    /// Behaviors the host generates for new effects of `effect_type`.
    pub fn set_behavior_template(&mut self, effect_type: i32, behaviors: Vec<BehaviorState>) {
        self.templates.insert(effect_type, behaviors);
    }

    /// Make the sequence itself unreadable.
    pub fn fail_effect_count(&mut self) {
        self.faults.effect_count = true;
    }

    /// Make the shape collection unreadable.
    pub fn fail_shapes(&mut self) {
        self.faults.shapes = true;
    }

    /// Allow `budget` more deletions, then refuse every delete.
    pub fn fail_deletes_after(&mut self, budget: usize) {
        self.faults.delete_budget = Some(budget);
    }

    /// Report deletes as successful without removing anything.
    pub fn ignore_deletes(&mut self) {
        self.faults.ignore_deletes = true;
    }

    /// Refuse to add effects of `effect_type`.
    pub fn fail_adds_for(&mut self, effect_type: i32) {
        self.faults.add_types.insert(effect_type);
    }

    /// Newly added effects refuse writes of `field`.
    pub fn reject_on_new_effects(&mut self, field: Field) {
        self.faults.new_effect_rejects.insert(field);
    }

    /// Number of effects removed so far.
    pub fn deletions(&self) -> usize {
        self.deletions
    }

    /// Every `add_effect` call, in order.
    pub fn creations(&self) -> &[Creation] {
        &self.creations
    }

    /// `(effect type, shape name)` of each effect in sequence order.
    pub fn sequence(&self) -> Vec<(i32, Option<String>)> {
        self.effects
            .iter()
            .map(|effect| (effect.effect_type_raw(), effect.shape_name()))
            .collect()
    }

    fn check_index(&self, index: usize) -> HostResult<usize> {
        let count = self.effects.len();
        if index == 0 || index > count {
            return Err(HostError::IndexOutOfRange { index, count });
        }
        Ok(index - 1)
    }
}

impl Timeline for MemoryTimeline {
    type Shape = MemoryShape;
    type Effect = MemoryEffect;

    fn effect_count(&self) -> HostResult<usize> {
        if self.faults.effect_count {
            return Err(HostError::Host("main sequence is not accessible".to_string()));
        }
        Ok(self.effects.len())
    }

    fn effect(&self, index: usize) -> HostResult<MemoryEffect> {
        let position = self.check_index(index)?;
        Ok(self.effects[position].clone())
    }

    fn delete_effect(&mut self, index: usize) -> HostResult<()> {
        let position = self.check_index(index)?;
        match self.faults.delete_budget {
            Some(0) => return Err(HostError::Host("effect could not be deleted".to_string())),
            Some(ref mut budget) => *budget -= 1,
            None => {},
        }
        if self.faults.ignore_deletes {
            return Ok(());
        }
        self.effects.remove(position);
        self.deletions += 1;
        Ok(())
    }

    fn add_effect(&mut self, shape: &MemoryShape, effect_type: i32) -> HostResult<MemoryEffect> {
        shape.check(Field::Shape)?;
        if self.faults.add_types.contains(&effect_type) {
            return Err(HostError::Host(format!(
                "effect type {} cannot be applied",
                effect_type
            )));
        }

        let mut state = EffectState::new(shape, effect_type);
        state.behaviors = self.templates.get(&effect_type).cloned().unwrap_or_default();
        state.rejected = self.faults.new_effect_rejects.clone();

        self.creations.push(Creation {
            shape: shape.name().ok(),
            effect_type,
        });
        Ok(self.push_effect(state))
    }

    fn shapes(&self) -> HostResult<Vec<MemoryShape>> {
        if self.faults.shapes {
            return Err(HostError::Host("shape collection is not accessible".to_string()));
        }
        Ok(self.shapes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_renumbers_later_entries() {
        let mut timeline = MemoryTimeline::new();
        let a = timeline.add_shape("A");
        let b = timeline.add_shape("B");
        let c = timeline.add_shape("C");
        timeline.push_effect(EffectState::new(&a, 1));
        timeline.push_effect(EffectState::new(&b, 2));
        timeline.push_effect(EffectState::new(&c, 3));

        timeline.delete_effect(2).unwrap();
        assert_eq!(timeline.effect_count().unwrap(), 2);
        assert_eq!(timeline.effect(2).unwrap().effect_type().unwrap(), 3);
        assert_eq!(timeline.effect(1).unwrap().effect_type().unwrap(), 1);
        assert!(matches!(
            timeline.effect(3),
            Err(HostError::IndexOutOfRange { index: 3, count: 2 })
        ));
    }

    #[test]
    fn test_removed_shape_goes_stale() {
        let mut timeline = MemoryTimeline::new();
        let audio = timeline.add_shape("Audio");
        let effect = timeline.push_effect(EffectState::new(&audio, 83));
        timeline.remove_shape(&audio);

        let shape = effect.shape().unwrap();
        assert!(matches!(shape.name(), Err(HostError::StaleReference(_))));
        assert!(timeline.shapes().unwrap().is_empty());
        assert!(timeline.add_effect(&audio, 83).is_err());
    }

    #[test]
    fn test_add_effect_uses_behavior_template() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        timeline.set_behavior_template(
            22,
            vec![BehaviorState::property(9, "0", "1"), BehaviorState::other(6)],
        );

        let effect = timeline.add_effect(&box1, 22).unwrap();
        assert_eq!(effect.behavior_count().unwrap(), 2);
        assert_eq!(effect.behavior(1).unwrap().type_code().unwrap(), BEHAVIOR_PROPERTY);
        assert!(effect.behavior(3).is_err());
        assert_eq!(
            timeline.creations(),
            &[Creation {
                shape: Some("Box1".into()),
                effect_type: 22
            }]
        );
    }

    #[test]
    fn test_kind_specific_writes() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        let effect = timeline.push_effect(
            EffectState::new(&box1, 10).with_behavior(BehaviorState::property(9, "0", "1")),
        );

        let mut behavior = effect.behavior(1).unwrap();
        assert!(behavior.set_motion(MotionCoord::ToX, 1.0).is_err());
        assert!(behavior.set_property_value(PropertyEnd::To, "0.5").is_ok());
        assert_eq!(behavior.property_value(PropertyEnd::To).unwrap(), "0.5");
    }

    #[test]
    fn test_fault_injection() {
        let mut timeline = MemoryTimeline::new();
        let box1 = timeline.add_shape("Box1");
        let mut effect = timeline.push_effect(
            EffectState::new(&box1, 10)
                .unreadable(Field::Speed)
                .rejecting(Field::Rewind),
        );

        assert_eq!(effect.speed(), Err(HostError::Unavailable(Field::Speed)));
        assert!(matches!(
            effect.set_rewind(true),
            Err(HostError::Rejected { field: Field::Rewind, .. })
        ));
        assert!(effect.set_duration(2.0).is_ok());
        assert_eq!(effect.duration().unwrap(), 2.0);
        assert_eq!(
            effect.paragraph(),
            Err(HostError::Unavailable(Field::Paragraph))
        );

        timeline.fail_deletes_after(0);
        assert!(timeline.delete_effect(1).is_err());
        assert_eq!(timeline.effect_count().unwrap(), 1);
    }
}
