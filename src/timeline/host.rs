//! Host automation surface.
//!
//! The live timeline belongs to the presentation host, not to this crate.
//! These traits describe the small capability set the engine consumes:
//! enumerating and deleting effects, adding an effect bound to a shape,
//! reading and writing per-effect and per-behavior properties, and listing
//! the shapes of the slide.
//!
//! Every call may fail. A failing read means the host does not expose the
//! property for this effect; a failing write means the host refused it.
//! Indices are 1-based and follow host order, like the automation API they
//! model.

use super::types::{EffectOption, OptionValue};
use std::fmt;
use thiserror::Error;

/// Result of a single host call.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure reported by the host for a single call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host does not expose this property for this object
    #[error("property '{0}' is unavailable")]
    Unavailable(Field),

    /// The host refused a write
    #[error("property '{field}' rejected: {reason}")]
    Rejected { field: Field, reason: String },

    /// The handle refers to an object that no longer exists
    #[error("stale reference: {0}")]
    StaleReference(String),

    /// Position outside the live sequence
    #[error("index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Any other host failure
    #[error("{0}")]
    Host(String),
}

/// Coordinate of a motion behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MotionCoord {
    FromX,
    FromY,
    ToX,
    ToY,
}

impl MotionCoord {
    pub const ALL: [MotionCoord; 4] = [
        MotionCoord::FromX,
        MotionCoord::FromY,
        MotionCoord::ToX,
        MotionCoord::ToY,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MotionCoord::FromX => "from_x",
            MotionCoord::FromY => "from_y",
            MotionCoord::ToX => "to_x",
            MotionCoord::ToY => "to_y",
        }
    }
}

/// Endpoint of a property behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyEnd {
    From,
    To,
}

/// Edge of a behavior's easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SmoothEdge {
    Start,
    End,
}

/// Name of a host property, used in errors, log fields and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    EffectCount,
    Effect,
    Shapes,
    EffectType,
    Shape,
    ShapeId,
    ShapeName,
    TriggerType,
    TriggerDelay,
    Duration,
    Speed,
    Rewind,
    RepeatCount,
    AutoReverse,
    TextUnitEffect,
    Paragraph,
    TextRangeStart,
    TextRangeLength,
    Option(EffectOption),
    BehaviorCount,
    Behavior,
    BehaviorType,
    Accumulate,
    Additive,
    Motion(MotionCoord),
    PropertyId,
    PropertyValue(PropertyEnd),
    Smooth(SmoothEdge),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::EffectCount => "effect_count",
            Field::Effect => "effect",
            Field::Shapes => "shapes",
            Field::EffectType => "effect_type",
            Field::Shape => "shape",
            Field::ShapeId => "shape.id",
            Field::ShapeName => "shape.name",
            Field::TriggerType => "trigger.type",
            Field::TriggerDelay => "trigger.delay",
            Field::Duration => "duration",
            Field::Speed => "speed",
            Field::Rewind => "rewind",
            Field::RepeatCount => "repeat_count",
            Field::AutoReverse => "auto_reverse",
            Field::TextUnitEffect => "text.text_unit_effect",
            Field::Paragraph => "text.paragraph",
            Field::TextRangeStart => "text.range_start",
            Field::TextRangeLength => "text.range_length",
            Field::Option(key) => return write!(f, "effect_options.{}", key.as_str()),
            Field::BehaviorCount => "behaviors.count",
            Field::Behavior => "behavior",
            Field::BehaviorType => "behavior.type",
            Field::Accumulate => "behavior.accumulate",
            Field::Additive => "behavior.additive",
            Field::Motion(coord) => return write!(f, "behavior.motion.{}", coord.as_str()),
            Field::PropertyId => "behavior.property",
            Field::PropertyValue(PropertyEnd::From) => "behavior.from_value",
            Field::PropertyValue(PropertyEnd::To) => "behavior.to_value",
            Field::Smooth(SmoothEdge::Start) => "behavior.smooth_start",
            Field::Smooth(SmoothEdge::End) => "behavior.smooth_end",
        };
        f.write_str(name)
    }
}

/// A shape on the slide.
///
/// Handles are cheap to clone and may outlive the shape they point at; reads
/// through a handle whose shape was deleted fail with
/// [`HostError::StaleReference`].
pub trait ShapeHandle: Clone {
    /// Host-assigned identity, stable for the life of the shape.
    fn id(&self) -> HostResult<u32>;

    /// User-visible name. Editable and not guaranteed unique.
    fn name(&self) -> HostResult<String>;
}

/// One timing/property sub-effect of an effect.
pub trait BehaviorHandle {
    fn type_code(&self) -> HostResult<i32>;

    fn accumulate(&self) -> HostResult<i32>;
    fn set_accumulate(&mut self, value: i32) -> HostResult<()>;

    fn additive(&self) -> HostResult<i32>;
    fn set_additive(&mut self, value: i32) -> HostResult<()>;

    /// Motion path coordinate. Only motion behaviors expose these.
    fn motion(&self, coord: MotionCoord) -> HostResult<f64>;
    fn set_motion(&mut self, coord: MotionCoord, value: f64) -> HostResult<()>;

    /// Animated property identifier. Only property behaviors expose this.
    fn property_id(&self) -> HostResult<i32>;
    fn property_value(&self, end: PropertyEnd) -> HostResult<String>;
    fn set_property_value(&mut self, end: PropertyEnd, value: &str) -> HostResult<()>;

    fn smoothing(&self, edge: SmoothEdge) -> HostResult<f64>;
    fn set_smoothing(&mut self, edge: SmoothEdge, value: f64) -> HostResult<()>;
}

/// One animation effect in a live timeline.
pub trait EffectHandle {
    type Shape: ShapeHandle;
    type Behavior: BehaviorHandle;

    fn effect_type(&self) -> HostResult<i32>;

    /// Shape the effect is bound to.
    fn shape(&self) -> HostResult<Self::Shape>;

    fn trigger_type(&self) -> HostResult<i32>;
    fn set_trigger_type(&mut self, code: i32) -> HostResult<()>;

    fn trigger_delay(&self) -> HostResult<f64>;
    fn set_trigger_delay(&mut self, seconds: f64) -> HostResult<()>;

    fn duration(&self) -> HostResult<f64>;
    fn set_duration(&mut self, seconds: f64) -> HostResult<()>;

    fn speed(&self) -> HostResult<f64>;
    fn set_speed(&mut self, speed: f64) -> HostResult<()>;

    fn rewind(&self) -> HostResult<bool>;
    fn set_rewind(&mut self, rewind: bool) -> HostResult<()>;

    fn repeat_count(&self) -> HostResult<i32>;
    fn set_repeat_count(&mut self, count: i32) -> HostResult<()>;

    fn auto_reverse(&self) -> HostResult<bool>;
    fn set_auto_reverse(&mut self, auto_reverse: bool) -> HostResult<()>;

    /// By-paragraph/word/letter build granularity. Only text-scoped effects
    /// expose this.
    fn text_unit_effect(&self) -> HostResult<i32>;
    /// Targeted paragraph. Only text-scoped effects expose this.
    fn paragraph(&self) -> HostResult<i32>;
    fn text_range_start(&self) -> HostResult<i32>;
    fn text_range_length(&self) -> HostResult<i32>;

    /// One effect parameter (direction, amount, font, color, ...).
    fn option(&self, key: EffectOption) -> HostResult<OptionValue>;
    fn set_option(&mut self, key: EffectOption, value: OptionValue) -> HostResult<()>;

    fn behavior_count(&self) -> HostResult<usize>;
    /// Behavior at a 1-based position.
    fn behavior(&self, index: usize) -> HostResult<Self::Behavior>;
}

/// The main animation sequence of one slide, plus the slide's shapes.
pub trait Timeline {
    type Shape: ShapeHandle;
    type Effect: EffectHandle<Shape = Self::Shape>;

    fn effect_count(&self) -> HostResult<usize>;

    /// Effect at a 1-based position.
    fn effect(&self, index: usize) -> HostResult<Self::Effect>;

    /// Delete the effect at a 1-based position. Later entries are renumbered;
    /// earlier ones keep their position.
    fn delete_effect(&mut self, index: usize) -> HostResult<()>;

    /// Append a new effect of `effect_type` bound to `shape`. The host
    /// generates the effect's behaviors from the type.
    fn add_effect(&mut self, shape: &Self::Shape, effect_type: i32) -> HostResult<Self::Effect>;

    /// Shapes currently on the slide, in z-order.
    fn shapes(&self) -> HostResult<Vec<Self::Shape>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Speed.to_string(), "speed");
        assert_eq!(
            Field::Option(EffectOption::Color2Rgb).to_string(),
            "effect_options.color2_rgb"
        );
        assert_eq!(
            Field::Motion(MotionCoord::ToY).to_string(),
            "behavior.motion.to_y"
        );
        assert_eq!(
            Field::Smooth(SmoothEdge::End).to_string(),
            "behavior.smooth_end"
        );
    }

    #[test]
    fn test_host_error_message() {
        let err = HostError::Rejected {
            field: Field::Option(EffectOption::Direction),
            reason: "read-only".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "property 'effect_options.direction' rejected: read-only"
        );
        let err = HostError::IndexOutOfRange { index: 4, count: 2 };
        assert_eq!(err.to_string(), "index 4 out of range (count 2)");
    }
}
