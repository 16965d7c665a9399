//! Captured timeline data.
//!
//! Plain value types describing a slide's animation sequence as it was at
//! capture time. Every `Option` field follows one rule: `None` means the host
//! did not expose the property, never "zero" or "unset". Restore branches on
//! presence only.

use crate::common::codes::{BEHAVIOR_MOTION, BEHAVIOR_PROPERTY};
use crate::common::TriggerKind;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Host speed multiplier when the property is not exposed.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Host repeat count when the property is not exposed.
pub const DEFAULT_REPEAT_COUNT: i32 = 1;

/// Named effect parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOption {
    Direction,
    Amount,
    FontBold,
    FontItalic,
    FontUnderline,
    FontSize,
    ColorRgb,
    Color2Rgb,
    Relative,
}

impl EffectOption {
    /// Every option key, in capture order.
    pub const ALL: [EffectOption; 9] = [
        EffectOption::Direction,
        EffectOption::Amount,
        EffectOption::FontBold,
        EffectOption::FontItalic,
        EffectOption::FontSize,
        EffectOption::FontUnderline,
        EffectOption::ColorRgb,
        EffectOption::Color2Rgb,
        EffectOption::Relative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EffectOption::Direction => "direction",
            EffectOption::Amount => "amount",
            EffectOption::FontBold => "font_bold",
            EffectOption::FontItalic => "font_italic",
            EffectOption::FontUnderline => "font_underline",
            EffectOption::FontSize => "font_size",
            EffectOption::ColorRgb => "color_rgb",
            EffectOption::Color2Rgb => "color2_rgb",
            EffectOption::Relative => "relative",
        }
    }
}

/// Value of an effect parameter as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionValue {
    Int(i32),
    Float(f64),
    Bool(bool),
}

impl OptionValue {
    pub fn as_i32(self) -> i32 {
        match self {
            OptionValue::Int(v) => v,
            OptionValue::Float(v) => v as i32,
            OptionValue::Bool(v) => i32::from(v),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            OptionValue::Int(v) => f64::from(v),
            OptionValue::Float(v) => v,
            OptionValue::Bool(v) => f64::from(u8::from(v)),
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            OptionValue::Int(v) => v != 0,
            OptionValue::Float(v) => v != 0.0,
            OptionValue::Bool(v) => v,
        }
    }
}

/// Sparse set of effect parameters. A key is present only if the host
/// exposed it at capture time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_rgb: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color2_rgb: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<bool>,
}

impl EffectOptions {
    pub fn get(&self, key: EffectOption) -> Option<OptionValue> {
        match key {
            EffectOption::Direction => self.direction.map(OptionValue::Int),
            EffectOption::Amount => self.amount.map(OptionValue::Float),
            EffectOption::FontBold => self.font_bold.map(OptionValue::Bool),
            EffectOption::FontItalic => self.font_italic.map(OptionValue::Bool),
            EffectOption::FontUnderline => self.font_underline.map(OptionValue::Bool),
            EffectOption::FontSize => self.font_size.map(OptionValue::Float),
            EffectOption::ColorRgb => self.color_rgb.map(OptionValue::Int),
            EffectOption::Color2Rgb => self.color2_rgb.map(OptionValue::Int),
            EffectOption::Relative => self.relative.map(OptionValue::Bool),
        }
    }

    /// Store a value, coercing it to the key's native type.
    pub fn insert(&mut self, key: EffectOption, value: OptionValue) {
        match key {
            EffectOption::Direction => self.direction = Some(value.as_i32()),
            EffectOption::Amount => self.amount = Some(value.as_f64()),
            EffectOption::FontBold => self.font_bold = Some(value.as_bool()),
            EffectOption::FontItalic => self.font_italic = Some(value.as_bool()),
            EffectOption::FontUnderline => self.font_underline = Some(value.as_bool()),
            EffectOption::FontSize => self.font_size = Some(value.as_f64()),
            EffectOption::ColorRgb => self.color_rgb = Some(value.as_i32()),
            EffectOption::Color2Rgb => self.color2_rgb = Some(value.as_i32()),
            EffectOption::Relative => self.relative = Some(value.as_bool()),
        }
    }

    /// Present keys and their values, in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectOption, OptionValue)> + '_ {
        EffectOption::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Dual key used to find a shape again after the slide was mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ShapeRef {
    pub fn new(id: Option<u32>, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// Reference by name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    /// Human-readable label: the name, else `#id`, else "unknown".
    pub fn label(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("#{}", id),
            (None, None) => "unknown".to_string(),
        }
    }
}

/// When an effect starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Delay in seconds
    pub delay: f64,
}

impl Trigger {
    pub fn new(kind: TriggerKind, delay: f64) -> Self {
        Self { kind, delay }
    }
}

/// Paragraph/word/letter targeting of a text-scoped effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_unit_effect: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_length: Option<i32>,
}

impl TextDescriptor {
    /// Text unit or paragraph present: the effect animates text, not the
    /// whole shape.
    pub fn is_text_scoped(&self) -> bool {
        self.text_unit_effect.is_some() || self.paragraph.is_some()
    }
}

/// Behavior category, derived from the host type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Motion,
    Property,
    Other,
}

impl BehaviorKind {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(BEHAVIOR_MOTION) => BehaviorKind::Motion,
            Some(BEHAVIOR_PROPERTY) => BehaviorKind::Property,
            _ => BehaviorKind::Other,
        }
    }
}

/// Motion path endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_y: Option<f64>,
}

/// Animated property and its endpoint values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_value: Option<String>,
}

/// Kind-specific part of a behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorDetail {
    Motion(MotionFields),
    Property(PropertyFields),
    #[default]
    Other,
}

/// One captured behavior of an effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorRecord {
    pub detail: BehaviorDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accumulate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additive: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth_end: Option<f64>,
}

impl BehaviorRecord {
    pub fn new(detail: BehaviorDetail) -> Self {
        Self {
            detail,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> BehaviorKind {
        match self.detail {
            BehaviorDetail::Motion(_) => BehaviorKind::Motion,
            BehaviorDetail::Property(_) => BehaviorKind::Property,
            BehaviorDetail::Other => BehaviorKind::Other,
        }
    }
}

/// One captured animation effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    /// Position in the host sequence at capture time (1-based)
    pub index: usize,
    pub shape_ref: ShapeRef,
    pub effect_type: i32,
    pub trigger: Trigger,
    /// Duration in seconds
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewind: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reverse: Option<bool>,
    #[serde(default, skip_serializing_if = "EffectOptions::is_empty")]
    pub effect_options: EffectOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_descriptor: Option<TextDescriptor>,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub behaviors: SmallVec<[BehaviorRecord; 2]>,
}

impl EffectRecord {
    /// Create a record from its mandatory fields.
    pub fn new(
        index: usize,
        shape_ref: ShapeRef,
        effect_type: i32,
        trigger: Trigger,
        duration: f64,
    ) -> Self {
        Self {
            index,
            shape_ref,
            effect_type,
            trigger,
            duration,
            speed: None,
            rewind: None,
            repeat_count: None,
            auto_reverse: None,
            effect_options: EffectOptions::default(),
            text_descriptor: None,
            behaviors: SmallVec::new(),
        }
    }

    /// Attach a text descriptor.
    pub fn with_text_descriptor(mut self, descriptor: TextDescriptor) -> Self {
        self.text_descriptor = Some(descriptor);
        self
    }

    /// Set an effect option.
    pub fn with_option(mut self, key: EffectOption, value: OptionValue) -> Self {
        self.effect_options.insert(key, value);
        self
    }

    /// Append a behavior.
    pub fn with_behavior(mut self, behavior: BehaviorRecord) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// A record carrying a text descriptor is never replayed.
    pub fn is_text_scoped(&self) -> bool {
        self.text_descriptor.is_some()
    }

    /// Speed multiplier, host default when not captured.
    pub fn speed_or_default(&self) -> f64 {
        self.speed.unwrap_or(DEFAULT_SPEED)
    }

    /// Repeat count, host default when not captured.
    pub fn repeat_count_or_default(&self) -> i32 {
        self.repeat_count.unwrap_or(DEFAULT_REPEAT_COUNT)
    }
}

/// Capture result for one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Captured effects in host order, media playback effects excluded
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
    #[serde(default)]
    pub has_text_animations: bool,
    /// Names of shapes carrying at least one text-scoped effect
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub text_animation_shapes: BTreeSet<String>,
    /// Set only when the timeline could not be read at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_error: Option<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a timeline that could not be read.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            capture_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Append a record, keeping the text-animation flags in step.
    pub fn push(&mut self, record: EffectRecord) {
        if record.is_text_scoped() {
            self.has_text_animations = true;
            if let Some(name) = &record.shape_ref.name {
                self.text_animation_shapes.insert(name.clone());
            }
        }
        self.effects.push(record);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn is_failed(&self) -> bool {
        self.capture_error.is_some()
    }

    /// Records restore will attempt to replay.
    pub fn replayable(&self) -> impl Iterator<Item = &EffectRecord> {
        self.effects.iter().filter(|record| !record.is_text_scoped())
    }

    /// Serialize to YAML.
    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> crate::common::Result<String> {
        serde_saphyr::to_string(self).map_err(|e| {
            crate::common::Error::Serialization(format!("Failed to serialize snapshot to YAML: {}", e))
        })
    }

    /// Parse a snapshot previously written by [`Snapshot::to_yaml`].
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> crate::common::Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| {
            crate::common::Error::Serialization(format!("Failed to parse snapshot YAML: {}", e))
        })
    }
}
