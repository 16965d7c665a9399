//! Reserved host codes.
//!
//! Numeric identifiers from the PowerPoint automation taxonomy
//! (`MsoAnimEffect`, `MsoAnimTriggerType`, `MsoAnimType`) that the engine
//! depends on. Everything else is carried through as an opaque integer.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Effect type of a media playback effect (`msoAnimEffectMediaPlay`).
pub const EFFECT_MEDIA_PLAY: i32 = 83;
/// Effect type of a media pause effect.
pub const EFFECT_MEDIA_PAUSE: i32 = 84;
/// Effect type of a media stop effect.
pub const EFFECT_MEDIA_STOP: i32 = 85;

/// Trigger code: start on page click.
pub const TRIGGER_ON_CLICK: i32 = 1;
/// Trigger code: start together with the previous step.
pub const TRIGGER_WITH_PREVIOUS: i32 = 2;
/// Trigger code: start once the previous step completes.
pub const TRIGGER_AFTER_PREVIOUS: i32 = 3;
/// Trigger code: start on click of a specific shape.
pub const TRIGGER_ON_SHAPE_CLICK: i32 = 4;

/// Behavior type code of a motion behavior (`msoAnimTypeMotion`).
pub const BEHAVIOR_MOTION: i32 = 1;
/// Behavior type code of a property behavior (`msoAnimTypeProperty`).
pub const BEHAVIOR_PROPERTY: i32 = 4;

static EFFECT_NAMES: phf::Map<i32, &'static str> = phf_map! {
    1i32 => "Appear",
    2i32 => "Fly",
    3i32 => "Blinds",
    4i32 => "Box",
    5i32 => "Checkerboard",
    6i32 => "Circle",
    7i32 => "Crawl",
    8i32 => "Diamond",
    9i32 => "Dissolve",
    10i32 => "Fade",
    11i32 => "FlashOnce",
    12i32 => "Peek",
    13i32 => "Plus",
    14i32 => "RandomBars",
    15i32 => "Spiral",
    16i32 => "Split",
    17i32 => "Stretch",
    18i32 => "Strips",
    19i32 => "Swivel",
    20i32 => "Wedge",
    21i32 => "Wheel",
    22i32 => "Wipe",
    23i32 => "Zoom",
    54i32 => "ChangeFillColor",
    55i32 => "ChangeFont",
    56i32 => "ChangeFontColor",
    57i32 => "ChangeFontSize",
    58i32 => "ChangeFontStyle",
    59i32 => "GrowShrink",
    60i32 => "ChangeLineColor",
    61i32 => "Spin",
    62i32 => "Transparency",
    83i32 => "MediaPlay",
    84i32 => "MediaPause",
    85i32 => "MediaStop",
};

/// Display name of an effect type code, for log fields and diagnostics.
pub fn effect_type_name(code: i32) -> Option<&'static str> {
    EFFECT_NAMES.get(&code).copied()
}

/// Check whether an effect type code is the reserved media playback code.
#[inline]
pub fn is_media_effect(code: i32) -> bool {
    code == EFFECT_MEDIA_PLAY
}

/// When an effect starts relative to the rest of the sequence.
///
/// Unknown host codes are kept verbatim in [`TriggerKind::Other`] so they
/// survive a snapshot/restore cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum TriggerKind {
    /// Start on click
    #[default]
    OnClick,
    /// Start with previous
    WithPrevious,
    /// Start after previous
    AfterPrevious,
    /// Start on click of a trigger shape
    OnShapeClick,
    /// Any other host code
    Other(i32),
}

impl TriggerKind {
    /// Raw host code for this trigger.
    pub fn code(self) -> i32 {
        match self {
            TriggerKind::OnClick => TRIGGER_ON_CLICK,
            TriggerKind::WithPrevious => TRIGGER_WITH_PREVIOUS,
            TriggerKind::AfterPrevious => TRIGGER_AFTER_PREVIOUS,
            TriggerKind::OnShapeClick => TRIGGER_ON_SHAPE_CLICK,
            TriggerKind::Other(code) => code,
        }
    }
}

impl From<i32> for TriggerKind {
    fn from(code: i32) -> Self {
        match code {
            TRIGGER_ON_CLICK => TriggerKind::OnClick,
            TRIGGER_WITH_PREVIOUS => TriggerKind::WithPrevious,
            TRIGGER_AFTER_PREVIOUS => TriggerKind::AfterPrevious,
            TRIGGER_ON_SHAPE_CLICK => TriggerKind::OnShapeClick,
            other => TriggerKind::Other(other),
        }
    }
}

impl From<TriggerKind> for i32 {
    fn from(kind: TriggerKind) -> Self {
        kind.code()
    }
}
