//! Slide animation timeline snapshot and restore.
//!
//! Inserting media into a slide through the host's automation interface
//! scrambles the slide's main animation sequence. This module captures the
//! sequence beforehand and rebuilds it afterwards with the new media's
//! playback effect first.
//!
//! # Architecture
//!
//! - [`host`]: capability traits a host implements ([`Timeline`],
//!   [`EffectHandle`], [`BehaviorHandle`], [`ShapeHandle`])
//! - [`probe`]: per-field fault isolation for host reads and writes
//! - [`types`]: the captured data model ([`Snapshot`], [`EffectRecord`], ...)
//! - [`orphans`], [`capture`], [`gate`], [`restore`]: the individual phases
//! - [`preserve`]: the whole workflow around a caller-supplied insertion
//! - [`memory`]: an in-memory host for tests and experiments
//!
//! # Example
//!
//! ```rust
//! use anim_keeper::timeline::memory::{EffectState, MemoryTimeline};
//! use anim_keeper::timeline::{PreserveOptions, Timeline, preserve_animations};
//!
//! # fn main() -> anim_keeper::Result<()> {
//! let mut timeline = MemoryTimeline::new();
//! let title = timeline.add_shape("Title");
//! timeline.push_effect(EffectState::new(&title, 10));
//!
//! let outcome = preserve_animations(&mut timeline, &PreserveOptions::default(), |t| {
//!     let audio = t.add_shape("Audio");
//!     t.add_effect(&audio, 83)?;
//!     Ok(audio)
//! })?;
//!
//! assert!(!outcome.is_declined());
//! assert_eq!(timeline.effect_count()?, 2);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod gate;
pub mod host;
pub mod memory;
pub mod orphans;
pub mod preserve;
pub mod probe;
pub mod resolver;
pub mod restore;
pub mod types;

pub use capture::capture;
pub use config::PreserveOptions;
pub use gate::{Eligibility, LISTED_SHAPE_LIMIT, evaluate, evaluate_with};
pub use host::{
    BehaviorHandle, EffectHandle, Field, HostError, HostResult, MotionCoord, PropertyEnd,
    ShapeHandle, SmoothEdge, Timeline,
};
pub use orphans::clean_orphans;
pub use preserve::{PreserveOutcome, preserve_animations};
pub use probe::{Apply, Probe};
pub use resolver::resolve_shape;
pub use restore::{LeadEffect, RestoreReport, restore, restore_with};
pub use types::{
    BehaviorDetail, BehaviorKind, BehaviorRecord, EffectOption, EffectOptions, EffectRecord,
    MotionFields, OptionValue, PropertyFields, ShapeRef, Snapshot, TextDescriptor, Trigger,
};
