//! Anim-keeper - keep a slide's animation timeline intact across media insertion
//!
//! Presentation hosts rebuild a slide's main animation sequence when media is
//! inserted through their automation interface, losing the author's order and
//! timing. This library snapshots the sequence first, then clears it and
//! replays it with the new media's playback effect at the front.
//!
//! # Features
//!
//! - **Host-agnostic**: Works against any host implementing the [`timeline::host`] traits
//! - **Fault tolerant**: A property the host cannot read or write never aborts a capture or restore
//! - **Gate**: Declines up front when text-scoped animations would be lost
//! - **Orphan cleanup**: Removes media effects left behind by earlier insertions
//! - **Serializable snapshots**: Snapshots and options round-trip through YAML (`yaml` feature)
//!
//! # Example - Preserving animations around an insertion
//!
//! ```rust
//! use anim_keeper::timeline::memory::{EffectState, MemoryTimeline};
//! use anim_keeper::timeline::{PreserveOptions, PreserveOutcome, Timeline};
//!
//! # fn main() -> anim_keeper::Result<()> {
//! let mut timeline = MemoryTimeline::new();
//! let box1 = timeline.add_shape("Box1");
//! let box2 = timeline.add_shape("Box2");
//! timeline.push_effect(EffectState::new(&box1, 10));
//! timeline.push_effect(EffectState::new(&box2, 22));
//!
//! let outcome = anim_keeper::preserve_animations(&mut timeline, &PreserveOptions::default(), |t| {
//!     let audio = t.add_shape("Audio");
//!     t.add_effect(&audio, 83)?;
//!     Ok(audio)
//! })?;
//!
//! if let PreserveOutcome::Restored(report) = outcome {
//!     assert_eq!(report.restored, 2);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Running the phases by hand
//!
//! ```rust
//! use anim_keeper::timeline::memory::{EffectState, MemoryTimeline};
//! use anim_keeper::timeline::{capture, evaluate, restore};
//!
//! let mut timeline = MemoryTimeline::new();
//! let title = timeline.add_shape("Title");
//! timeline.push_effect(EffectState::new(&title, 10).with_paragraph(1));
//!
//! let snapshot = capture(&timeline);
//! let verdict = evaluate(&snapshot);
//! assert!(verdict.should_skip);
//! assert_eq!(verdict.reason, "Text animations detected on: Title");
//!
//! let audio = timeline.add_shape("Audio");
//! let report = restore(&mut timeline, &snapshot, &audio);
//! assert!(report.success);
//! assert!(report.notice().is_some());
//! ```

/// Shared error type and host code tables
pub mod common;

/// Timeline capture, gate, orphan cleanup and restore
///
/// This module contains the host traits, the snapshot data model and the
/// phases operating on them.
pub mod timeline;

// Re-export commonly used types for convenience
pub use common::{Error, Result, TriggerKind};
pub use timeline::{
    PreserveOptions, PreserveOutcome, RestoreReport, Snapshot, capture, clean_orphans, evaluate,
    preserve_animations, restore,
};
