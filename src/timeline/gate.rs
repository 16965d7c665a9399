//! Eligibility gate.
//!
//! Text-scoped effects cannot be replayed, so a slide carrying them would lose
//! part of its timeline. The gate tells the caller before anything
//! destructive happens.

use super::types::Snapshot;

/// Number of shape names listed in the gate's reason.
pub const LISTED_SHAPE_LIMIT: usize = 3;

/// Verdict of the eligibility gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Whether the disruptive operation should be skipped
    pub should_skip: bool,
    /// Human-readable reason, empty when `should_skip` is false
    pub reason: String,
}

impl Eligibility {
    pub fn proceed() -> Self {
        Self::default()
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            should_skip: true,
            reason: reason.into(),
        }
    }
}

impl From<Eligibility> for (bool, String) {
    fn from(verdict: Eligibility) -> Self {
        (verdict.should_skip, verdict.reason)
    }
}

/// Decide whether the disruptive operation should go ahead.
///
/// Skips iff the snapshot has text animations; the reason lists up to three
/// affected shapes.
pub fn evaluate(snapshot: &Snapshot) -> Eligibility {
    evaluate_with(snapshot, LISTED_SHAPE_LIMIT)
}

/// [`evaluate`] with a custom number of listed shape names.
pub fn evaluate_with(snapshot: &Snapshot, limit: usize) -> Eligibility {
    if !snapshot.has_text_animations {
        return Eligibility::proceed();
    }

    let shapes = &snapshot.text_animation_shapes;
    if shapes.is_empty() {
        return Eligibility::skip("Text animations detected");
    }

    let mut listed = shapes
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if shapes.len() > limit {
        listed.push_str(&format!(", and {} more", shapes.len() - limit));
    }
    Eligibility::skip(format!("Text animations detected on: {}", listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot_with(shapes: &[&str]) -> Snapshot {
        Snapshot {
            has_text_animations: true,
            text_animation_shapes: shapes.iter().map(|s| s.to_string()).collect(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_no_text_animations_proceeds() {
        let verdict = evaluate(&Snapshot::new());
        assert!(!verdict.should_skip);
        assert_eq!(verdict.reason, "");
    }

    #[test]
    fn test_single_shape() {
        let (skip, reason): (bool, String) = evaluate(&snapshot_with(&["Box2"])).into();
        assert!(skip);
        assert_eq!(reason, "Text animations detected on: Box2");
    }

    #[test]
    fn test_three_shapes_listed_in_full() {
        let verdict = evaluate(&snapshot_with(&["A", "B", "C"]));
        assert_eq!(verdict.reason, "Text animations detected on: A, B, C");
    }

    #[test]
    fn test_overflow_count() {
        let verdict = evaluate(&snapshot_with(&["A", "B", "C", "D", "E"]));
        assert_eq!(
            verdict.reason,
            "Text animations detected on: A, B, C, and 2 more"
        );
    }

    #[test]
    fn test_custom_limit() {
        let verdict = evaluate_with(&snapshot_with(&["A", "B", "C"]), 1);
        assert_eq!(verdict.reason, "Text animations detected on: A, and 2 more");
    }

    #[test]
    fn test_text_animations_without_names() {
        let snapshot = Snapshot {
            has_text_animations: true,
            ..Snapshot::default()
        };
        assert_eq!(evaluate(&snapshot), Eligibility::skip("Text animations detected"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_gate_matches_text_flag(
            has_text in any::<bool>(),
            names in prop::collection::btree_set("[A-Za-z][A-Za-z0-9 ]{0,8}", 0..8),
        ) {
            let snapshot = Snapshot {
                has_text_animations: has_text,
                text_animation_shapes: names.clone(),
                ..Snapshot::default()
            };
            let verdict = evaluate(&snapshot);
            prop_assert_eq!(verdict.should_skip, has_text);

            if !has_text {
                prop_assert!(verdict.reason.is_empty());
            } else if names.len() <= LISTED_SHAPE_LIMIT {
                for name in &names {
                    prop_assert!(verdict.reason.contains(name.as_str()));
                }
                prop_assert!(!verdict.reason.contains(", and "));
            } else {
                let overflow = format!(", and {} more", names.len() - LISTED_SHAPE_LIMIT);
                prop_assert!(verdict.reason.ends_with(&overflow));
                for name in names.iter().take(LISTED_SHAPE_LIMIT) {
                    prop_assert!(verdict.reason.contains(name.as_str()));
                }
            }
        }
    }
}
