//! Shape rebinding.
//!
//! Maps a captured [`ShapeRef`] back to a live shape. Identity is tried
//! first, then the name. Names are user-editable and need not be unique.

use super::host::{Field, ShapeHandle};
use super::probe::Probe;
use super::types::ShapeRef;

/// Find the live shape a reference points at.
///
/// Returns the first shape whose id equals `shape_ref.id`; failing that, the
/// first shape whose name equals `shape_ref.name`. Shapes whose id or name
/// cannot be read are passed over.
pub fn resolve_shape<S: ShapeHandle>(shape_ref: &ShapeRef, shapes: &[S]) -> Option<S> {
    if let Some(id) = shape_ref.id
        && let Some(shape) = shapes
            .iter()
            .find(|shape| shape.id().probe(Field::ShapeId) == Some(id))
    {
        return Some(shape.clone());
    }

    let name = shape_ref.name.as_deref()?;
    shapes
        .iter()
        .find(|shape| shape.name().probe(Field::ShapeName).as_deref() == Some(name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::memory::MemoryTimeline;

    #[test]
    fn test_resolve_by_id() {
        let mut timeline = MemoryTimeline::new();
        let a = timeline.add_shape_with_id(3, "Title");
        let _b = timeline.add_shape_with_id(5, "Title");
        let shapes = timeline.shape_list();

        let found = resolve_shape(&ShapeRef::new(Some(5), Some("Title".into())), &shapes).unwrap();
        assert_eq!(found.id().unwrap(), 5);
        assert_ne!(found.id().unwrap(), a.id().unwrap());
    }

    #[test]
    fn test_resolve_falls_back_to_name() {
        let mut timeline = MemoryTimeline::new();
        timeline.add_shape_with_id(2, "Subtitle");
        timeline.add_shape_with_id(9, "Title");
        let shapes = timeline.shape_list();

        let found = resolve_shape(&ShapeRef::new(Some(5), Some("Title".into())), &shapes).unwrap();
        assert_eq!(found.id().unwrap(), 9);
    }

    #[test]
    fn test_resolve_first_name_match_wins() {
        let mut timeline = MemoryTimeline::new();
        timeline.add_shape_with_id(4, "Box");
        timeline.add_shape_with_id(8, "Box");
        let shapes = timeline.shape_list();

        let found = resolve_shape(&ShapeRef::named("Box"), &shapes).unwrap();
        assert_eq!(found.id().unwrap(), 4);
    }

    #[test]
    fn test_unresolved() {
        let mut timeline = MemoryTimeline::new();
        timeline.add_shape_with_id(1, "Box1");
        let shapes = timeline.shape_list();

        assert!(resolve_shape(&ShapeRef::new(Some(7), Some("Gone".into())), &shapes).is_none());
        assert!(resolve_shape(&ShapeRef::new(Some(7), None), &shapes).is_none());
        assert!(resolve_shape(&ShapeRef::default(), &shapes).is_none());
    }

    #[test]
    fn test_unreadable_shapes_are_skipped() {
        let mut timeline = MemoryTimeline::new();
        let broken = timeline.add_shape_with_id(5, "Title");
        broken.make_unreadable();
        timeline.add_shape_with_id(6, "Title");
        let shapes = timeline.shape_list();

        let found = resolve_shape(&ShapeRef::new(Some(5), Some("Title".into())), &shapes).unwrap();
        assert_eq!(found.id().unwrap(), 6);
    }
}
