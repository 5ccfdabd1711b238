//! Device-level workflows through the pointer router.

use crate::helpers::{RecordingHost, TestCollectionBuilder, event_at, id, p, test_scales};
use chartmark::{HandleKind, InteractionContext, PointerEvent, ShapeCollection, ShapeEditor};

#[test]
fn test_press_on_empty_space_draws() {
    let shapes = ShapeCollection::empty();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    let mut host = RecordingHost::default();

    editor.handle_pointer_down(&shapes, &event_at(0.0, 0.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &event_at(10.0, 10.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &event_at(10.0, 5.0), &ctx, &mut host);
    editor.handle_pointer_up(&shapes, &event_at(10.0, 5.0), &ctx, &mut host);

    assert_eq!(host.starts, 1);
    assert_eq!(host.commits.len(), 1);
    assert!(host.commits[0].had_event);
    let shape = host.last_commit().get(0).unwrap();
    assert_eq!(shape.start_point, p(0.0, 0.0));
    assert_eq!(shape.end_point, p(10.0, 10.0));
    assert_eq!(shape.offset, -5.0);
}

#[test]
fn test_press_on_shape_body_drags_it() {
    let shapes = TestCollectionBuilder::new()
        .with_shape(1, (10.0, 10.0), (50.0, 10.0), 20.0)
        .build();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    let mut host = RecordingHost::default();

    // Device (30, 80) is data (30, 20), inside the body
    assert_eq!(event_at(30.0, 20.0), PointerEvent::at(30.0, 80.0));
    editor.handle_pointer_down(&shapes, &event_at(30.0, 20.0), &ctx, &mut host);
    assert!(editor.gesture().is_dragging());
    assert_eq!(host.starts, 0);
    assert_eq!(editor.hovered().map(|h| h.handle), Some(HandleKind::Body));

    editor.handle_pointer_move(&shapes, &event_at(40.0, 30.0), &ctx, &mut host);
    // Preview only until release
    assert_eq!(editor.views(&shapes)[0].geometry.start, p(20.0, 20.0));
    assert_eq!(shapes.get(0).unwrap().start_point, p(10.0, 10.0));

    editor.handle_pointer_up(&shapes, &event_at(40.0, 30.0), &ctx, &mut host);

    assert_eq!(host.commits.len(), 1);
    assert!(!host.commits[0].had_event);
    let moved = host.last_commit().get(0).unwrap();
    assert_eq!(moved.id, id(1));
    assert_eq!(moved.start_point, p(20.0, 20.0));
    assert_eq!(moved.end_point, p(60.0, 20.0));
    assert_eq!(moved.offset, 20.0);
    assert!(moved.selected);
}

#[test]
fn test_parallel_edge_drag_changes_offset() {
    let shapes = TestCollectionBuilder::new()
        .with_shape(1, (10.0, 10.0), (50.0, 10.0), 20.0)
        .build();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    let mut host = RecordingHost::default();

    // Parallel edge sits at y = 30
    editor.handle_pointer_down(&shapes, &event_at(30.0, 31.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &event_at(35.0, 41.0), &ctx, &mut host);
    editor.handle_pointer_up(&shapes, &event_at(35.0, 41.0), &ctx, &mut host);

    let shape = host.last_commit().get(0).unwrap();
    assert_eq!(shape.start_point, p(10.0, 10.0));
    assert_eq!(shape.end_point, p(50.0, 10.0));
    assert_eq!(shape.offset, 30.0);
}

#[test]
fn test_snap_applies_to_drawn_points() {
    let shapes = ShapeCollection::empty();
    let scales = test_scales();
    let samples = [0.0, 5.0, 10.0];
    let ctx = InteractionContext::new(&scales, &samples);
    let mut editor = ShapeEditor::default();
    editor.set_snap(true);
    let mut host = RecordingHost::default();

    editor.handle_pointer_down(&shapes, &PointerEvent::at(1.0, 100.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &PointerEvent::at(9.2, 90.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &PointerEvent::at(9.0, 95.0), &ctx, &mut host);
    editor.handle_pointer_up(&shapes, &PointerEvent::at(9.0, 95.0), &ctx, &mut host);

    let shape = host.last_commit().get(0).unwrap();
    assert_eq!(shape.start_point, p(0.0, 0.0));
    assert_eq!(shape.end_point, p(10.0, 10.0));
    assert_eq!(shape.offset, -5.0);
}

#[test]
fn test_idle_moves_drive_hover_but_drawing_does_not() {
    let shapes = TestCollectionBuilder::new()
        .with_shape(1, (10.0, 10.0), (50.0, 10.0), 20.0)
        .build();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    let mut host = RecordingHost::default();

    editor.handle_pointer_move(&shapes, &event_at(30.0, 20.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &event_at(80.0, 80.0), &ctx, &mut host);
    assert_eq!(host.hovers, vec![(id(1), true), (id(1), false)]);

    // Draw from empty space across the shape
    editor.handle_pointer_down(&shapes, &event_at(80.0, 80.0), &ctx, &mut host);
    editor.handle_pointer_move(&shapes, &event_at(30.0, 20.0), &ctx, &mut host);
    assert_eq!(host.hovers.len(), 2);
    assert!(editor.gesture().is_drawing());
}

#[test]
fn test_release_while_idle_does_nothing() {
    let shapes = ShapeCollection::empty();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    let mut host = RecordingHost::default();

    editor.handle_pointer_up(&shapes, &event_at(5.0, 5.0), &ctx, &mut host);
    assert!(host.commits.is_empty());
    assert!(editor.gesture().is_idle());
    assert_eq!(editor.cursor(), Some(p(5.0, 5.0)));
}

#[test]
fn test_disabled_editor_still_hovers_and_drags() {
    let shapes = TestCollectionBuilder::new()
        .with_shape(1, (10.0, 10.0), (50.0, 10.0), 20.0)
        .build();
    let scales = test_scales();
    let ctx = InteractionContext::new(&scales, &[]);
    let mut editor = ShapeEditor::default();
    editor.set_enabled(false);
    let mut host = RecordingHost::default();

    // Empty space: nothing arms
    editor.handle_pointer_down(&shapes, &event_at(80.0, 80.0), &ctx, &mut host);
    assert!(editor.gesture().is_idle());
    assert_eq!(host.starts, 0);

    editor.handle_pointer_down(&shapes, &event_at(30.0, 20.0), &ctx, &mut host);
    assert!(editor.gesture().is_dragging());
    assert!(editor.is_hovering(id(1)));
}

#[test]
fn test_snapped_draw_skips_samples_in_start_column() {
    let shapes = ShapeCollection::empty();
    let scales = test_scales();
    let samples = [0.0, 5.0, 10.0, 15.0, 20.0];
    let ctx = InteractionContext::new(&scales, &samples);
    let mut editor = ShapeEditor::default();
    editor.set_snap(true);
    let mut host = RecordingHost::default();

    editor.handle_pointer_down(&shapes, &PointerEvent::at(1.0, 100.0), &ctx, &mut host);
    // Pixel by pixel up and to the right; x = 2 still snaps onto the start
    for step in 1..=19 {
        let step = f64::from(step);
        let event = PointerEvent::at(1.0 + step, 100.0 - step);
        editor.handle_pointer_move(&shapes, &event, &ctx, &mut host);
        if step == 1.0 {
            assert_eq!(editor.draft().unwrap().end, None);
        }
    }
    editor.handle_pointer_up(&shapes, &PointerEvent::at(20.0, 81.0), &ctx, &mut host);

    assert_eq!(host.commits.len(), 1);
    let shape = host.last_commit().get(0).unwrap();
    assert_eq!(shape.start_point, p(0.0, 0.0));
    assert_eq!(shape.end_point, p(5.0, 2.0));
    assert!(shape.offset.is_finite());
    assert!(shape.offset > 0.0);
}

#[test]
fn test_non_finite_device_event_is_dropped() {
    let shapes = ShapeCollection::empty();
    let scales = test_scales();
    let samples = [0.0, 50.0];
    let ctx = InteractionContext::new(&scales, &samples);
    let mut editor = ShapeEditor::default();
    // Snapping must not turn a NaN x into a sample
    editor.set_snap(true);
    let mut host = RecordingHost::default();

    editor.handle_pointer_down(&shapes, &PointerEvent::at(f64::NAN, 50.0), &ctx, &mut host);
    assert!(editor.gesture().is_idle());
    assert_eq!(host.starts, 0);
    assert_eq!(editor.cursor(), None);

    editor.handle_pointer_move(&shapes, &PointerEvent::at(40.0, f64::INFINITY), &ctx, &mut host);
    assert_eq!(editor.cursor(), None);
    assert!(host.hovers.is_empty());
}
