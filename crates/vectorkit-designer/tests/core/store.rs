use vectorkit_designer::model::{ElementKind, ElementUpdate, NewElement, Point, Tool};
use vectorkit_designer::store::{history_group, records_history, Alignment, EditorState, EditorStore, Shortcut};
use vectorkit_designer::viewport::Viewport;
use vectorkit_settings::EditorConfig;

const EPS: f64 = 1e-9;

#[test]
fn test_add_element_assigns_fresh_ids() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));

    assert_ne!(a, b);
    let state = store.state();
    assert_eq!(state.elements.len(), 2);
    assert!(state.elements.iter().all(|el| !el.is_selected));
    assert!(state.elements.iter().all(|el| el.fill_opacity == 1.0 && el.stroke_opacity == 1.0));
    assert!(state.is_consistent());
    assert_eq!(store.undo_depth(), 2);
}

#[test]
fn test_update_element_merges_fields() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));

    assert!(store.update_element(
        &id,
        ElementUpdate { x: Some(5.0), width: Some(40.0), ..ElementUpdate::default() }
    ));
    let el = store.state().element(&id).cloned().unwrap();
    assert_eq!(el.x, 5.0);
    assert_eq!(el.y, 0.0);
    assert_eq!(el.kind, ElementKind::Rect { width: 40.0, height: 10.0 });
}

#[test]
fn test_noop_update_is_dropped() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(3.0, 4.0, 10.0, 10.0).with_rotation(45.0));
    let before = store.snapshot();
    let depth = store.undo_depth();

    assert!(!store.update_element(&id, ElementUpdate::position(3.0, 4.0)));
    // Same angle, one full turn later.
    assert!(!store.update_element(
        &id,
        ElementUpdate { rotation: Some(405.0), ..ElementUpdate::default() }
    ));
    assert!(std::sync::Arc::ptr_eq(&before, store.state()));
    assert_eq!(store.undo_depth(), depth);
}

#[test]
fn test_unknown_id_update_is_ignored() {
    let mut store = EditorStore::new();
    store.add_element(NewElement::circle(0.0, 0.0, 5.0));
    assert!(!store.update_element(&"missing".into(), ElementUpdate::position(1.0, 1.0)));
}

#[test]
fn test_rotation_is_stored_normalized() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0).with_rotation(270.0));
    assert_eq!(store.state().element(&id).unwrap().rotation, -90.0);

    store.update_element(&id, ElementUpdate { rotation: Some(-540.0), ..ElementUpdate::default() });
    assert_eq!(store.state().element(&id).unwrap().rotation, 180.0);
}

#[test]
fn test_delete_element_updates_selection() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::rect(20.0, 0.0, 10.0, 10.0));
    store.select_multiple_elements(&[a.clone(), b.clone()]);

    assert!(store.delete_element(&a));
    let state = store.state();
    assert_eq!(state.elements.len(), 1);
    assert_eq!(state.selected_element_ids, vec![b.clone()]);
    assert_eq!(state.selected_element_id, Some(b));
    assert!(state.is_consistent());

    assert!(!store.delete_element(&a));
}

#[test]
fn test_delete_selected() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    store.add_element(NewElement::rect(20.0, 0.0, 10.0, 10.0));
    store.select_element(Some(&a));

    assert_eq!(store.delete_selected(), 1);
    assert_eq!(store.state().elements.len(), 1);
    assert!(!store.state().has_selection());
    assert_eq!(store.delete_selected(), 0);
}

#[test]
fn test_undo_redo_through_store() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    store.update_element(&id, ElementUpdate::position(50.0, 50.0));

    assert!(store.undo());
    assert_eq!(store.state().element(&id).unwrap().x, 0.0);
    assert!(store.redo());
    assert_eq!(store.state().element(&id).unwrap().x, 50.0);
    assert!(!store.can_redo());
}

#[test]
fn test_selection_and_tool_changes_are_not_undoable() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let depth = store.undo_depth();

    store.select_element(Some(&id));
    store.set_tool(Tool::Rectangle);
    store.zoom_in();
    store.pan_by(10.0, 5.0);

    assert_eq!(store.undo_depth(), depth);
    assert_eq!(store.state().tool, Tool::Rectangle);
    assert!(store.state().viewport.zoom() > 1.0);
    assert_eq!(store.state().viewport.pan(), Point::new(10.0, 5.0));
}

#[test]
fn test_undo_restores_recorded_viewport() {
    let mut store = EditorStore::new();
    store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    store.set_zoom(2.0);
    store.undo();
    // The recorded snapshot predates the zoom change.
    assert_eq!(store.state().viewport.zoom(), 1.0);
    assert!(store.state().elements.is_empty());
}

#[test]
fn test_zoom_is_clamped() {
    let mut store = EditorStore::new();
    store.set_zoom(50.0);
    assert_eq!(store.state().viewport.zoom(), 5.0);
    store.set_zoom(0.01);
    assert_eq!(store.state().viewport.zoom(), 0.1);
}

#[test]
fn test_history_limit_from_config() {
    let mut config = EditorConfig::default();
    config.history.limit = 3;
    let mut store = EditorStore::with_config(config);
    for i in 0..10 {
        store.add_element(NewElement::circle(i as f64, 0.0, 5.0));
    }
    assert_eq!(store.undo_depth(), 3);
}

#[test]
fn test_clear_canvas_is_undoable() {
    let mut store = EditorStore::with_state(EditorState::demo(Viewport::default()), EditorConfig::default());
    let count = store.state().elements.len();
    assert!(count > 0);

    store.clear_canvas();
    assert!(store.state().elements.is_empty());
    store.undo();
    assert_eq!(store.state().elements.len(), count);
}

#[test]
fn test_drawing_strokes_group_into_one_step() {
    let mut store = EditorStore::new();
    store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let depth = store.undo_depth();

    let id = store.add_element(NewElement::drawing(vec![0.0, 0.0]));
    let mut points = vec![0.0, 0.0];
    for i in 1..20 {
        points.extend([i as f64, (i * 2) as f64]);
        store.update_element(&id, ElementUpdate { points: Some(points.clone()), ..ElementUpdate::default() });
    }
    assert_eq!(store.undo_depth(), depth + 1);

    store.undo();
    assert_eq!(store.state().elements.len(), 1);
}

#[test]
fn test_history_group_predicate() {
    let mut store = EditorStore::new();
    let prev = store.snapshot();
    let id = store.add_element(NewElement::drawing(vec![0.0, 0.0, 1.0, 1.0]));
    let added = store.snapshot();
    assert_eq!(history_group(&prev, &added), Some(format!("draw:{id}")));

    store.update_element(&id, ElementUpdate { points: Some(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]), ..ElementUpdate::default() });
    let extended = store.snapshot();
    assert_eq!(history_group(&added, &extended), Some(format!("draw:{id}")));

    // Rewriting points is not an extension.
    store.update_element(&id, ElementUpdate { points: Some(vec![5.0, 5.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]), ..ElementUpdate::default() });
    assert_eq!(history_group(&extended, store.state()), None);

    let before_rect = store.snapshot();
    store.add_element(NewElement::rect(0.0, 0.0, 1.0, 1.0));
    assert_eq!(history_group(&before_rect, store.state()), None);
}

#[test]
fn test_records_history_ignores_selection() {
    let mut store = EditorStore::new();
    let id = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let before = store.snapshot();
    store.select_element(Some(&id));
    assert!(!records_history(&before, store.state()));

    let selected = store.snapshot();
    store.update_element(&id, ElementUpdate::position(1.0, 0.0));
    assert!(records_history(&selected, store.state()));
}

#[test]
fn test_flip_horizontally_twice_restores() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 20.0, 10.0).with_rotation(15.0));
    let b = store.add_element(NewElement::circle(100.0, 50.0, 10.0));
    store.select_multiple_elements(&[a.clone(), b.clone()]);
    let original = store.snapshot();

    assert!(store.flip_horizontally());
    let rect = store.state().element(&a).cloned().unwrap();
    // Selection spans x 0..110, so its centre line is x = 55.
    assert!((rect.x - 90.0).abs() < EPS);
    assert_eq!(rect.rotation, -15.0);
    assert!((store.state().element(&b).unwrap().x - 10.0).abs() < EPS);

    assert!(store.flip_horizontally());
    for (now, then) in store.state().elements.iter().zip(&original.elements) {
        assert!((now.x - then.x).abs() < EPS);
        assert!((now.y - then.y).abs() < EPS);
        assert_eq!(now.rotation, then.rotation);
    }
}

#[test]
fn test_flip_twice_is_exact_only_through_undo() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.1, 0.0, 0.7, 1.0));
    let b = store.add_element(NewElement::circle(1234.567, 0.0, 3.0));
    store.select_multiple_elements(&[a.clone(), b]);
    let original = store.snapshot();

    assert!(store.flip_horizontally());
    assert!(store.flip_horizontally());
    // Reflection rounds, so the round trip is close but not bit-identical.
    let x = store.state().element(&a).unwrap().x;
    assert!((x - 0.1).abs() < EPS);

    assert!(store.undo());
    assert!(store.undo());
    assert_eq!(store.state().elements, original.elements);
}

#[test]
fn test_flip_vertically_mirrors_y() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::line(0.0, 20.0, 10.0, 40.0));
    store.select_multiple_elements(&[a.clone(), b.clone()]);

    assert!(store.flip_vertically());
    assert_eq!(store.state().element(&a).unwrap().y, 30.0);
    let line = store.state().element(&b).cloned().unwrap();
    assert_eq!(line.y, 20.0);
    assert_eq!(line.kind, ElementKind::Line { x2: 10.0, y2: 0.0 });
}

#[test]
fn test_flip_without_selection_is_noop() {
    let mut store = EditorStore::new();
    store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let depth = store.undo_depth();
    assert!(!store.flip_horizontally());
    assert!(!store.flip_vertically());
    assert_eq!(store.undo_depth(), depth);
}

#[test]
fn test_align_left_and_bottom() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(10.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::circle(100.0, 100.0, 20.0));
    store.select_multiple_elements(&[a.clone(), b.clone()]);

    assert!(store.align_selected(Alignment::Left));
    assert_eq!(store.state().element(&b).unwrap().x, 30.0);
    assert_eq!(store.state().element(&a).unwrap().x, 10.0);

    assert!(store.align_selected(Alignment::Bottom));
    assert_eq!(store.state().element(&a).unwrap().y, 110.0);
    assert_eq!(store.state().element(&b).unwrap().y, 100.0);

    // Already aligned.
    assert!(!store.align_selected(Alignment::Bottom));
}

#[test]
fn test_align_center_horizontal() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::rect(90.0, 50.0, 10.0, 10.0));
    store.select_multiple_elements(&[a.clone(), b.clone()]);

    store.align_selected(Alignment::CenterHorizontal);
    assert_eq!(store.state().element(&a).unwrap().x, 45.0);
    assert_eq!(store.state().element(&b).unwrap().x, 45.0);
}

#[test]
fn test_shortcut_mapping() {
    assert_eq!(Shortcut::from_key("z", true, false), Some(Shortcut::Undo));
    assert_eq!(Shortcut::from_key("z", true, true), Some(Shortcut::Redo));
    assert_eq!(Shortcut::from_key("Z", true, true), Some(Shortcut::Redo));
    assert_eq!(Shortcut::from_key("y", true, false), Some(Shortcut::Redo));
    assert_eq!(Shortcut::from_key("h", true, false), Some(Shortcut::FlipHorizontal));
    assert_eq!(Shortcut::from_key("ArrowUp", true, false), Some(Shortcut::Align(Alignment::Top)));
    assert_eq!(Shortcut::from_key("z", false, false), None);
    assert_eq!(Shortcut::from_key("q", true, false), None);
}

#[test]
fn test_shortcuts_need_selection_except_history() {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0).with_rotation(20.0));

    assert!(!store.handle_shortcut(Shortcut::FlipHorizontal));
    assert!(store.handle_shortcut(Shortcut::Undo));
    assert!(store.state().elements.is_empty());
    assert!(store.handle_shortcut(Shortcut::Redo));

    store.select_element(Some(&a));
    assert!(store.handle_shortcut(Shortcut::FlipHorizontal));
    assert_eq!(store.state().element(&a).unwrap().rotation, -20.0);
}
