use vectorkit_designer::model::{ElementId, NewElement, Point, SelectionMode};
use vectorkit_designer::store::EditorStore;

fn store_with_three() -> (EditorStore, ElementId, ElementId, ElementId) {
    let mut store = EditorStore::new();
    let a = store.add_element(NewElement::rect(0.0, 0.0, 10.0, 10.0));
    let b = store.add_element(NewElement::circle(25.0, 25.0, 10.0));
    let c = store.add_element(NewElement::circle(1000.0, 1000.0, 10.0));
    (store, a, b, c)
}

fn mode_of(store: &EditorStore, id: &ElementId) -> Option<SelectionMode> {
    store.state().element(id).and_then(|el| el.selection_mode)
}

#[test]
fn test_repeated_select_toggles_mode() {
    let (mut store, a, _, _) = store_with_three();

    store.select_element(Some(&a));
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Transform));
    assert_eq!(store.state().selected_element_id, Some(a.clone()));

    store.select_element(Some(&a));
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Edit));

    store.select_element(Some(&a));
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Transform));
    assert!(store.state().is_consistent());
}

#[test]
fn test_selecting_another_element_starts_in_transform() {
    let (mut store, a, b, _) = store_with_three();
    store.select_element(Some(&a));
    store.select_element(Some(&a));

    store.select_element(Some(&b));
    assert_eq!(mode_of(&store, &a), None);
    assert_eq!(mode_of(&store, &b), Some(SelectionMode::Transform));
    assert!(!store.state().element(&a).unwrap().is_selected);
}

#[test]
fn test_select_none_clears_selection() {
    let (mut store, a, _, _) = store_with_three();
    store.select_element(Some(&a));
    store.select_element(None);

    let state = store.state();
    assert!(state.selected_element_ids.is_empty());
    assert_eq!(state.selected_element_id, None);
    assert!(state.elements.iter().all(|el| !el.is_selected && el.selection_mode.is_none()));
}

#[test]
fn test_select_unknown_id_is_noop() {
    let (mut store, a, _, _) = store_with_three();
    store.select_element(Some(&a));
    let before = store.snapshot();

    store.select_element(Some(&ElementId::from("nope")));
    assert!(std::sync::Arc::ptr_eq(&before, store.state()));
}

#[test]
fn test_skew_mode_only_via_explicit_action() {
    let (mut store, a, _, _) = store_with_three();
    store.enter_skew_mode(&a);
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Skew));
    assert_eq!(store.state().selected_element_id, Some(a.clone()));

    // Re-selecting leaves skew for transform, never the other way round.
    store.select_element(Some(&a));
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Transform));
    store.select_element(Some(&a));
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Edit));
}

#[test]
fn test_select_multiple_sets_flags() {
    let (mut store, a, b, c) = store_with_three();
    store.select_multiple_elements(&[a.clone(), b.clone()]);

    let state = store.state();
    assert_eq!(state.selected_element_ids, vec![a.clone(), b.clone()]);
    assert_eq!(state.selected_element_id, None);
    assert_eq!(mode_of(&store, &a), Some(SelectionMode::Transform));
    assert_eq!(mode_of(&store, &b), Some(SelectionMode::Transform));
    assert_eq!(mode_of(&store, &c), None);
    assert!(store.state().is_consistent());
}

#[test]
fn test_select_multiple_with_one_id_acts_as_single() {
    let (mut store, a, b, _) = store_with_three();
    store.select_multiple_elements(&[a.clone(), b.clone()]);
    store.select_multiple_elements(&[b.clone()]);

    assert_eq!(store.state().selected_element_id, Some(b.clone()));
    assert_eq!(mode_of(&store, &a), None);
    assert_eq!(mode_of(&store, &b), Some(SelectionMode::Transform));
}

#[test]
fn test_select_multiple_same_set_is_noop() {
    let (mut store, a, b, _) = store_with_three();
    store.select_multiple_elements(&[a.clone(), b.clone()]);
    let before = store.snapshot();

    store.select_multiple_elements(&[b.clone(), a.clone(), a.clone()]);
    assert!(std::sync::Arc::ptr_eq(&before, store.state()));
}

#[test]
fn test_select_multiple_drops_unknown_ids() {
    let (mut store, a, _, _) = store_with_three();
    store.select_multiple_elements(&[a.clone(), ElementId::from("ghost")]);
    assert_eq!(store.state().selected_element_ids, vec![a.clone()]);
    assert_eq!(store.state().selected_element_id, Some(a));
}

#[test]
fn test_elements_in_rectangle() {
    let (store, a, b, c) = store_with_three();
    let hits = store.elements_in_rectangle(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
    assert!(hits.contains(&b));
    assert!(hits.contains(&a));
    assert!(!hits.contains(&c));

    // Corner order does not matter.
    let flipped = store.elements_in_rectangle(Point::new(50.0, 50.0), Point::new(0.0, 0.0));
    assert_eq!(hits, flipped);
}

#[test]
fn test_select_in_rectangle() {
    let (mut store, a, b, c) = store_with_three();
    let count = store.select_in_rectangle(Point::new(12.0, 12.0), Point::new(40.0, 40.0));

    assert_eq!(count, 1);
    assert_eq!(store.state().selected_element_ids, vec![b.clone()]);
    assert_eq!(mode_of(&store, &a), None);
    assert_eq!(mode_of(&store, &c), None);

    assert_eq!(store.select_in_rectangle(Point::new(-100.0, -100.0), Point::new(-50.0, -50.0)), 0);
    assert!(!store.state().has_selection());
}

#[test]
fn test_select_all() {
    let (mut store, _, _, _) = store_with_three();
    store.select_all();
    assert_eq!(store.state().selected_element_ids.len(), 3);
    assert!(store.state().elements.iter().all(|el| el.is_selected));
}
