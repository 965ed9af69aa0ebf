use std::collections::HashSet;

use tracing::debug;

use super::{EditorState, EditorStore};
use crate::geometry::{element_bounds, Bounds};
use crate::history::HistoryMode;
use crate::model::{ElementId, Point, SelectionMode};

/// Copy of `state` with exactly `ids` selected in `mode`.
fn with_selection(state: &EditorState, ids: Vec<ElementId>, mode: SelectionMode) -> EditorState {
    let chosen: HashSet<&ElementId> = ids.iter().collect();
    let elements = state
        .elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            if chosen.contains(&el.id) {
                el.select(mode);
            } else {
                el.deselect();
            }
            el
        })
        .collect();
    let selected_element_id = match ids.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };
    EditorState {
        elements,
        selected_element_id,
        selected_element_ids: ids,
        tool: state.tool,
        viewport: state.viewport.clone(),
    }
}

impl EditorStore {
    /// Selects a single element, or clears the selection with `None`.
    ///
    /// Selecting the element that is already the only selection toggles it
    /// between transform and edit mode. Unknown ids are ignored.
    pub fn select_element(&mut self, id: Option<&ElementId>) {
        self.commit(HistoryMode::Record, |state| {
            let Some(id) = id else {
                let any_flagged = state.elements.iter().any(|el| el.is_selected);
                return (state.has_selection() || any_flagged)
                    .then(|| with_selection(state, Vec::new(), SelectionMode::Transform));
            };
            let element = state.element(id)?;

            let mode = if state.selected_element_id.as_ref() == Some(id) {
                element
                    .selection_mode
                    .map_or(SelectionMode::Transform, SelectionMode::toggled)
            } else {
                SelectionMode::Transform
            };
            debug!(id = %id, ?mode, "Selecting element");
            Some(with_selection(state, vec![id.clone()], mode))
        });
    }

    /// Selects `id` alone in skew mode.
    pub fn enter_skew_mode(&mut self, id: &ElementId) {
        self.commit(HistoryMode::Record, |state| {
            let element = state.element(id)?;
            let already = state.selected_element_id.as_ref() == Some(id)
                && element.selection_mode == Some(SelectionMode::Skew);
            (!already).then(|| with_selection(state, vec![id.clone()], SelectionMode::Skew))
        });
    }

    /// Selects exactly `ids` in transform mode.
    ///
    /// Unknown and duplicate ids are dropped. Asking for the set that is
    /// already selected, in any order, changes nothing.
    pub fn select_multiple_elements(&mut self, ids: &[ElementId]) {
        self.commit(HistoryMode::Record, |state| {
            let mut seen = HashSet::new();
            let ids: Vec<ElementId> = ids
                .iter()
                .filter(|id| state.contains(id) && seen.insert(*id))
                .cloned()
                .collect();

            let current: HashSet<&ElementId> = state.selected_element_ids.iter().collect();
            if current.len() == ids.len() && ids.iter().all(|id| current.contains(id)) {
                return None;
            }
            Some(with_selection(state, ids, SelectionMode::Transform))
        });
    }

    pub fn select_all(&mut self) {
        let ids: Vec<ElementId> = self.state().elements.iter().map(|el| el.id.clone()).collect();
        self.select_multiple_elements(&ids);
    }

    /// Ids of elements whose bounds touch the rectangle spanned by `a` and `b`.
    pub fn elements_in_rectangle(&self, a: Point, b: Point) -> Vec<ElementId> {
        let area = Bounds::from_corners(a, b);
        self.state()
            .elements
            .iter()
            .filter(|el| element_bounds(el).intersects(&area))
            .map(|el| el.id.clone())
            .collect()
    }

    /// Rubber-band selection. Returns how many elements ended up selected.
    pub fn select_in_rectangle(&mut self, a: Point, b: Point) -> usize {
        let ids = self.elements_in_rectangle(a, b);
        debug!(count = ids.len(), "Rubber-band selection");
        self.select_multiple_elements(&ids);
        ids.len()
    }
}
