//! Editor state store.
//!
//! [`EditorStore`] is the single owner of the document: elements,
//! selection, active tool and viewport. Every action builds a new
//! [`EditorState`] snapshot and commits it through the undo history, so
//! readers holding an older `Arc<EditorState>` never observe a mutation.
//!
//! Actions are split by concern:
//! - `selection`: single, multi and rubber-band selection
//! - `transforms`: flips and alignment of the selection
//! - `file_io`: SVG import/export and document files
//! - `shortcuts`: keyboard bindings

mod file_io;
mod selection;
mod shortcuts;
mod transforms;

pub use shortcuts::Shortcut;
pub use transforms::Alignment;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use vectorkit_settings::EditorConfig;

use crate::history::{History, HistoryMode, Transition};
use crate::model::{
    Element, ElementId, ElementKind, ElementUpdate, NewElement, PathPoint, Point, Tool,
};
use crate::viewport::Viewport;

/// One immutable snapshot of the document and editor chrome.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub elements: Vec<Element>,
    /// Set only when exactly one element is selected.
    pub selected_element_id: Option<ElementId>,
    pub selected_element_ids: Vec<ElementId>,
    pub tool: Tool,
    pub viewport: Viewport,
}

impl EditorState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// A small sample document.
    pub fn demo(viewport: Viewport) -> Self {
        let shapes = [
            NewElement::rect(100.0, 100.0, 120.0, 80.0).with_fill("#4f86f7"),
            NewElement::circle(400.0, 300.0, 60.0).with_stroke("#d9480f", 3.0),
            NewElement::path(
                560.0,
                380.0,
                vec![
                    PathPoint::move_to(0.0, 80.0),
                    PathPoint::curve_to(Point::new(20.0, 0.0), Point::new(100.0, 0.0), 120.0, 80.0),
                    PathPoint::close(0.0, 80.0),
                ],
            )
            .with_fill("#2b8a3e"),
        ];
        Self {
            elements: shapes
                .into_iter()
                .map(|shape| shape.into_element(ElementId::generate()))
                .collect(),
            ..Self::new(viewport)
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| &el.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Selected elements in document order.
    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.is_selected)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_element_ids.is_empty()
    }

    /// Checks the selection bookkeeping against the element flags.
    pub fn is_consistent(&self) -> bool {
        let single_ok = match self.selected_element_ids.as_slice() {
            [only] => self.selected_element_id.as_ref() == Some(only),
            _ => self.selected_element_id.is_none(),
        };
        let flags_ok = self.elements.iter().all(|el| {
            let listed = self.selected_element_ids.contains(&el.id);
            listed == el.is_selected && el.is_selected == el.selection_mode.is_some()
        });
        let listed_exist = self.selected_element_ids.iter().all(|id| self.contains(id));
        single_ok && flags_ok && listed_exist
    }
}

/// True when the element list changed beyond selection flags.
///
/// Tool, viewport and selection changes are not undoable.
pub fn records_history(prev: &EditorState, next: &EditorState) -> bool {
    prev.elements.len() != next.elements.len()
        || prev
            .elements
            .iter()
            .zip(&next.elements)
            .any(|(a, b)| !a.same_content(b))
}

/// Groups a freehand stroke into one undo step.
///
/// Returns `draw:<id>` when `next` appends a drawing or only extends the
/// points of the last drawing.
pub fn history_group(prev: &EditorState, next: &EditorState) -> Option<String> {
    let last = next.elements.last()?;
    let ElementKind::Drawing { points } = &last.kind else {
        return None;
    };
    let rest = &next.elements[..next.elements.len() - 1];
    let same_rest = |others: &[Element]| {
        others.len() == rest.len() && others.iter().zip(rest).all(|(a, b)| a.same_content(b))
    };

    if prev.elements.len() + 1 == next.elements.len() {
        return same_rest(&prev.elements).then(|| format!("draw:{}", last.id));
    }

    let (prev_last, prev_rest) = prev.elements.split_last()?;
    let ElementKind::Drawing {
        points: prev_points,
    } = &prev_last.kind
    else {
        return None;
    };
    let extended = prev_last.id == last.id
        && points.len() > prev_points.len()
        && points.starts_with(prev_points)
        && ElementUpdate {
            points: Some(prev_points.clone()),
            ..ElementUpdate::default()
        }
        .applied(last)
        .same_content(prev_last);
    (extended && same_rest(prev_rest)).then(|| format!("draw:{}", last.id))
}

/// Owns the document history and every editing action.
pub struct EditorStore {
    history: History<EditorState>,
    config: EditorConfig,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let state = EditorState::new(Viewport::new(&config.viewport));
        Self::with_state(state, config)
    }

    pub fn with_state(state: EditorState, config: EditorConfig) -> Self {
        let history = History::new(state)
            .with_limit(config.history.limit)
            .with_filter(records_history)
            .with_group_by(history_group);
        Self { history, config }
    }

    pub fn state(&self) -> &Arc<EditorState> {
        self.history.present()
    }

    /// A cheap handle to the present snapshot.
    pub fn snapshot(&self) -> Arc<EditorState> {
        Arc::clone(self.history.present())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Commits `f(present)`; `None` means nothing changed.
    fn commit(
        &mut self,
        mode: HistoryMode,
        f: impl FnOnce(&EditorState) -> Option<EditorState>,
    ) -> Transition {
        self.history.set_state(
            |present| match f(present) {
                Some(next) => {
                    debug_assert!(next.is_consistent(), "selection bookkeeping out of sync");
                    Arc::new(next)
                }
                None => Arc::clone(present),
            },
            mode,
        )
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn clear_history(&mut self) {
        self.history.clear_history();
    }

    // ---- elements ----

    /// Appends a new unselected element and returns its fresh id.
    pub fn add_element(&mut self, element: NewElement) -> ElementId {
        let id = ElementId::generate();
        let created = element.into_element(id.clone());
        debug!(id = %id, kind = ?created.element_type(), "Adding element");
        self.commit(HistoryMode::Record, |state| {
            let mut next = state.clone();
            next.elements.push(created);
            Some(next)
        });
        id
    }

    pub fn update_element(&mut self, id: &ElementId, update: ElementUpdate) -> bool {
        self.update_multiple_elements(&[(id.clone(), update)])
    }

    /// Applies several updates as one history step.
    ///
    /// Unknown ids and updates that would change nothing are skipped.
    /// Returns whether anything changed.
    pub fn update_multiple_elements(&mut self, updates: &[(ElementId, ElementUpdate)]) -> bool {
        let transition = self.commit(HistoryMode::Record, |state| apply_updates(state, updates));
        transition != Transition::Unchanged
    }

    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        let transition = self.commit(HistoryMode::Record, |state| {
            state.contains(id).then(|| remove_elements(state, |el| &el.id == id))
        });
        transition != Transition::Unchanged
    }

    pub fn delete_selected(&mut self) -> usize {
        let count = self.state().selected_element_ids.len();
        if count == 0 {
            return 0;
        }
        self.commit(HistoryMode::Record, |state| {
            Some(remove_elements(state, |el| el.is_selected))
        });
        debug!(count, "Deleted selection");
        count
    }

    /// Replaces the document with an empty one; undoable.
    pub fn clear_canvas(&mut self) {
        self.commit(HistoryMode::Record, |state| {
            (!state.elements.is_empty()).then(|| EditorState {
                tool: state.tool,
                viewport: state.viewport.clone(),
                ..EditorState::default()
            })
        });
    }

    // ---- tool and viewport (not undoable) ----

    pub fn set_tool(&mut self, tool: Tool) {
        self.commit(HistoryMode::Skip, |state| {
            (state.tool != tool).then(|| EditorState {
                tool,
                ..state.clone()
            })
        });
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.update_viewport(|viewport| viewport.set_zoom(zoom));
    }

    pub fn zoom_in(&mut self) {
        self.update_viewport(Viewport::zoom_in);
    }

    pub fn zoom_out(&mut self) {
        self.update_viewport(Viewport::zoom_out);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.update_viewport(|viewport| viewport.set_pan(x, y));
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.update_viewport(|viewport| viewport.pan_by(dx, dy));
    }

    fn update_viewport(&mut self, f: impl FnOnce(&mut Viewport)) {
        self.commit(HistoryMode::Skip, |state| {
            let mut viewport = state.viewport.clone();
            f(&mut viewport);
            (viewport != state.viewport).then(|| EditorState {
                viewport,
                ..state.clone()
            })
        });
    }
}

/// Shallow-merges `updates` into a copy of `state`.
///
/// Returns `None` when no update changes anything.
pub(crate) fn apply_updates(
    state: &EditorState,
    updates: &[(ElementId, ElementUpdate)],
) -> Option<EditorState> {
    let index: HashMap<&ElementId, usize> = state
        .elements
        .iter()
        .enumerate()
        .map(|(i, el)| (&el.id, i))
        .collect();

    let mut elements: Option<Vec<Element>> = None;
    for (id, update) in updates {
        let Some(&i) = index.get(id) else {
            continue;
        };
        let current = elements.as_ref().map_or(&state.elements[i], |els| &els[i]);
        if update.is_noop_for(current) {
            continue;
        }
        let elements = elements.get_or_insert_with(|| state.elements.clone());
        update.apply_to(&mut elements[i]);
    }

    elements.map(|elements| EditorState {
        elements,
        ..state.clone()
    })
}

fn remove_elements(state: &EditorState, remove: impl Fn(&Element) -> bool) -> EditorState {
    let elements: Vec<Element> = state
        .elements
        .iter()
        .filter(|el| !remove(el))
        .cloned()
        .collect();
    let selected: Vec<ElementId> = state
        .selected_element_ids
        .iter()
        .filter(|id| elements.iter().any(|el| &el.id == *id))
        .cloned()
        .collect();
    let selected_element_id = match selected.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };
    EditorState {
        elements,
        selected_element_id,
        selected_element_ids: selected,
        tool: state.tool,
        viewport: state.viewport.clone(),
    }
}
