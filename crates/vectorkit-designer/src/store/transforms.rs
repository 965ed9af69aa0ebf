use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{apply_updates, EditorStore};
use crate::geometry::{element_bounds, group_bounds, reflect_element, translate_element, Axis};
use crate::history::{HistoryMode, Transition};
use crate::model::{ElementId, ElementUpdate};

/// Edge or centre line the selection is aligned to. Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

impl EditorStore {
    /// Mirrors the selection left-right about the centre of its bounds.
    pub fn flip_horizontally(&mut self) -> bool {
        self.flip(Axis::Vertical)
    }

    /// Mirrors the selection top-bottom about the centre of its bounds.
    pub fn flip_vertically(&mut self) -> bool {
        self.flip(Axis::Horizontal)
    }

    fn flip(&mut self, axis: Axis) -> bool {
        let transition = self.commit(HistoryMode::Record, |state| {
            let bounds = group_bounds(state.selected_elements())?;
            let center = bounds.center();
            let value = match axis {
                Axis::Vertical => center.x,
                Axis::Horizontal => center.y,
            };
            let updates: Vec<(ElementId, ElementUpdate)> = state
                .selected_elements()
                .map(|el| (el.id.clone(), reflect_element(el, axis, value)))
                .collect();
            debug!(?axis, value, count = updates.len(), "Flipping selection");
            apply_updates(state, &updates)
        });
        transition != Transition::Unchanged
    }

    /// Aligns every selected element to one side or centre of the
    /// selection's combined bounds.
    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        let transition = self.commit(HistoryMode::Record, |state| {
            let target = group_bounds(state.selected_elements())?;
            let target_center = target.center();
            let updates: Vec<(ElementId, ElementUpdate)> = state
                .selected_elements()
                .map(|el| {
                    let b = element_bounds(el);
                    let center = b.center();
                    let (dx, dy) = match alignment {
                        Alignment::Left => (target.min_x - b.min_x, 0.0),
                        Alignment::CenterHorizontal => (target_center.x - center.x, 0.0),
                        Alignment::Right => (target.max_x - b.max_x, 0.0),
                        Alignment::Top => (0.0, target.min_y - b.min_y),
                        Alignment::CenterVertical => (0.0, target_center.y - center.y),
                        Alignment::Bottom => (0.0, target.max_y - b.max_y),
                    };
                    (el.id.clone(), translate_element(el, dx, dy))
                })
                .collect();
            debug!(?alignment, count = updates.len(), "Aligning selection");
            apply_updates(state, &updates)
        });
        transition != Transition::Unchanged
    }
}
