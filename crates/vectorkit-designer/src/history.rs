//! Undo/redo history over immutable snapshots.
//!
//! [`History`] wraps a present value with bounded past and future stacks.
//! A transition can be skipped entirely, rejected by a filter predicate,
//! or merged with the previous one when both share a group key, so a run of
//! related edits (a freehand stroke, say) undoes in one step.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Default number of past snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Whether a state change participates in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Record,
    /// Replace the present without touching past or future.
    Skip,
}

/// What a call to [`History::set_state`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The updater returned the same snapshot.
    Unchanged,
    /// Present replaced, stacks untouched (skip mode or filtered out).
    Replaced,
    /// Merged into the previous entry of the same group.
    Grouped,
    /// Previous present pushed to the past.
    Pushed,
}

pub type HistoryFilter<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;
pub type HistoryGroupBy<T> = Box<dyn Fn(&T, &T) -> Option<String> + Send + Sync>;

pub struct History<T> {
    past: VecDeque<Arc<T>>,
    present: Arc<T>,
    future: VecDeque<Arc<T>>,
    last_group: Option<String>,
    limit: usize,
    filter: Option<HistoryFilter<T>>,
    group_by: Option<HistoryGroupBy<T>>,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self::from_arc(Arc::new(initial))
    }

    pub fn from_arc(initial: Arc<T>) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            last_group: None,
            limit: DEFAULT_HISTORY_LIMIT,
            filter: None,
            group_by: None,
        }
    }

    /// Caps the past stack. A limit of zero keeps no undo steps.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self.evict();
        self
    }

    /// Only transitions for which `filter(prev, next)` holds are recorded.
    pub fn with_filter(mut self, filter: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Consecutive transitions with the same key collapse into one entry.
    pub fn with_group_by(
        mut self,
        group_by: impl Fn(&T, &T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.group_by = Some(Box::new(group_by));
        self
    }

    pub fn present(&self) -> &Arc<T> {
        &self.present
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn last_group(&self) -> Option<&str> {
        self.last_group.as_deref()
    }

    /// Replaces the present with `update(present)`.
    pub fn set_state(
        &mut self,
        update: impl FnOnce(&Arc<T>) -> Arc<T>,
        mode: HistoryMode,
    ) -> Transition {
        let next = update(&self.present);
        if Arc::ptr_eq(&next, &self.present) {
            return Transition::Unchanged;
        }

        if mode == HistoryMode::Skip {
            self.present = next;
            return Transition::Replaced;
        }

        if let Some(filter) = &self.filter {
            if !filter(&self.present, &next) {
                self.present = next;
                return Transition::Replaced;
            }
        }

        let group = self
            .group_by
            .as_ref()
            .and_then(|group_by| group_by(&self.present, &next));

        if group.is_some() && group == self.last_group {
            self.present = next;
            self.future.clear();
            return Transition::Grouped;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);
        self.evict();
        self.future.clear();
        self.last_group = group;
        Transition::Pushed
    }

    /// Steps back one entry. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.last_group = None;
        true
    }

    /// Steps forward one entry. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        self.evict();
        self.last_group = None;
        true
    }

    pub fn clear_history(&mut self) {
        self.past.clear();
        self.future.clear();
        self.last_group = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Arc<T>> {
        self.past.iter()
    }

    fn evict(&mut self) {
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("present", &self.present)
            .field("undo_depth", &self.past.len())
            .field("redo_depth", &self.future.len())
            .field("last_group", &self.last_group)
            .field("limit", &self.limit)
            .finish()
    }
}
