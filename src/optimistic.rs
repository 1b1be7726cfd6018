//! Optimistic remove with a single-slot undo.
//!
//! The displayed list changes first and synchronously; the durable write runs
//! afterwards in a detached task whose only output is a failure report on the
//! error channel. Nothing is rolled back when that write fails: the list and the
//! store may diverge until the next full reload.
//!
//! The controller keeps no list or undo state of its own. Callers pass the
//! current list and an [`UndoState`] in, and get the new list (through the
//! `update_ui` capability) and the next [`UndoState`] back.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::view_model::ErrorChannel;

/// The single undo slot: empty, or the last removed item and where it was.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoState<T> {
    Idle,
    PendingUndo { item: T, index: usize },
}

impl<T> Default for UndoState<T> {
    fn default() -> Self {
        UndoState::Idle
    }
}

impl<T> UndoState<T> {
    pub fn pending(item: T, index: usize) -> Self {
        UndoState::PendingUndo { item, index }
    }

    /// Builds the state from the nullable item / `-1` sentinel pair.
    pub fn from_parts(item: Option<T>, index: i64) -> Self {
        match (item, usize::try_from(index)) {
            (Some(item), Ok(index)) => UndoState::PendingUndo { item, index },
            _ => UndoState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, UndoState::PendingUndo { .. })
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            UndoState::PendingUndo { item, .. } => Some(item),
            UndoState::Idle => None,
        }
    }
}

/// Removes the first element whose id matches `item`'s id.
///
/// Returns the new list and the index the element had, or `None` when no
/// element matches.
pub fn remove_from<T, K, I>(list: &[T], item: &T, id_of: I) -> Option<(Vec<T>, usize)>
where
    T: Clone,
    K: PartialEq,
    I: Fn(&T) -> K,
{
    let target = id_of(item);
    let index = list.iter().position(|entry| id_of(entry) == target)?;
    let mut updated = list.to_vec();
    updated.remove(index);
    Some((updated, index))
}

/// Inserts `item` at `index`, clamped to the list length.
///
/// Returns `None` when an element with the same id is already present.
pub fn restore_into<T, K, I>(list: &[T], item: &T, index: usize, id_of: I) -> Option<Vec<T>>
where
    T: Clone,
    K: PartialEq,
    I: Fn(&T) -> K,
{
    let target = id_of(item);
    if list.iter().any(|entry| id_of(entry) == target) {
        return None;
    }
    let mut updated = list.to_vec();
    updated.insert(index.min(updated.len()), item.clone());
    Some(updated)
}

/// Runs the list mutations of remove/undo and owns the detached persistence
/// tasks. Dropping the controller aborts the tasks that are still running.
pub struct OptimisticController {
    tasks: JoinSet<()>,
    errors: ErrorChannel,
}

impl OptimisticController {
    pub fn new(errors: ErrorChannel) -> Self {
        Self {
            tasks: JoinSet::new(),
            errors,
        }
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    /// Number of detached tasks not yet reaped.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Optimistic remove.
    ///
    /// When `item`'s id is not in `current` nothing happens: no callback, no
    /// publish, no persistence call.
    pub fn remove<T, K, I, R, U, P, Fut, E>(
        &mut self,
        item: T,
        current: &[T],
        id_of: I,
        on_removed: R,
        update_ui: U,
        persist_remove: P,
    ) where
        T: Clone,
        K: PartialEq + Display,
        I: Fn(&T) -> K,
        R: FnOnce(T, usize),
        U: FnOnce(Vec<T>),
        P: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let Some((updated, index)) = remove_from(current, &item, &id_of) else {
            debug!(item_id = %id_of(&item), "remove: item not in list");
            return;
        };
        debug!(item_id = %id_of(&item), index, "remove");

        on_removed(item.clone(), index);
        update_ui(updated);
        self.launch(persist_remove(item));
    }

    /// Optimistic undo of the last remove.
    ///
    /// Returns `Idle` once the item was reinserted. An `Idle` input, or an item
    /// whose id is already in `current`, leaves everything unchanged and the
    /// input state is returned as it was.
    pub fn undo<T, K, I, U, P, Fut, E>(
        &mut self,
        state: UndoState<T>,
        current: &[T],
        id_of: I,
        update_ui: U,
        persist_create: P,
    ) -> UndoState<T>
    where
        T: Clone,
        K: PartialEq + Display,
        I: Fn(&T) -> K,
        U: FnOnce(Vec<T>, K),
        P: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let UndoState::PendingUndo { item, index } = state else {
            debug!("undo: nothing to restore");
            return UndoState::Idle;
        };
        let Some(restored) = restore_into(current, &item, index, &id_of) else {
            debug!(item_id = %id_of(&item), "undo: item already in list");
            return UndoState::PendingUndo { item, index };
        };
        let restored_id = id_of(&item);
        debug!(item_id = %restored_id, index, "undo");

        update_ui(restored, restored_id);
        self.launch(persist_create(item));
        UndoState::Idle
    }

    /// Detaches `work`; a failure is reported on the error channel.
    pub fn launch<Fut, E>(&mut self, work: Fut)
    where
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let errors = self.errors.clone();
        self.spawn(async move {
            if let Err(e) = work.await {
                errors.report_failure(&e);
            }
        });
    }

    /// Detaches `work` on the controller's task scope.
    pub fn spawn<Fut>(&mut self, work: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.tasks.spawn(work);
    }

    /// Waits until every detached task has finished.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Background task failed");
            }
        }
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                warn!(error = %e, "Background task failed");
            }
        }
    }
}
