//! Drag-and-drop reordering of units, vocabulary, grammar and exercises.
//!
//! A drag moves the dragged item one hover target at a time, so the visible
//! order follows the pointer. On drop the items receive contiguous 1-based
//! order indices and the new order is handed out for submission. The last
//! order the server accepted is kept as a shared snapshot; a failed
//! submission goes back to that exact snapshot.

use crate::error::ReorderError;
use crate::types::OrderedItem;
use std::sync::Arc;

/// Move the item at `from` so that it ends up at `to`.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::IndexOutOfBounds { index, len });
        }
    }

    let mut items = list.to_vec();
    let item = items.remove(from);
    items.insert(to, item);
    Ok(items)
}

/// Set each item's order index to its 1-based position.
pub fn assign_order_indices<T: OrderedItem>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_order_index(position as i32 + 1);
    }
}

/// New order produced by a finished drag, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderCommit<T> {
    /// Ids in their new display order.
    pub ids: Vec<i64>,
    /// Items with reassigned order indices.
    pub items: Vec<T>,
}

#[derive(Debug, Clone)]
struct Draft<T> {
    items: Vec<T>,
    /// Current position of the dragged item; `None` once dropped.
    dragged: Option<usize>,
}

/// Ordered list with an optimistic draft on top of the confirmed order.
#[derive(Debug, Clone)]
pub struct OrderedList<T> {
    confirmed: Arc<Vec<T>>,
    draft: Option<Draft<T>>,
}

impl<T: OrderedItem + Clone> OrderedList<T> {
    /// Wrap items as returned by the server, sorted by their order index.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by_key(|item| item.order_index());
        Self::from_confirmed(Arc::new(items))
    }

    /// Wrap an existing snapshot as is.
    pub fn from_confirmed(confirmed: Arc<Vec<T>>) -> Self {
        Self {
            confirmed,
            draft: None,
        }
    }

    /// Items as currently displayed.
    pub fn items(&self) -> &[T] {
        match &self.draft {
            Some(draft) => draft.items.as_slice(),
            None => self.confirmed.as_slice(),
        }
    }

    /// Last order accepted by the server.
    pub fn confirmed(&self) -> &Arc<Vec<T>> {
        &self.confirmed
    }

    pub fn len(&self) -> usize {
        self.confirmed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(&self.draft, Some(Draft { dragged: Some(_), .. }))
    }

    /// Whether a dropped order is waiting for confirm or revert.
    pub fn has_pending(&self) -> bool {
        matches!(&self.draft, Some(Draft { dragged: None, .. }))
    }

    /// Start dragging the item at `source`.
    pub fn begin_drag(&mut self, source: usize) -> Result<(), ReorderError> {
        let len = self.confirmed.len();
        if source >= len {
            return Err(ReorderError::IndexOutOfBounds { index: source, len });
        }
        self.draft = Some(Draft {
            items: self.confirmed.to_vec(),
            dragged: Some(source),
        });
        Ok(())
    }

    /// Pointer is over `target`: move the dragged item there.
    ///
    /// Hovering the dragged item's own slot changes nothing.
    pub fn drag_over(&mut self, target: usize) -> Result<(), ReorderError> {
        let draft = self.draft.as_mut().ok_or(ReorderError::NoDragInProgress)?;
        let dragged = draft.dragged.ok_or(ReorderError::NoDragInProgress)?;
        if target == dragged {
            return Ok(());
        }

        draft.items = reorder(&draft.items, dragged, target)?;
        draft.dragged = Some(target);
        Ok(())
    }

    /// Drop the dragged item.
    ///
    /// Returns `None` when the order did not change; there is nothing to
    /// submit and the draft is discarded.
    pub fn end_drag(&mut self) -> Result<Option<ReorderCommit<T>>, ReorderError> {
        let mut draft = self.draft.take().ok_or(ReorderError::NoDragInProgress)?;
        if draft.dragged.is_none() {
            self.draft = Some(draft);
            return Err(ReorderError::NoDragInProgress);
        }

        let unchanged = draft
            .items
            .iter()
            .map(|item| item.id())
            .eq(self.confirmed.iter().map(|item| item.id()));
        if unchanged {
            return Ok(None);
        }

        assign_order_indices(&mut draft.items);
        draft.dragged = None;

        let commit = ReorderCommit {
            ids: draft.items.iter().filter_map(|item| item.id()).collect(),
            items: draft.items.clone(),
        };
        self.draft = Some(draft);
        Ok(Some(commit))
    }

    /// The server accepted the pending order.
    pub fn confirm(&mut self) -> Arc<Vec<T>> {
        if let Some(draft) = self.draft.take() {
            self.confirmed = Arc::new(draft.items);
        }
        Arc::clone(&self.confirmed)
    }

    /// Drop the draft and show the confirmed order again.
    pub fn revert(&mut self) -> Arc<Vec<T>> {
        self.draft = None;
        Arc::clone(&self.confirmed)
    }

    /// Replace everything with a fresh server snapshot.
    pub fn replace(&mut self, items: Vec<T>) {
        *self = Self::new(items);
    }
}
