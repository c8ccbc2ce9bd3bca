//! Drag-and-drop reordering with optimistic update and revert on failure.

use langleague_core::{Exercise, Grammar, OrderedItem, OrderedList, ReorderCommit, Unit, Vocabulary};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::repository::ContentRepository;

/// Which list is being reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderScope {
    /// Units of a book.
    Units,
    /// Vocabulary of a unit.
    Vocabulary,
    /// Grammar points of a unit.
    Grammar,
    /// Exercises of a unit.
    Exercises,
}

impl ReorderScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::Exercises => "exercises",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "units" | "unit" => Some(Self::Units),
            "vocabulary" | "vocabularies" => Some(Self::Vocabulary),
            "grammar" | "grammars" => Some(Self::Grammar),
            "exercises" | "exercise" => Some(Self::Exercises),
            _ => None,
        }
    }
}

/// Item type that can be reordered within its parent.
pub trait ScopedItem: OrderedItem + Clone + Send + Sync + Sized {
    const SCOPE: ReorderScope;

    /// Persist a finished reorder of the items under `parent_id`.
    fn save_order(
        api: &ApiClient,
        parent_id: i64,
        commit: &ReorderCommit<Self>,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl ScopedItem for Unit {
    const SCOPE: ReorderScope = ReorderScope::Units;

    async fn save_order(api: &ApiClient, book_id: i64, commit: &ReorderCommit<Self>) -> Result<()> {
        api.reorder_units(book_id, &commit.ids).await
    }
}

impl ScopedItem for Vocabulary {
    const SCOPE: ReorderScope = ReorderScope::Vocabulary;

    async fn save_order(api: &ApiClient, _unit_id: i64, commit: &ReorderCommit<Self>) -> Result<()> {
        api.bulk_update_vocabularies(&commit.items).await?;
        Ok(())
    }
}

impl ScopedItem for Grammar {
    const SCOPE: ReorderScope = ReorderScope::Grammar;

    async fn save_order(api: &ApiClient, _unit_id: i64, commit: &ReorderCommit<Self>) -> Result<()> {
        api.bulk_update_grammars(&commit.items).await?;
        Ok(())
    }
}

impl ScopedItem for Exercise {
    const SCOPE: ReorderScope = ReorderScope::Exercises;

    async fn save_order(api: &ApiClient, _unit_id: i64, commit: &ReorderCommit<Self>) -> Result<()> {
        api.bulk_update_exercises(&commit.items).await?;
        Ok(())
    }
}

/// Result of dropping a dragged item.
#[derive(Debug)]
pub enum ReorderOutcome {
    /// Dropped where it started; nothing was sent.
    Unchanged,
    /// The server accepted the order. Ids in their new order.
    Saved(Vec<i64>),
    /// The server refused; the list shows the last confirmed order again.
    Reverted(ClientError),
}

/// Drives an [`OrderedList`] and persists finished drags.
pub struct ReorderController<T> {
    repository: Arc<ContentRepository>,
    parent_id: i64,
    list: OrderedList<T>,
}

impl<T: ScopedItem> ReorderController<T> {
    /// `parent_id` is the book for units and the unit for everything else.
    pub fn new(repository: Arc<ContentRepository>, parent_id: i64, items: Vec<T>) -> Self {
        Self {
            repository,
            parent_id,
            list: OrderedList::new(items),
        }
    }

    pub fn scope(&self) -> ReorderScope {
        T::SCOPE
    }

    pub fn list(&self) -> &OrderedList<T> {
        &self.list
    }

    /// Items as currently displayed.
    pub fn items(&self) -> &[T] {
        self.list.items()
    }

    pub fn begin_drag(&mut self, source: usize) -> Result<()> {
        Ok(self.list.begin_drag(source)?)
    }

    pub fn drag_over(&mut self, target: usize) -> Result<()> {
        Ok(self.list.drag_over(target)?)
    }

    /// Drop the dragged item and save the new order.
    ///
    /// A failed save is not an error: the list reverts and the outcome
    /// carries the failure.
    pub async fn end_drag(&mut self) -> Result<ReorderOutcome> {
        let Some(commit) = self.list.end_drag()? else {
            return Ok(ReorderOutcome::Unchanged);
        };

        match T::save_order(self.repository.api(), self.parent_id, &commit).await {
            Ok(()) => {
                self.list.confirm();
                if T::SCOPE != ReorderScope::Units {
                    self.repository.invalidate(self.parent_id).await;
                }
                info!(
                    "Saved {} order of {} ({} items)",
                    T::SCOPE.as_str(),
                    self.parent_id,
                    commit.ids.len()
                );
                Ok(ReorderOutcome::Saved(commit.ids))
            }
            Err(e) => {
                warn!(
                    "Saving {} order of {} failed, reverting: {}",
                    T::SCOPE.as_str(),
                    self.parent_id,
                    e
                );
                self.list.revert();
                Ok(ReorderOutcome::Reverted(e))
            }
        }
    }

    /// Drag the item at `from` straight to `to` and drop it.
    pub async fn move_item(&mut self, from: usize, to: usize) -> Result<ReorderOutcome> {
        self.begin_drag(from)?;
        if let Err(e) = self.drag_over(to) {
            self.list.revert();
            return Err(e);
        }
        self.end_drag().await
    }
}
