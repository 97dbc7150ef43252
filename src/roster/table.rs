//! # Table Presenter
//!
//! Holds the table's view state (sort, search, page) and the row currently
//! being edited, and turns row actions into store mutations. Rows come from
//! the derived view pipeline in [`crate::view`].
//!
//! Deleting goes through a [`Confirm`] collaborator, asked exactly once per
//! delete; the store is touched only on [`Decision::Confirmed`].

use crate::draft::{Draft, FieldEdit};
use crate::error::{Result, RosterError};
use crate::model::{Record, RecordId};
use crate::store::{RecordStore, StorageBackend};
use crate::validation::ValidationErrors;
use crate::view::{derive_view, filter_records, Page, SortDirective, SortKey, ViewQuery};
use log::debug;

pub const DELETE_TITLE: &str = "Delete Row";
pub const DELETE_DESCRIPTION: &str =
    "Are you sure you want to delete this row? This action cannot be undone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, title: &str, description: &str) -> Decision;
}

/// Confirms everything without asking (`--yes`).
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _title: &str, _description: &str) -> Decision {
        Decision::Confirmed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved(Record),
    Rejected(ValidationErrors),
    /// No edit in progress, or the row disappeared meanwhile.
    NotEditing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Record),
    Cancelled,
    NotFound,
}

pub struct TablePresenter<'s, B: StorageBackend> {
    store: &'s mut RecordStore<B>,
    query: ViewQuery,
    editing: Option<(RecordId, Draft)>,
}

impl<'s, B: StorageBackend> TablePresenter<'s, B> {
    pub fn new(store: &'s mut RecordStore<B>) -> Self {
        Self::with_query(store, ViewQuery::default())
    }

    pub fn with_query(store: &'s mut RecordStore<B>, query: ViewQuery) -> Self {
        Self {
            store,
            query,
            editing: None,
        }
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn store(&self) -> &RecordStore<B> {
        self.store
    }

    /// The current page of rows.
    pub fn rows(&self) -> Page<Record> {
        derive_view(self.store.all(), &self.query).cloned()
    }

    pub fn request_sort(&mut self, key: SortKey) {
        self.query.sort = Some(SortDirective::toggle(self.query.sort, key));
    }

    /// Changes the search term and goes back to the first page.
    pub fn set_search(&mut self, term: &str) {
        if self.query.search != term {
            self.query.search = term.to_string();
            self.query.page_index = 0;
        }
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.query.page_index = page_index;
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(RosterError::Api(
                "Page size must be greater than 0".to_string(),
            ));
        }
        self.query.page_size = page_size;
        self.query.page_index = 0;
        Ok(())
    }

    // --- Row editing ---

    /// Starts editing the row with `id`, pre-filled from the stored record.
    pub fn begin_edit(&mut self, id: &RecordId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.editing = Some((id.clone(), Draft::from_record(record)));
                true
            }
            None => false,
        }
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        self.editing.as_ref().map(|(id, _)| id)
    }

    /// Applies `edit` to the row being edited. Returns false when not editing.
    pub fn edit(&mut self, edit: FieldEdit) -> bool {
        match self.editing.as_mut() {
            Some((_, draft)) => {
                draft.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Validates the edited row and writes it back in place.
    /// A rejected edit stays open so it can be corrected.
    pub fn save_edit(&mut self) -> EditOutcome {
        let Some((id, draft)) = self.editing.as_ref() else {
            return EditOutcome::NotEditing;
        };
        let record = match draft.finalize(id.clone()) {
            Ok(record) => record,
            Err(errors) => return EditOutcome::Rejected(errors),
        };
        let id = id.clone();
        self.editing = None;
        if !self.store.update(&id, record.clone()) {
            return EditOutcome::NotEditing;
        }
        debug!("saved edit of {}", id);
        self.clamp_page();
        EditOutcome::Saved(record)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // --- Row actions ---

    pub fn copy(&mut self, id: &RecordId) -> Option<Record> {
        let source = self.store.get(id)?.clone();
        Some(self.store.copy(&source))
    }

    pub fn delete(&mut self, id: &RecordId, confirm: &mut dyn Confirm) -> DeleteOutcome {
        let Some(record) = self.store.get(id).cloned() else {
            return DeleteOutcome::NotFound;
        };
        if confirm.confirm(DELETE_TITLE, DELETE_DESCRIPTION) == Decision::Cancelled {
            return DeleteOutcome::Cancelled;
        }
        self.store.delete(id);
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
        self.clamp_page();
        DeleteOutcome::Deleted(record)
    }

    fn clamp_page(&mut self) {
        let total = filter_records(self.store.all().iter().collect(), &self.query.search).len();
        if self.query.clamp_page(total) {
            debug!("page reset after results shrank to {}", total);
        }
    }
}
