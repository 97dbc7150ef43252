//! # Form Controller
//!
//! Drives a [`Draft`] through validation into the [`RecordStore`].
//!
//! ```text
//!            edit()                 submit()
//!   ┌──────────────────┐   ┌───────────────────────┐
//!   ▼                  │   │                       ▼
//! Editing ─────────────┴───┘                  Submitting
//!   ▲  ▲                                   │        │
//!   │  └──────── errors populated ─────────┘        │ valid
//!   │                                               ▼
//!   └────────── draft cleared ─────────────── Submitted (record added)
//! ```
//!
//! Validation failures are not errors here: they come back as
//! [`SubmitOutcome::Rejected`] and stay available through [`FormController::errors`].
//! The only `Err` is a store logic error (an id collision on insert).

use crate::draft::{Draft, FieldEdit};
use crate::error::Result;
use crate::model::{Record, RecordId};
use crate::store::{RecordStore, StorageBackend};
use crate::validation::ValidationErrors;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(Record),
    Rejected(ValidationErrors),
}

pub struct FormController<'s, B: StorageBackend> {
    store: &'s mut RecordStore<B>,
    draft: Draft,
    errors: ValidationErrors,
    state: FormState,
}

impl<'s, B: StorageBackend> FormController<'s, B> {
    pub fn new(store: &'s mut RecordStore<B>) -> Self {
        Self::with_draft(store, Draft::default())
    }

    pub fn with_draft(store: &'s mut RecordStore<B>, draft: Draft) -> Self {
        Self {
            store,
            draft,
            errors: ValidationErrors::default(),
            state: FormState::Editing,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn store(&self) -> &RecordStore<B> {
        self.store
    }

    /// Applies one field edit. A stale error for that field is dropped until
    /// the next submit.
    pub fn edit(&mut self, edit: FieldEdit) {
        self.errors.remove(edit.key());
        self.draft.apply(edit);
        self.transition(FormState::Editing);
    }

    /// Validates the draft and, if it passes, adds the record to the store and
    /// clears the form.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.transition(FormState::Submitting);

        let record = match self.draft.finalize(RecordId::generate()) {
            Ok(record) => record,
            Err(errors) => {
                debug!("form rejected with {} field errors", errors.len());
                self.errors = errors.clone();
                self.transition(FormState::Editing);
                return Ok(SubmitOutcome::Rejected(errors));
            }
        };

        if let Err(e) = self.store.add(record.clone()) {
            self.transition(FormState::Editing);
            return Err(e);
        }
        self.transition(FormState::Submitted);
        self.reset();
        Ok(SubmitOutcome::Accepted(record))
    }

    /// Back to a blank draft with no errors.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.errors = ValidationErrors::default();
        self.transition(FormState::Editing);
    }

    fn transition(&mut self, next: FormState) {
        if self.state != next {
            debug!("form {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attachment;
    use crate::store::memory::fixtures::records;
    use crate::store::memory::MemBackend;
    use crate::validation::FieldKey;

    fn fill(form: &mut FormController<'_, MemBackend>) {
        form.edit(FieldEdit::Name("Nina".into()));
        form.edit(FieldEdit::Age("27".into()));
        form.edit(FieldEdit::Gender("female".into()));
        form.edit(FieldEdit::Status("single".into()));
        form.edit(FieldEdit::DateOfBirth("1997-08-08".into()));
        form.edit(FieldEdit::Attachment(Some(Attachment::new("a.txt", 3, "a.txt"))));
        form.edit(FieldEdit::Terms(true));
        form.edit(FieldEdit::AddSkill("ux".into()));
    }

    #[test]
    fn starts_editing_with_blank_draft() {
        let mut store = RecordStore::new(MemBackend::new());
        let form = FormController::new(&mut store);
        assert_eq!(form.state(), FormState::Editing);
        assert!(form.draft().is_blank());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn rejected_submit_keeps_draft_and_reports_errors() {
        let mut store = RecordStore::new(MemBackend::new());
        let mut form = FormController::new(&mut store);
        form.edit(FieldEdit::Name("Nina".into()));

        let outcome = form.submit().unwrap();
        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert!(!errors.contains(FieldKey::Name));
        assert!(errors.contains(FieldKey::Age));
        assert_eq!(form.errors(), &errors);
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.draft().name.as_deref(), Some("Nina"));
        assert!(form.store().is_empty());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut store = RecordStore::new(MemBackend::new());
        let mut form = FormController::new(&mut store);
        form.submit().unwrap();
        assert!(form.errors().contains(FieldKey::Age));

        form.edit(FieldEdit::Age("oops".into()));
        assert!(!form.errors().contains(FieldKey::Age));
        assert!(form.errors().contains(FieldKey::Name));
    }

    #[test]
    fn accepted_submit_adds_record_and_clears_form() {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(records(2));
        let mut form = FormController::new(&mut store);
        fill(&mut form);

        let SubmitOutcome::Accepted(record) = form.submit().unwrap() else {
            panic!("expected acceptance");
        };
        assert_eq!(form.state(), FormState::Editing);
        assert!(form.draft().is_blank());
        assert!(form.errors().is_empty());
        assert_eq!(record.name, "Nina");
        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[2], record);
    }

    #[test]
    fn controller_is_reusable() {
        let mut store = RecordStore::new(MemBackend::new());
        let mut form = FormController::new(&mut store);
        fill(&mut form);
        form.submit().unwrap();
        fill(&mut form);
        form.submit().unwrap();
        assert_eq!(form.store().len(), 2);
        assert_ne!(form.store().all()[0].id, form.store().all()[1].id);
    }
}
