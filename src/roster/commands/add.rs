use crate::commands::{CmdMessage, CmdResult};
use crate::draft::Draft;
use crate::error::Result;
use crate::form::{FormController, SubmitOutcome};
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, draft: Draft) -> Result<CmdResult> {
    let mut form = FormController::with_draft(store, draft);
    let mut result = CmdResult::default();

    match form.submit()? {
        SubmitOutcome::Accepted(record) => {
            result.add_message(CmdMessage::success("Form submitted successfully!"));
            if !form.store().is_persistent() {
                result.add_message(CmdMessage::warning(
                    "Storage unavailable: changes are kept for this session only.",
                ));
            }
            Ok(result.with_affected_records(vec![record]))
        }
        SubmitOutcome::Rejected(errors) => {
            result.add_message(CmdMessage::error(format!(
                "Form not submitted: {} field(s) need attention.",
                errors.len()
            )));
            Ok(result.with_validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Attachment;
    use crate::store::memory::MemBackend;
    use crate::validation::FieldKey;

    fn complete() -> Draft {
        Draft {
            name: Some("Omar".into()),
            age: Some("33".into()),
            gender: Some("male".into()),
            status: Some("married".into()),
            date_of_birth: Some("1991-04-04".into()),
            attachment: Some(Attachment::new("cv.pdf", 100, "cv.pdf")),
            terms_accepted: Some(true),
            skills: vec!["ops".into()],
        }
    }

    #[test]
    fn adds_valid_record() {
        let mut store = RecordStore::new(MemBackend::new());
        let result = run(&mut store, complete()).unwrap();
        assert_eq!(result.affected_records.len(), 1);
        assert!(result.validation.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(store.all()[0].name, "Omar");
    }

    #[test]
    fn reports_validation_errors_without_adding() {
        let mut store = RecordStore::new(MemBackend::new());
        let draft = Draft {
            terms_accepted: Some(false),
            ..complete()
        };
        let result = run(&mut store, draft).unwrap();
        let errors = result.validation.unwrap();
        assert!(errors.contains(FieldKey::Terms));
        assert_eq!(errors.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn warns_when_storage_is_unavailable() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = RecordStore::new(backend);
        let result = run(&mut store, complete()).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
        assert_eq!(store.len(), 1);
    }
}
