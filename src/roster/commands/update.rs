use crate::commands::{CmdMessage, CmdResult, RecordUpdate};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use crate::table::{EditOutcome, TablePresenter};

use super::helpers::resolve_id;

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, update: RecordUpdate) -> Result<CmdResult> {
    let id = resolve_id(store, &update.selector)?;
    let mut table = TablePresenter::new(store);
    let mut result = CmdResult::default();

    if update.edits.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    table.begin_edit(&id);
    for edit in update.edits {
        table.edit(edit);
    }

    match table.save_edit() {
        EditOutcome::Saved(record) => {
            result.add_message(CmdMessage::success(format!(
                "{} updated successfully!",
                record.name
            )));
            Ok(result.with_affected_records(vec![record]))
        }
        EditOutcome::Rejected(errors) => {
            table.cancel_edit();
            result.add_message(CmdMessage::error(format!(
                "Record not updated: {} field(s) need attention.",
                errors.len()
            )));
            Ok(result.with_validation(errors))
        }
        EditOutcome::NotEditing => {
            result.add_message(CmdMessage::warning(format!("Record {} disappeared.", id)));
            Ok(result)
        }
    }
}
