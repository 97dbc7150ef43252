use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use crate::table::{Confirm, DeleteOutcome, TablePresenter};

use super::helpers::resolve_ids;

/// Deletes each selected record, asking `confirm` once per record.
pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &mut RecordStore<B>,
    selectors: &[I],
    confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    let ids = resolve_ids(store, selectors)?;
    let mut table = TablePresenter::new(store);
    let mut result = CmdResult::default();
    let mut deleted = Vec::new();

    for id in ids {
        match table.delete(&id, confirm) {
            DeleteOutcome::Deleted(record) => {
                result.add_message(CmdMessage::success(format!(
                    "User deleted successfully! {}",
                    record.id
                )));
                deleted.push(record);
            }
            DeleteOutcome::Cancelled => {
                result.add_message(CmdMessage::info(format!("Kept {}", id)));
            }
            DeleteOutcome::NotFound => {
                result.add_message(CmdMessage::warning(format!("Record {} already gone", id)));
            }
        }
    }

    Ok(result.with_affected_records(deleted))
}
