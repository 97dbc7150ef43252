use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::store::{RecordStore, StorageBackend};
use crate::table::TablePresenter;

use super::helpers::resolve_id;

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, selector: &str) -> Result<CmdResult> {
    let id = resolve_id(store, selector)?;
    let mut table = TablePresenter::new(store);
    let copy = table
        .copy(&id)
        .ok_or_else(|| RosterError::RecordNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Row copied successfully!"));
    Ok(result.with_affected_records(vec![copy]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::COPY_SUFFIX;
    use crate::store::memory::fixtures::records;
    use crate::store::memory::MemBackend;

    #[test]
    fn copy_appends_suffixed_clone() {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(records(2));
        let result = run(&mut store, "id-1").unwrap();

        let copy = &result.affected_records[0];
        assert_eq!(copy.name, format!("Person 1{}", COPY_SUFFIX));
        assert_ne!(copy.id.as_str(), "id-1");
        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[2].id, copy.id);
        assert_eq!(result.messages[0].content, "Row copied successfully!");
    }

    #[test]
    fn copy_of_unknown_record_fails() {
        let mut store = RecordStore::new(MemBackend::new());
        assert!(matches!(
            run(&mut store, "nope-nope"),
            Err(RosterError::RecordNotFound(_))
        ));
    }
}
