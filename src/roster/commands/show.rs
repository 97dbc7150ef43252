use crate::commands::CmdResult;
use crate::error::{Result, RosterError};
use crate::store::{RecordStore, StorageBackend};

use super::helpers::resolve_ids;

pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &RecordStore<B>,
    selectors: &[I],
) -> Result<CmdResult> {
    let ids = resolve_ids(store, selectors)?;
    let records = ids
        .iter()
        .map(|id| {
            store
                .get(id)
                .cloned()
                .ok_or_else(|| RosterError::RecordNotFound(id.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::records;
    use crate::store::memory::MemBackend;

    #[test]
    fn shows_records_in_selector_order() {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(records(3));
        let result = run(&store, &["id-3", "id-1"]).unwrap();
        let names: Vec<&str> = result.listed_records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Person 3", "Person 1"]);
    }
}
