use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::store::{RecordStore, StorageBackend};
use crate::view::{derive_view, ViewQuery};

/// Read-only: runs the view pipeline over the stored records.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, query: ViewQuery) -> Result<CmdResult> {
    if query.page_size == 0 {
        return Err(RosterError::Api(
            "Page size must be greater than 0".to_string(),
        ));
    }

    let page = derive_view(store.all(), &query).cloned();
    let mut result = CmdResult::default();

    if page.rows.is_empty() && page.total > 0 {
        result.add_message(CmdMessage::info(format!(
            "Page {} is past the end ({} page(s) of results).",
            page.page_index + 1,
            page.page_count()
        )));
    }
    Ok(result.with_page(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::records;
    use crate::store::memory::MemBackend;
    use crate::view::{SortDirective, SortKey};

    fn store(n: usize) -> RecordStore<MemBackend> {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(records(n));
        store
    }

    #[test]
    fn lists_requested_page() {
        let store = store(12);
        let query = ViewQuery {
            page_index: 1,
            ..ViewQuery::default()
        };
        let page = run(&store, query).unwrap().page.unwrap();
        let ids: Vec<&str> = page.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["id-6", "id-7", "id-8", "id-9", "id-10"]);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn search_and_sort_apply() {
        let store = store(12);
        let query = ViewQuery {
            sort: Some(SortDirective::descending(SortKey::Age)),
            search: "SKILL-1".into(),
            ..ViewQuery::default()
        };
        let page = run(&store, query).unwrap().page.unwrap();
        let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Person 12", "Person 11", "Person 10", "Person 1"]);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let store = store(3);
        let query = ViewQuery {
            page_size: 0,
            ..ViewQuery::default()
        };
        assert!(run(&store, query).is_err());
    }

    #[test]
    fn notes_pages_past_the_end() {
        let store = store(3);
        let query = ViewQuery {
            page_index: 3,
            ..ViewQuery::default()
        };
        let result = run(&store, query).unwrap();
        assert!(result.page.unwrap().rows.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
