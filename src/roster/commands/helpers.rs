use crate::error::{Result, RosterError};
use crate::model::RecordId;
use crate::store::{RecordStore, StorageBackend};

/// Shortest id prefix accepted as a selector.
pub const MIN_PREFIX_LEN: usize = 4;

/// Resolves a full id or an unambiguous id prefix to a stored record id.
pub fn resolve_id<B: StorageBackend>(store: &RecordStore<B>, selector: &str) -> Result<RecordId> {
    let selector = selector.trim();
    let exact = RecordId::from(selector);
    if store.contains(&exact) {
        return Ok(exact);
    }
    if selector.len() < MIN_PREFIX_LEN {
        return Err(RosterError::Api(format!(
            "No record with id {} (prefixes need at least {} characters)",
            selector, MIN_PREFIX_LEN
        )));
    }

    let mut matches = store
        .all()
        .iter()
        .filter(|r| r.id.as_str().starts_with(selector));
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id.clone()),
        (Some(_), Some(_)) => Err(RosterError::Api(format!(
            "Id prefix {} matches more than one record",
            selector
        ))),
        (None, _) => Err(RosterError::RecordNotFound(selector.to_string())),
    }
}

pub fn resolve_ids<B: StorageBackend, I: AsRef<str>>(
    store: &RecordStore<B>,
    selectors: &[I],
) -> Result<Vec<RecordId>> {
    selectors
        .iter()
        .map(|s| resolve_id(store, s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::record;
    use crate::store::memory::MemBackend;

    fn store() -> RecordStore<MemBackend> {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(vec![
            record("abcd-1111", "A"),
            record("abcd-2222", "B"),
            record("ef01-3333", "C"),
        ]);
        store
    }

    #[test]
    fn resolves_full_ids_and_unique_prefixes() {
        let store = store();
        assert_eq!(resolve_id(&store, "abcd-2222").unwrap().as_str(), "abcd-2222");
        assert_eq!(resolve_id(&store, "ef01").unwrap().as_str(), "ef01-3333");
    }

    #[test]
    fn rejects_ambiguous_short_and_unknown_selectors() {
        let store = store();
        assert!(matches!(resolve_id(&store, "abcd"), Err(RosterError::Api(_))));
        assert!(matches!(resolve_id(&store, "ef"), Err(RosterError::Api(_))));
        assert!(matches!(
            resolve_id(&store, "zzzz"),
            Err(RosterError::RecordNotFound(_))
        ));
    }

    #[test]
    fn resolve_ids_fails_on_first_bad_selector() {
        let store = store();
        assert_eq!(resolve_ids(&store, &["abcd-1111", "ef01"]).unwrap().len(), 2);
        assert!(resolve_ids(&store, &["abcd-1111", "nope-nope"]).is_err());
    }
}
