//! # Storage Layer
//!
//! [`RecordStore`] owns the ordered collection of records and is the only
//! writer to it. Every mutation is a two-step "mutate, then persist": the
//! in-memory vector changes first, then the whole collection is handed to the
//! [`StorageBackend`].
//!
//! ## Backends
//!
//! - [`fs::FsBackend`]: one JSON file per storage key in the data directory
//! - [`memory::MemBackend`]: in-memory snapshot for testing
//!
//! ## Storage Format
//!
//! ```text
//! {data_dir}/
//! ├── form-data-storage.json   # {"formData": [Record, ...]}
//! └── config.json              # RosterConfig
//! ```
//!
//! Dates are stored as RFC 3339 strings and parsed back on load.
//!
//! ## Degraded Mode
//!
//! Storage is best-effort. If the snapshot cannot be read at startup or a
//! save fails later, the store keeps working in memory and stops writing, so a
//! corrupt file is never clobbered by a partial view of the data.

use crate::error::{Result, RosterError};
use crate::model::{Record, RecordId};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

pub mod fs;
pub mod memory;

/// Default storage key, the file stem of the persisted snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "form-data-storage";

/// Abstract interface for raw snapshot I/O.
pub trait StorageBackend {
    /// Load the persisted collection. `Ok(None)` when nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<Record>>>;

    /// Replace the persisted collection with `records`.
    fn save(&self, records: &[Record]) -> Result<()>;

    /// Human-readable location, for messages and logs.
    fn location(&self) -> String;
}

/// Persisted envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot<'a> {
    #[serde(rename = "formData")]
    pub form_data: Cow<'a, [Record]>,
}

pub fn encode_snapshot(records: &[Record]) -> Result<String> {
    let snapshot = Snapshot {
        form_data: Cow::Borrowed(records),
    };
    serde_json::to_string_pretty(&snapshot).map_err(RosterError::Serialization)
}

pub fn decode_snapshot(raw: &str) -> Result<Vec<Record>> {
    let snapshot: Snapshot<'static> =
        serde_json::from_str(raw).map_err(RosterError::Serialization)?;
    Ok(snapshot.form_data.into_owned())
}

pub struct RecordStore<B: StorageBackend> {
    records: Vec<Record>,
    backend: B,
    persistent: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    /// An empty store that has not read from `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            records: Vec::new(),
            backend,
            persistent: true,
        }
    }

    /// Rehydrates from `backend`, falling back to `seed` when nothing is stored.
    ///
    /// A load failure leaves the store in memory-only mode. The seed is still
    /// applied so the session has data to work with.
    pub fn open<F>(backend: B, seed: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Vec<Record>>,
    {
        let mut store = Self::new(backend);
        match store.backend.load() {
            Ok(Some(records)) if !records.is_empty() => {
                info!(
                    "loaded {} records from {}",
                    records.len(),
                    store.backend.location()
                );
                store.records = unique_by_id(records);
                return Ok(store);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "could not read {}, continuing in memory only: {}",
                    store.backend.location(),
                    e
                );
                store.persistent = false;
            }
        }

        let seed = seed()?;
        if store.initialize(seed) {
            info!("initialized store with {} seed records", store.records.len());
        }
        Ok(store)
    }

    /// Sets the collection to `seed` if the store is empty. Returns whether
    /// the seed was applied.
    pub fn initialize(&mut self, seed: Vec<Record>) -> bool {
        if !self.records.is_empty() {
            return false;
        }
        self.records = unique_by_id(seed);
        self.persist();
        true
    }

    /// Appends `record`. Fails without touching the store if its id is taken.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.contains(&record.id) {
            return Err(RosterError::DuplicateId(record.id.to_string()));
        }
        debug!("add record {}", record.id);
        self.records.push(record);
        self.persist();
        Ok(())
    }

    /// Removes the record with `id`. Returns false if there was none.
    pub fn delete(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        if self.records.len() == before {
            return false;
        }
        debug!("delete record {}", id);
        self.persist();
        true
    }

    /// Replaces the record with `id` in place, keeping its id and position.
    /// Returns false if there was none.
    pub fn update(&mut self, id: &RecordId, mut replacement: Record) -> bool {
        let Some(slot) = self.records.iter_mut().find(|r| &r.id == id) else {
            return false;
        };
        replacement.id = id.clone();
        *slot = replacement;
        debug!("update record {}", id);
        self.persist();
        true
    }

    /// Appends a copy of `source` under a fresh id and returns it.
    pub fn copy(&mut self, source: &Record) -> Record {
        let mut id = RecordId::generate();
        while self.contains(&id) {
            id = RecordId::generate();
        }
        let copy = source.copy_with_id(id);
        debug!("copy record {} as {}", source.id, copy.id);
        self.records.push(copy.clone());
        self.persist();
        copy
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// False once the store has fallen back to memory-only mode.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        if let Err(e) = self.backend.save(&self.records) {
            warn!(
                "could not write {}, continuing in memory only: {}",
                self.backend.location(),
                e
            );
            self.persistent = false;
        }
    }
}

fn unique_by_id(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id.clone());
            if !fresh {
                warn!("dropping record with duplicate id {}", r.id);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::memory::fixtures::{record, records};
    use super::memory::MemBackend;
    use super::*;

    fn store_with(n: usize) -> RecordStore<MemBackend> {
        let mut store = RecordStore::new(MemBackend::new());
        store.initialize(records(n));
        store
    }

    fn ids(store: &RecordStore<MemBackend>) -> Vec<String> {
        store.all().iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn initialize_only_applies_to_empty_store() {
        let mut store = RecordStore::new(MemBackend::new());
        assert!(store.initialize(records(3)));
        assert!(!store.initialize(records(5)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn open_seeds_empty_storage_with_fresh_ids() {
        let store = RecordStore::open(MemBackend::new(), || {
            Ok(vec![
                record("a", "Ann").copy_with_id(RecordId::generate()),
                record("b", "Ben").copy_with_id(RecordId::generate()),
                record("c", "Cid").copy_with_id(RecordId::generate()),
            ])
        })
        .unwrap();
        assert_eq!(store.len(), 3);
        let unique: HashSet<_> = store.all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn open_prefers_stored_records_over_seed() {
        let backend = MemBackend::with_records(&records(2));
        let store = RecordStore::open(backend, || Ok(records(5))).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn add_appends_and_rejects_duplicates() {
        let mut store = store_with(2);
        store.add(record("id-9", "Zed")).unwrap();
        assert_eq!(ids(&store), vec!["id-1", "id-2", "id-9"]);

        let err = store.add(record("id-1", "Dup")).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateId(id) if id == "id-1"));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&RecordId::from("id-1")).unwrap().name, "Person 1");
    }

    #[test]
    fn delete_preserves_order_of_the_rest() {
        let mut store = store_with(4);
        assert!(store.delete(&RecordId::from("id-2")));
        assert_eq!(ids(&store), vec!["id-1", "id-3", "id-4"]);
        assert!(!store.delete(&RecordId::from("missing")));
    }

    #[test]
    fn update_replaces_in_place_and_keeps_id() {
        let mut store = store_with(3);
        let before = store.all().to_vec();
        let mut replacement = before[1].clone();
        replacement.name = "Bob".into();
        replacement.id = RecordId::from("ignored");

        assert!(store.update(&RecordId::from("id-2"), replacement));
        let after = store.all();
        assert_eq!(after[1].id.as_str(), "id-2");
        assert_eq!(after[1].name, "Bob");
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn update_of_missing_id_is_a_no_op() {
        let mut store = store_with(2);
        let saves = store.backend().save_count();
        assert!(!store.update(&RecordId::from("nope"), record("x", "X")));
        assert_eq!(store.backend().save_count(), saves);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn copy_appends_marked_record_and_keeps_original() {
        let mut store = store_with(2);
        let source = store.all()[0].clone();
        let copy = store.copy(&source);

        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[0], source);
        assert_eq!(store.all()[2], copy);
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.name, format!("{} (Copy)", source.name));
        assert_eq!(
            Record {
                id: source.id.clone(),
                name: source.name.clone(),
                ..copy
            },
            source
        );
    }

    #[test]
    fn ids_stay_unique_across_mixed_operations() {
        let mut store = store_with(3);
        let first = store.all()[0].clone();
        store.copy(&first);
        store.copy(&first);
        store.delete(&RecordId::from("id-2"));
        store.add(record("id-7", "Seven")).unwrap();
        let copy = store.all()[2].clone();
        store.copy(&copy);

        let unique: HashSet<_> = store.all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(unique.len(), store.len());
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut store = store_with(2);
        store.add(record("id-3", "Three")).unwrap();
        store.delete(&RecordId::from("id-1"));

        let persisted = store.backend().load().unwrap().unwrap();
        assert_eq!(persisted, store.all());
        assert_eq!(store.backend().save_count(), 3);
    }

    #[test]
    fn snapshot_round_trip_preserves_records_and_dates() {
        let original = records(4);
        let raw = encode_snapshot(&original).unwrap();
        assert!(raw.contains("\"formData\""));
        assert!(raw.contains("\"dateOfBirth\": \"1990-01-01T00:00:00Z\""));
        let decoded = decode_snapshot(&raw).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn failed_save_degrades_to_memory_only() {
        let mut store = store_with(1);
        store.backend().set_simulate_write_error(true);
        store.add(record("id-2", "Two")).unwrap();
        assert!(!store.is_persistent());
        assert_eq!(store.len(), 2);

        store.backend().set_simulate_write_error(false);
        store.add(record("id-3", "Three")).unwrap();
        let persisted = store.backend().load().unwrap().unwrap();
        assert_eq!(persisted.len(), 1);
    }

    #[test]
    fn unreadable_storage_is_not_overwritten() {
        let backend = MemBackend::with_raw("{ not json");
        let store = RecordStore::open(backend, || Ok(records(2))).unwrap();
        assert!(!store.is_persistent());
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().raw().as_deref(), Some("{ not json"));
    }

    #[test]
    fn duplicate_ids_in_storage_are_dropped() {
        let mut dup = records(2);
        dup.push(record("id-1", "Again"));
        let store = RecordStore::open(MemBackend::with_records(&dup), || Ok(vec![])).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].name, "Person 1");
    }
}
