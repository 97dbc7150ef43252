use super::{decode_snapshot, encode_snapshot, StorageBackend};
use crate::error::{Result, RosterError};
use crate::model::Record;
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Keeps the serialized snapshot rather than the records themselves, so tests
/// exercise the same encoding as the file backend. Uses `RefCell` because the
/// store is single-threaded and the trait takes `&self`.
#[derive(Default)]
pub struct MemBackend {
    raw: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `records`, as if written by an earlier session.
    pub fn with_records(records: &[Record]) -> Self {
        let backend = Self::new();
        *backend.raw.borrow_mut() = encode_snapshot(records).ok();
        backend
    }

    /// A backend holding arbitrary stored text.
    pub fn with_raw(raw: &str) -> Self {
        let backend = Self::new();
        *backend.raw.borrow_mut() = Some(raw.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<Vec<Record>>> {
        match self.raw.borrow().as_deref() {
            Some(raw) => decode_snapshot(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        *self.raw.borrow_mut() = Some(encode_snapshot(records)?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory://form-data-storage".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Attachment, Gender, Record, RecordId, Status};
    use chrono::{Duration, TimeZone, Utc};

    /// A valid record with the given id and name.
    pub fn record(id: &str, name: &str) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            age: 30,
            gender: Gender::Female,
            status: Status::Single,
            date_of_birth: Some(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()),
            attachment: Some(Attachment::new("resume.pdf", 2048, "/tmp/resume.pdf")),
            terms_accepted: true,
            skills: vec!["rust".to_string()],
        }
    }

    /// `n` records with ids `id-1..=id-n`, names `Person 1..`, ascending ages
    /// and birth dates, rotating genders, and distinct skills.
    pub fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let mut r = record(&format!("id-{}", i), &format!("Person {}", i));
                r.age = 20 + i as u32;
                r.gender = Gender::ALL[(i - 1) % Gender::ALL.len()];
                r.status = Status::ALL[(i - 1) % Status::ALL.len()];
                r.date_of_birth = r.date_of_birth.map(|d| d + Duration::days(i as i64 - 1));
                r.skills = vec![format!("skill-{}", i)];
                r
            })
            .collect()
    }
}
