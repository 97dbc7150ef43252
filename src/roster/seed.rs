//! Seed dataset used to bootstrap an empty store.
//!
//! Seed rows carry no id and keep the date of birth as text; each row gets a
//! freshly minted id and a parsed date before it reaches the store.

use crate::error::{Result, RosterError};
use crate::model::{Attachment, Gender, Record, RecordId, Status};
use crate::validation::parse_date;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const EMBEDDED_SEED: &str = include_str!("fixtures/seed.json");

#[derive(Debug, Deserialize)]
struct SeedRow {
    name: String,
    age: u32,
    gender: Gender,
    status: Status,
    dob: Option<String>,
    #[serde(default)]
    file: Option<Attachment>,
    #[serde(default)]
    terms: bool,
    #[serde(default)]
    skills: Vec<String>,
}

impl SeedRow {
    fn into_record(self, position: usize) -> Result<Record> {
        let date_of_birth = match self.dob.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                RosterError::Seed(format!("row {}: invalid date of birth {:?}", position, raw))
            })?),
            None => None,
        };
        Ok(Record {
            id: RecordId::generate(),
            name: self.name,
            age: self.age,
            gender: self.gender,
            status: self.status,
            date_of_birth,
            attachment: self.file,
            terms_accepted: self.terms,
            skills: self.skills,
        })
    }
}

/// Parses raw seed rows, minting an id for each.
pub fn parse_seed(raw: &str) -> Result<Vec<Record>> {
    let rows: Vec<SeedRow> =
        serde_json::from_str(raw).map_err(|e| RosterError::Seed(e.to_string()))?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i + 1))
        .collect()
}

/// The dataset bundled with the binary.
pub fn embedded_seed() -> Result<Vec<Record>> {
    parse_seed(EMBEDDED_SEED)
}

pub fn load_seed_file(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path).map_err(RosterError::Io)?;
    parse_seed(&raw)
}
