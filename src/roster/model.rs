use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to the name of a copied record.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Opaque record identifier.
///
/// Freshly minted ids are UUID v4 strings (see [`RecordId::generate`]), but any
/// string is accepted so that stored data and fixtures round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Married,
    Single,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Married, Status::Single];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Married => "married",
            Status::Single => "single",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "married" => Ok(Status::Married),
            "single" => Ok(Status::Single),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to an uploaded file. Only the name, size and location are kept;
/// the bytes themselves never enter the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
    pub location: String,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, size_bytes: u64, location: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub status: Status,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub attachment: Option<Attachment>,
    pub terms_accepted: bool,
    pub skills: Vec<String>,
}

impl Record {
    /// Builds the record a copy action appends: same fields, new id, marked name.
    pub fn copy_with_id(&self, id: RecordId) -> Record {
        Record {
            id,
            name: format!("{}{}", self.name, COPY_SUFFIX),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Record {
        Record {
            id: RecordId::from("id-1"),
            name: "Alice Smith".into(),
            age: 30,
            gender: Gender::Female,
            status: Status::Single,
            date_of_birth: Some(Utc.with_ymd_and_hms(1994, 5, 17, 0, 0, 0).unwrap()),
            attachment: Some(Attachment::new("cv.pdf", 1024, "/tmp/cv.pdf")),
            terms_accepted: true,
            skills: vec!["rust".into()],
        }
    }

    #[test]
    fn serializes_with_camel_case_keys_and_iso_dates() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dateOfBirth"], "1994-05-17T00:00:00Z");
        assert_eq!(json["termsAccepted"], true);
        assert_eq!(json["gender"], "female");
        assert_eq!(json["attachment"]["sizeBytes"], 1024);
    }

    #[test]
    fn copy_changes_only_id_and_name() {
        let original = sample();
        let copy = original.copy_with_id(RecordId::from("id-2"));
        assert_eq!(copy.id.as_str(), "id-2");
        assert_eq!(copy.name, "Alice Smith (Copy)");
        assert_eq!(copy.skills, original.skills);
        assert_eq!(copy.date_of_birth, original.date_of_birth);
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" single ".parse::<Status>().unwrap(), Status::Single);
        assert!("unknown".parse::<Gender>().is_err());
    }
}
