//! # Validation Engine
//!
//! The schema is a fixed table mapping each [`FieldKey`] to an ordered list of
//! rules. A rule is a plain function over the [`Draft`] that either passes or
//! returns a [`FieldError`].
//!
//! Every field is checked on every run, so one call reports all problems at
//! once. Within a field the first failing rule wins, which keeps a single
//! message per field (`Age is required` rather than also `Age must be a number`).
//!
//! The engine is pure: same draft in, same errors out, no I/O.

use crate::draft::Draft;
use crate::model::{Gender, Status};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

/// Largest attachment accepted, in bytes.
pub const MAX_ATTACHMENT_BYTES: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Age,
    Gender,
    Status,
    DateOfBirth,
    Attachment,
    Terms,
    Skills,
}

impl FieldKey {
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Name,
        FieldKey::Age,
        FieldKey::Gender,
        FieldKey::Status,
        FieldKey::DateOfBirth,
        FieldKey::Attachment,
        FieldKey::Terms,
        FieldKey::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Age => "age",
            FieldKey::Gender => "gender",
            FieldKey::Status => "status",
            FieldKey::DateOfBirth => "dateOfBirth",
            FieldKey::Attachment => "attachment",
            FieldKey::Terms => "terms",
            FieldKey::Skills => "skills",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Mandatory value missing.
    Required,
    /// Value present but of the wrong shape.
    TypeError,
    /// Value well-formed but outside the allowed bounds.
    RangeError,
    /// Attachment larger than [`MAX_ATTACHMENT_BYTES`].
    SizeError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Field-keyed error map. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldKey, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldError> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<FieldError> {
        self.0.remove(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

type Rule = fn(&Draft) -> Option<FieldError>;

struct FieldSchema {
    key: FieldKey,
    rules: Vec<Rule>,
}

static SCHEMA: Lazy<Vec<FieldSchema>> = Lazy::new(|| {
    vec![
        FieldSchema {
            key: FieldKey::Name,
            rules: vec![name_required],
        },
        FieldSchema {
            key: FieldKey::Age,
            rules: vec![age_required, age_numeric, age_positive],
        },
        FieldSchema {
            key: FieldKey::Gender,
            rules: vec![gender_required, gender_known],
        },
        FieldSchema {
            key: FieldKey::Status,
            rules: vec![status_required, status_known],
        },
        FieldSchema {
            key: FieldKey::DateOfBirth,
            rules: vec![dob_required, dob_parsable],
        },
        FieldSchema {
            key: FieldKey::Attachment,
            rules: vec![attachment_required, attachment_size],
        },
        FieldSchema {
            key: FieldKey::Terms,
            rules: vec![terms_accepted],
        },
        FieldSchema {
            key: FieldKey::Skills,
            rules: vec![skills_non_empty],
        },
    ]
});

/// Runs every field's rules against `draft` and collects the failures.
pub fn validate(draft: &Draft) -> ValidationErrors {
    let mut errors = BTreeMap::new();
    for field in SCHEMA.iter() {
        if let Some(err) = field.rules.iter().find_map(|rule| rule(draft)) {
            errors.insert(field.key, err);
        }
    }
    ValidationErrors(errors)
}

/// Returns the trimmed value, treating blank text as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parses an age, accepting only whole numbers. Numeric forms with no
/// fractional part (`30.0`, `1e3`) count as whole; huge values saturate.
pub(crate) fn parse_age(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(age) = raw.parse::<i64>() {
        return Some(age);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

/// Parses a date of birth.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` and `DD/MM/YYYY`; plain dates are
/// taken as midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn name_required(draft: &Draft) -> Option<FieldError> {
    present(&draft.name)
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "Name is required"))
}

fn age_required(draft: &Draft) -> Option<FieldError> {
    present(&draft.age)
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "Age is required"))
}

fn age_numeric(draft: &Draft) -> Option<FieldError> {
    let raw = present(&draft.age)?;
    if parse_age(raw).is_some() {
        return None;
    }
    let message = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => "Age must be a whole number",
        _ => "Age must be a number",
    };
    Some(FieldError::new(ErrorKind::TypeError, message))
}

fn age_positive(draft: &Draft) -> Option<FieldError> {
    let age = parse_age(present(&draft.age)?)?;
    if age <= 0 {
        Some(FieldError::new(
            ErrorKind::RangeError,
            "Age must be greater than 0",
        ))
    } else if age > i64::from(u32::MAX) {
        Some(FieldError::new(ErrorKind::RangeError, "Age is out of range"))
    } else {
        None
    }
}

fn gender_required(draft: &Draft) -> Option<FieldError> {
    present(&draft.gender)
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "Gender is required"))
}

fn gender_known(draft: &Draft) -> Option<FieldError> {
    let raw = present(&draft.gender)?;
    raw.parse::<Gender>().err().map(|_| {
        FieldError::new(
            ErrorKind::TypeError,
            "Gender must be one of: male, female, other",
        )
    })
}

fn status_required(draft: &Draft) -> Option<FieldError> {
    present(&draft.status)
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "Status is required"))
}

fn status_known(draft: &Draft) -> Option<FieldError> {
    let raw = present(&draft.status)?;
    raw.parse::<Status>().err().map(|_| {
        FieldError::new(
            ErrorKind::TypeError,
            "Status must be one of: married, single",
        )
    })
}

fn dob_required(draft: &Draft) -> Option<FieldError> {
    present(&draft.date_of_birth)
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "Date of birth is required"))
}

fn dob_parsable(draft: &Draft) -> Option<FieldError> {
    let raw = present(&draft.date_of_birth)?;
    parse_date(raw).is_none().then(|| {
        FieldError::new(
            ErrorKind::TypeError,
            "Date of birth must be a valid date",
        )
    })
}

fn attachment_required(draft: &Draft) -> Option<FieldError> {
    draft
        .attachment
        .is_none()
        .then(|| FieldError::new(ErrorKind::Required, "File upload is required"))
}

fn attachment_size(draft: &Draft) -> Option<FieldError> {
    let attachment = draft.attachment.as_ref()?;
    (attachment.size_bytes > MAX_ATTACHMENT_BYTES)
        .then(|| FieldError::new(ErrorKind::SizeError, "File is too large"))
}

fn terms_accepted(draft: &Draft) -> Option<FieldError> {
    (draft.terms_accepted != Some(true))
        .then(|| FieldError::new(ErrorKind::RangeError, "You must accept the terms"))
}

fn skills_non_empty(draft: &Draft) -> Option<FieldError> {
    draft.clean_skills().is_empty().then(|| {
        FieldError::new(ErrorKind::RangeError, "At least one skill is required")
    })
}
