//! In-progress records.
//!
//! A [`Draft`] holds whatever the user has typed so far, in raw form: age and
//! date stay text so that malformed input survives until validation can report
//! it. A draft only becomes a [`Record`] through [`Draft::finalize`].

use crate::model::{Attachment, Gender, Record, RecordId, Status};
use crate::validation::{parse_age, parse_date, present, validate, FieldKey, ValidationErrors};
use chrono::SecondsFormat;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub date_of_birth: Option<String>,
    pub attachment: Option<Attachment>,
    pub terms_accepted: Option<bool>,
    pub skills: Vec<String>,
}

/// A single user edit to a draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Age(String),
    Gender(String),
    Status(String),
    DateOfBirth(String),
    Attachment(Option<Attachment>),
    Terms(bool),
    AddSkill(String),
    RemoveSkill(String),
    Skills(Vec<String>),
}

impl FieldEdit {
    /// The field this edit touches.
    pub fn key(&self) -> FieldKey {
        match self {
            FieldEdit::Name(_) => FieldKey::Name,
            FieldEdit::Age(_) => FieldKey::Age,
            FieldEdit::Gender(_) => FieldKey::Gender,
            FieldEdit::Status(_) => FieldKey::Status,
            FieldEdit::DateOfBirth(_) => FieldKey::DateOfBirth,
            FieldEdit::Attachment(_) => FieldKey::Attachment,
            FieldEdit::Terms(_) => FieldKey::Terms,
            FieldEdit::AddSkill(_) | FieldEdit::RemoveSkill(_) | FieldEdit::Skills(_) => {
                FieldKey::Skills
            }
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills a draft from a stored record, for row editing.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: Some(record.name.clone()),
            age: Some(record.age.to_string()),
            gender: Some(record.gender.to_string()),
            status: Some(record.status.to_string()),
            date_of_birth: record
                .date_of_birth
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
            attachment: record.attachment.clone(),
            terms_accepted: Some(record.terms_accepted),
            skills: record.skills.clone(),
        }
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(v) => self.name = Some(v),
            FieldEdit::Age(v) => self.age = Some(v),
            FieldEdit::Gender(v) => self.gender = Some(v),
            FieldEdit::Status(v) => self.status = Some(v),
            FieldEdit::DateOfBirth(v) => self.date_of_birth = Some(v),
            FieldEdit::Attachment(v) => self.attachment = v,
            FieldEdit::Terms(v) => self.terms_accepted = Some(v),
            FieldEdit::AddSkill(skill) => {
                if !self.skills.contains(&skill) {
                    self.skills.push(skill);
                }
            }
            FieldEdit::RemoveSkill(skill) => self.skills.retain(|s| s != &skill),
            FieldEdit::Skills(skills) => self.skills = skills,
        }
    }

    pub fn is_blank(&self) -> bool {
        self == &Draft::default()
    }

    /// Trimmed, non-blank skill tags with duplicates removed, in entry order.
    pub fn clean_skills(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for skill in self.skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !out.iter().any(|s| s == skill) {
                out.push(skill.to_string());
            }
        }
        out
    }

    /// Validates the draft and, if it passes, turns it into a record with `id`.
    pub fn finalize(&self, id: RecordId) -> Result<Record, ValidationErrors> {
        let errors = validate(self);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.build(id).ok_or(errors)
    }

    fn build(&self, id: RecordId) -> Option<Record> {
        let age = parse_age(present(&self.age)?)?;
        Some(Record {
            id,
            name: present(&self.name)?.to_string(),
            age: u32::try_from(age).ok()?,
            gender: present(&self.gender)?.parse::<Gender>().ok()?,
            status: present(&self.status)?.parse::<Status>().ok()?,
            date_of_birth: Some(parse_date(present(&self.date_of_birth)?)?),
            attachment: self.attachment.clone(),
            terms_accepted: self.terms_accepted == Some(true),
            skills: self.clean_skills(),
        })
    }
}
