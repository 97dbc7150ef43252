use crate::config::RosterConfig;
use crate::draft::FieldEdit;
use crate::model::Record;
use crate::validation::ValidationErrors;
use crate::view::Page;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod copy;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod list;
pub mod show;
pub mod update;

#[derive(Debug, Clone)]
pub struct RosterPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub page: Option<Page<Record>>,
    pub validation: Option<ValidationErrors>,
    pub config: Option<RosterConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_page(mut self, page: Page<Record>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_validation(mut self, errors: ValidationErrors) -> Self {
        self.validation = Some(errors);
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// A set of field edits to apply to one stored record.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    /// Full id or unambiguous id prefix.
    pub selector: String,
    pub edits: Vec<FieldEdit>,
}

impl RecordUpdate {
    pub fn new(selector: impl Into<String>, edits: Vec<FieldEdit>) -> Self {
        Self {
            selector: selector.into(),
            edits,
        }
    }
}
