use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version)]
#[command(about = "Validated record form and searchable table", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new record through the entry form
    Add(FieldArgs),

    /// Show the record table (default)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show every field of one or more records
    Show {
        /// Record ids or id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Edit fields of a stored record
    Update {
        /// Record id or id prefix
        id: String,

        #[command(flatten)]
        fields: FieldArgs,

        /// Remove a skill (repeatable)
        #[arg(long = "remove-skill", value_name = "SKILL")]
        remove_skills: Vec<String>,

        /// Withdraw terms acceptance
        #[arg(long, conflicts_with = "accept_terms")]
        decline_terms: bool,

        /// Drop the attached file
        #[arg(long, conflicts_with = "attachment")]
        clear_attachment: bool,
    },

    /// Duplicate a record under a new id
    #[command(alias = "cp")]
    Copy {
        /// Record id or id prefix
        id: String,
    },

    /// Delete records (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Record ids or id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, storage-key, seed-on-empty, seed-file)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Create the data directory and config file
    Init,
}

/// Record fields shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<String>,

    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,

    /// married or single
    #[arg(long)]
    pub status: Option<String>,

    /// Date of birth (YYYY-MM-DD, DD/MM/YYYY or RFC 3339)
    #[arg(long)]
    pub dob: Option<String>,

    /// File to attach (at most 2 MB)
    #[arg(long, value_name = "PATH")]
    pub attachment: Option<PathBuf>,

    /// Add a skill (repeatable)
    #[arg(long = "skill", value_name = "SKILL")]
    pub skills: Vec<String>,

    /// Accept the terms and conditions
    #[arg(long)]
    pub accept_terms: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Case-insensitive search over name, gender and skills
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort column: name, age, gender, status or dob
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=1_000_000))]
    pub page: u64,

    /// Rows per page (5, 10 or 25); defaults to the configured page size
    #[arg(long, value_name = "N")]
    pub per_page: Option<usize>,
}

impl ListArgs {
    /// What a bare `roster` shows.
    pub fn default_page() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }
}
