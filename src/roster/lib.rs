//! # Roster Architecture
//!
//! Roster is a **UI-agnostic record library**: a validated entry form and a
//! searchable, sortable, paginated table over a persisted collection of person
//! records. The command-line binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolves id selectors, drives the form and table         │
//! │  - Reports outcomes as CmdResult messages                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Form / Table presenters (form.rs, table.rs)                │
//! │  - Draft editing, validation, submit state machine          │
//! │  - View state (sort, search, page), row edit/copy/delete    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore over a StorageBackend trait                  │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr. Confirmation before
//! deleting goes through the [`table::Confirm`] trait so the CLI can prompt and
//! tests can script the answer.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command
//! - [`form`]: Entry form controller
//! - [`table`]: Table presenter and the delete confirmation seam
//! - [`view`]: Sort, filter and paginate pipeline
//! - [`validation`]: Field rules and error taxonomy
//! - [`draft`]: Partially filled records and field edits
//! - [`store`]: Record store and storage backends
//! - [`model`]: Core data types (`Record`, `Gender`, `Status`, `Attachment`)
//! - [`seed`]: Bundled sample dataset
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod form;
pub mod id;
pub mod init;
pub mod model;
pub mod seed;
pub mod store;
pub mod table;
pub mod validation;
pub mod view;
