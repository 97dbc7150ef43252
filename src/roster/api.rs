//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for roster
//! operations, whatever the UI.
//!
//! The API dispatches to `commands/*.rs` and returns `Result<CmdResult>`. It
//! holds no business logic and performs no I/O beyond what the store backend
//! does: no stdout, no formatting.
//!
//! `RosterApi<B: StorageBackend>` is generic over persistence:
//! - Production: `RosterApi<FsBackend>`
//! - Testing: `RosterApi<MemBackend>`
//!
//! [`config`] and [`init`] are free functions over [`RosterPaths`]: they touch
//! only the data directory and must run without opening (and seeding) the store.

use crate::commands;
use crate::draft::Draft;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use crate::table::Confirm;
use crate::view::ViewQuery;

pub struct RosterApi<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> RosterApi<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn add_record(&mut self, draft: Draft) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, draft)
    }

    pub fn list_records(&self, query: ViewQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn show_records<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        commands::show::run(&self.store, selectors)
    }

    pub fn update_record(&mut self, update: commands::RecordUpdate) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, update)
    }

    pub fn copy_record(&mut self, selector: &str) -> Result<commands::CmdResult> {
        commands::copy::run(&mut self.store, selector)
    }

    pub fn delete_records<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        confirm: &mut dyn Confirm,
    ) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, selectors, confirm)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

pub fn config(paths: &RosterPaths, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(paths, action)
}

pub fn init(paths: &RosterPaths) -> Result<commands::CmdResult> {
    commands::init::run(paths)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, RecordUpdate, RosterPaths};
