use crate::api::RosterApi;
use crate::commands::CmdMessage;
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::Record;
use crate::seed::{embedded_seed, load_seed_file};
use crate::store::fs::FsBackend;
use crate::store::{RecordStore, StorageBackend};
use directories::ProjectDirs;
use log::warn;
use std::path::PathBuf;

/// Overrides the platform data directory.
pub const HOME_ENV: &str = "ROSTER_HOME";

pub struct RosterContext {
    pub api: RosterApi<FsBackend>,
    pub config: RosterConfig,
    /// Notices gathered while opening, shown before the command output.
    pub notices: Vec<CmdMessage>,
}

/// `$ROSTER_HOME` if set and non-empty, else the platform data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            RosterError::Config(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

/// Loads config and opens (seeding if empty) the store in `data_dir`.
pub fn initialize_at(data_dir: PathBuf) -> Result<RosterContext> {
    let mut notices = Vec::new();
    let config = match RosterConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring unreadable config: {}", e);
            notices.push(CmdMessage::warning(format!(
                "Config could not be read, using defaults ({})",
                e
            )));
            RosterConfig::default()
        }
    };

    let backend = FsBackend::new(&data_dir, config.storage_key.clone());
    let store = RecordStore::open(backend, || seed_records(&config))?;
    if !store.is_persistent() {
        notices.push(CmdMessage::warning(format!(
            "Storage at {} is unavailable; changes will not be saved.",
            store.backend().location()
        )));
    }

    let api = RosterApi::new(store);
    Ok(RosterContext {
        api,
        config,
        notices,
    })
}

fn seed_records(config: &RosterConfig) -> Result<Vec<Record>> {
    if !config.seed_on_empty {
        return Ok(Vec::new());
    }
    match &config.seed_file {
        Some(path) => load_seed_file(path),
        None => embedded_seed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{self, ConfigAction, RosterPaths};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fresh_directory_gets_seeded() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize_at(temp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.api.store().len(), 12);
        assert!(ctx.notices.is_empty());
    }

    #[test]
    fn seeding_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let mut config = RosterConfig::default();
        config.seed_on_empty = false;
        config.save(temp.path()).unwrap();

        let ctx = initialize_at(temp.path().to_path_buf()).unwrap();
        assert!(ctx.api.store().is_empty());
    }

    #[test]
    fn corrupt_storage_degrades_with_notice() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("form-data-storage.json");
        fs::write(&path, "{not json").unwrap();

        let ctx = initialize_at(temp.path().to_path_buf()).unwrap();
        assert!(!ctx.api.store().is_persistent());
        assert_eq!(ctx.notices.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn custom_storage_key_selects_file() {
        let temp = TempDir::new().unwrap();
        let mut config = RosterConfig::default();
        config.storage_key = "team".to_string();
        config.save(temp.path()).unwrap();

        initialize_at(temp.path().to_path_buf()).unwrap();
        assert!(temp.path().join("team.json").exists());
    }

    #[test]
    fn config_set_on_fresh_directory_does_not_seed() {
        let temp = TempDir::new().unwrap();
        let paths = RosterPaths {
            data_dir: temp.path().join("home"),
        };
        api::config(
            &paths,
            ConfigAction::Set("seed-on-empty".into(), "false".into()),
        )
        .unwrap();
        assert!(!paths.data_dir.join("form-data-storage.json").exists());

        let ctx = initialize_at(paths.data_dir.clone()).unwrap();
        assert!(ctx.api.store().is_empty());
        drop(ctx);

        let ctx = initialize_at(paths.data_dir.clone()).unwrap();
        assert!(ctx.api.store().is_empty());
        assert!(!ctx.config.seed_on_empty);
    }

    #[test]
    fn init_command_leaves_store_unopened() {
        let temp = TempDir::new().unwrap();
        let paths = RosterPaths {
            data_dir: temp.path().to_path_buf(),
        };
        api::init(&paths).unwrap();
        assert!(paths.data_dir.join("config.json").exists());
        assert!(!paths.data_dir.join("form-data-storage.json").exists());
    }
}
