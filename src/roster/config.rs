use crate::error::{Result, RosterError};
use crate::store::DEFAULT_STORAGE_KEY;
use crate::view::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`RosterConfig::get`] and [`RosterConfig::set`].
pub const CONFIG_KEYS: [&str; 4] = ["page-size", "storage-key", "seed-on-empty", "seed-file"];

/// Configuration for roster, stored in `{data_dir}/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    /// Rows per table page (one of 5, 10, 25)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// File stem of the persisted record snapshot
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Load the seed dataset when the store starts empty
    #[serde(default = "default_seed_on_empty")]
    pub seed_on_empty: bool,

    /// Seed dataset to use instead of the bundled one
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_seed_on_empty() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            storage_key: default_storage_key(),
            seed_on_empty: default_seed_on_empty(),
            seed_file: None,
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RosterError::Io)?;
        let config: RosterConfig =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RosterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RosterError::Serialization)?;
        fs::write(config_path, content).map_err(RosterError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-size" => Some(self.page_size.to_string()),
            "storage-key" => Some(self.storage_key.clone()),
            "seed-on-empty" => Some(self.seed_on_empty.to_string()),
            "seed-file" => Some(
                self.seed_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(bundled)".to_string()),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "page-size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| RosterError::Config(format!("Not a number: {}", value)))?;
                if !PAGE_SIZE_OPTIONS.contains(&size) {
                    return Err(RosterError::Config(format!(
                        "page-size must be one of {:?}",
                        PAGE_SIZE_OPTIONS
                    )));
                }
                self.page_size = size;
            }
            "storage-key" => {
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                if !valid {
                    return Err(RosterError::Config(
                        "storage-key may only contain letters, digits, '-' and '_'".to_string(),
                    ));
                }
                self.storage_key = value.to_string();
            }
            "seed-on-empty" => {
                self.seed_on_empty = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(RosterError::Config(format!(
                            "seed-on-empty expects true or false, got {}",
                            value
                        )))
                    }
                };
            }
            "seed-file" => {
                self.seed_file = match value {
                    "" | "none" | "bundled" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            other => {
                return Err(RosterError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
