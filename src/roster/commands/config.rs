use crate::commands::{CmdMessage, CmdResult, RosterPaths};
use crate::config::{RosterConfig, CONFIG_KEYS};
use crate::error::{Result, RosterError};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &RosterPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RosterConfig::load(&paths.data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            for key in CONFIG_KEYS {
                if let Some(value) = config.get(key) {
                    result.add_message(CmdMessage::info(format!("{}: {}", key, value)));
                }
            }
        }
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| RosterError::Config(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{}: {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.data_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value.trim())));
        }
    }

    Ok(result.with_config(config))
}
