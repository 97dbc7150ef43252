use crate::commands::{CmdMessage, CmdResult, RosterPaths};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use std::fs;

pub fn run(paths: &RosterPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.data_dir).map_err(RosterError::Io)?;

    let config = RosterConfig::load(&paths.data_dir)?;
    config.save(&paths.data_dir)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized roster in {}",
        paths.data_dir.display()
    )));
    Ok(result.with_config(config))
}
