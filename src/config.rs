use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::activity::SummaryOptions;
use crate::activity::model::CurrentUser;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryOptions,
    pub current_user: CurrentUser,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("unable to parse config file {}", path.display()))
    }
}
