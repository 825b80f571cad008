use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::calendar::parse_date_param;
use crate::error::MenuError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Menu PDF, or a text file holding already-extracted PDF text.
    #[serde(default = "default_menu_path")]
    pub path: PathBuf,
    /// First Monday of week 1. Falls back to a "Week Commencing" line in
    /// the menu when unset.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            path: default_menu_path(),
            start_date: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_menu_path() -> PathBuf {
    PathBuf::from("menu.pdf")
}

/// Reads `path` as TOML, or uses defaults when the file does not exist,
/// then applies environment overrides.
pub fn load(path: &str) -> Result<Config, MenuError> {
    let mut config = if Path::new(path).exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MenuError::Config(format!("{path}: {e}")))?
    } else {
        warn!("config file {path} not found, using defaults");
        Config::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    info!(
        menu = %config.menu.path.display(),
        bind = %config.server.bind,
        "configuration loaded"
    );
    Ok(config)
}

impl Config {
    /// Overrides from `MENU_PATH`, `MENU_START_DATE` and `BIND_ADDR`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), MenuError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("MENU_PATH").filter(|v| !v.is_empty()) {
            self.menu.path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("MENU_START_DATE").filter(|v| !v.is_empty()) {
            let date = parse_date_param(&raw)
                .map_err(|_| MenuError::Config(format!("MENU_START_DATE is not a date: {raw}")))?;
            self.menu.start_date = Some(date);
        }
        if let Some(bind) = lookup("BIND_ADDR").filter(|v| !v.is_empty()) {
            self.server.bind = bind;
        }
        Ok(())
    }
}
