use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fs_util::read_json_opt;

pub const DEFAULT_CATALOG_URL: &str =
    "http://api.steampowered.com/ISteamApps/GetAppList/v0002/?format=json";

const SETTINGS_FILE: &str = "settings.json";
const QUICK_CACHE_FILE: &str = "quick_appids.json";
const FULL_CACHE_FILE: &str = "appids.json";
const LAST_LAUNCH_FILE: &str = "last.json";

/// Order in which discovered directories are listed, by modification time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Optional overrides read from `settings.json` in the config directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog_url: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub quit_key: Option<char>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub steam_root: PathBuf,
    pub config_dir: PathBuf,
    pub catalog_url: String,
    pub sort_order: SortOrder,
    pub quit_key: char,
}

impl Config {
    /// Builds the config from `HOME` / `STEAM_HOME` and the optional settings file.
    pub fn load() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let steam_root = std::env::var_os("STEAM_HOME").map(PathBuf::from);
        Self::from_parts(&home, steam_root)
    }

    pub fn from_parts(home: &Path, steam_root: Option<PathBuf>) -> Result<Self> {
        let steam_root = steam_root.unwrap_or_else(|| home.join(".steam/root"));
        let config_dir = home.join(".config").join("ncps");
        let settings: Settings = read_json_opt(&config_dir.join(SETTINGS_FILE))
            .context("load settings")?
            .unwrap_or_default();
        Ok(Self::with_settings(steam_root, config_dir, settings))
    }

    pub fn with_settings(steam_root: PathBuf, config_dir: PathBuf, settings: Settings) -> Self {
        Self {
            steam_root,
            config_dir,
            catalog_url: settings
                .catalog_url
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            sort_order: settings.sort_order.unwrap_or_default(),
            quit_key: settings.quit_key.unwrap_or('q'),
        }
    }

    pub fn steamapps_dir(&self) -> PathBuf {
        self.steam_root.join("steamapps")
    }

    pub fn quick_cache_path(&self) -> PathBuf {
        self.config_dir.join(QUICK_CACHE_FILE)
    }

    pub fn full_cache_path(&self) -> PathBuf {
        self.config_dir.join(FULL_CACHE_FILE)
    }

    pub fn last_launch_path(&self) -> PathBuf {
        self.config_dir.join(LAST_LAUNCH_FILE)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
