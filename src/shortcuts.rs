use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;

pub mod vdf;

/// Non-Steam shortcut names keyed by their (unsigned) app id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutIndex(BTreeMap<String, String>);

impl ShortcutIndex {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ShortcutIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every `userdata/<user>/config/shortcuts.vdf` under the steam root.
pub fn find_shortcut_files(steam_root: &Path) -> Vec<PathBuf> {
    let userdata = steam_root.join("userdata");
    let Ok(users) = fs::read_dir(&userdata) else {
        return Vec::new();
    };
    let mut out = users
        .filter_map(|e| e.ok())
        .map(|e| e.path().join("config").join("shortcuts.vdf"))
        .filter(|p| p.is_file())
        .collect::<Vec<_>>();
    out.sort();
    out
}

/// Builds the index from all shortcut files; unreadable files and malformed
/// entries are skipped.
pub fn parse_all_shortcuts(cfg: &Config) -> ShortcutIndex {
    let mut index = BTreeMap::new();
    for path in find_shortcut_files(&cfg.steam_root) {
        match parse_shortcut_file(&path) {
            Ok(entries) => index.extend(entries),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = ?err, "skip shortcuts file")
            }
        }
    }
    ShortcutIndex(index)
}

pub fn parse_shortcut_file(path: &Path) -> Result<Vec<(String, String)>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    parse_shortcuts(&bytes)
}

pub fn parse_shortcuts(bytes: &[u8]) -> Result<Vec<(String, String)>> {
    let root = vdf::parse(bytes).context("decode shortcuts.vdf")?;
    let shortcuts = root
        .get("shortcuts")
        .and_then(vdf::Value::as_map)
        .context("missing `shortcuts` section")?;

    let mut out = Vec::new();
    for (slot, entry) in shortcuts {
        let Some(entry) = entry.as_map() else {
            tracing::debug!(slot = %slot, "shortcut entry is not a map");
            continue;
        };
        let Some(appid) = entry.get("appid").and_then(vdf::Value::as_u32) else {
            continue;
        };
        let Some(name) = entry.get("appname").and_then(vdf::Value::as_str) else {
            tracing::debug!(slot = %slot, appid, "shortcut has no appname");
            continue;
        };
        out.push((appid.to_string(), name.to_string()));
    }
    Ok(out)
}
