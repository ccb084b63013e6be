use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::fs_util::{read_json_opt, write_atomic};

mod client;
pub use self::client::{CatalogClient, HttpCatalogClient};

/// Snapshot of the remote app list, stored in the same shape it is served in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub applist: AppList,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppList {
    pub apps: Vec<AppEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub appid: u64,
    #[serde(default)]
    pub name: String,
}

/// id -> name lookup built from a snapshot; the first non-empty name wins.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    names: HashMap<String, String>,
}

impl CatalogIndex {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<CatalogSnapshot> for CatalogIndex {
    fn from(snapshot: CatalogSnapshot) -> Self {
        let mut names = HashMap::with_capacity(snapshot.applist.apps.len());
        for app in snapshot.applist.apps {
            if app.name.is_empty() {
                continue;
            }
            names.entry(app.appid.to_string()).or_insert(app.name);
        }
        Self { names }
    }
}

/// The small, locally maintained id -> name tier.
///
/// Entries are only ever added. Any insert of a new key marks the cache dirty
/// so the pipeline knows to write it back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuickCache {
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl QuickCache {
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            dirty: false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Returns false (and leaves the cache clean) when the id is already cached.
    pub fn insert(&mut self, id: &str, name: &str) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), name.to_string());
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Persistence for both cache tiers.
pub trait CatalogStore {
    fn load_quick(&self) -> Result<QuickCache>;
    fn load_full(&self) -> Result<CatalogIndex>;
    fn save_quick(&self, cache: &QuickCache) -> Result<()>;
}

/// File-backed store: `quick_appids.json` and `appids.json` in the config dir.
#[derive(Clone, Debug)]
pub struct CatalogCache {
    quick_path: PathBuf,
    full_path: PathBuf,
}

impl CatalogCache {
    pub fn new(quick_path: impl Into<PathBuf>, full_path: impl Into<PathBuf>) -> Self {
        Self {
            quick_path: quick_path.into(),
            full_path: full_path.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.quick_cache_path(), cfg.full_cache_path())
    }

    /// Replaces the full tier with a fresh snapshot. Without `force` nothing
    /// is fetched or written.
    pub fn refresh_full(&self, force: bool, client: &dyn CatalogClient) -> Result<bool> {
        if !force {
            return Ok(false);
        }
        let snapshot = client.fetch_snapshot().context("fetch catalog snapshot")?;
        tracing::info!(apps = snapshot.applist.apps.len(), "fetched catalog snapshot");
        let bytes = serde_json::to_vec_pretty(&snapshot).context("serialize catalog snapshot")?;
        write_atomic(&self.full_path, &bytes).context("write catalog snapshot")?;
        Ok(true)
    }
}

impl CatalogStore for CatalogCache {
    fn load_quick(&self) -> Result<QuickCache> {
        tracing::debug!(path = %self.quick_path.display(), "reading quick cache");
        let entries: Option<BTreeMap<String, String>> =
            read_json_opt(&self.quick_path).context("load quick cache")?;
        Ok(QuickCache::from_entries(entries.unwrap_or_default()))
    }

    fn load_full(&self) -> Result<CatalogIndex> {
        tracing::debug!(path = %self.full_path.display(), "reading full catalog");
        let snapshot: Option<CatalogSnapshot> =
            read_json_opt(&self.full_path).context("load catalog snapshot")?;
        Ok(snapshot.map(CatalogIndex::from).unwrap_or_default())
    }

    fn save_quick(&self, cache: &QuickCache) -> Result<()> {
        tracing::debug!(path = %self.quick_path.display(), entries = cache.len(), "writing quick cache");
        let bytes = serde_json::to_vec(cache.entries()).context("serialize quick cache")?;
        write_atomic(&self.quick_path, &bytes).context("write quick cache")
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
