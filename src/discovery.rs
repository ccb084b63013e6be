use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

use crate::config::{Config, SortOrder};
use crate::model::{RuntimeCandidate, SandboxDir};

const COMPAT_TOOLS_DIR: &str = "compatibilitytools.d";
const PAYLOAD_DIRS: [&str; 2] = ["files", "dist"];

/// Installed runtimes: everything under `compatibilitytools.d` plus the
/// `Proton*` builds shipped in `steamapps/common`.
pub fn list_runtime_dirs(cfg: &Config) -> Result<Vec<RuntimeCandidate>> {
    let proton = Glob::new("Proton*")
        .context("compile runtime glob")?
        .compile_matcher();

    let mut found = subdirs(&cfg.steam_root.join(COMPAT_TOOLS_DIR), None)?;
    found.extend(subdirs(&cfg.steamapps_dir().join("common"), Some(&proton))?);
    sort_by_mtime(&mut found, cfg.sort_order);

    let runtimes = found
        .into_iter()
        .filter_map(|(dir, _)| {
            let payload = PAYLOAD_DIRS
                .iter()
                .map(|p| dir.join(p))
                .find(|p| p.is_dir())?;
            Some(RuntimeCandidate {
                id: basename(&dir),
                root_path: dir,
                payload_path: payload,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = runtimes.len(), "discovered runtimes");
    Ok(runtimes)
}

pub fn list_sandbox_dirs(cfg: &Config) -> Result<Vec<SandboxDir>> {
    let mut found = subdirs(&cfg.steamapps_dir().join("compatdata"), None)?;
    sort_by_mtime(&mut found, cfg.sort_order);
    let dirs = found
        .into_iter()
        .map(|(path, _)| SandboxDir {
            id: basename(&path),
            path,
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = dirs.len(), "discovered prefixes");
    Ok(dirs)
}

fn subdirs(root: &Path, filter: Option<&GlobMatcher>) -> Result<Vec<(PathBuf, SystemTime)>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    let entries = fs::read_dir(root).with_context(|| format!("read dir {}", root.display()))?;
    for entry in readable(entries, root) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(m) = filter
            && !m.is_match(entry.file_name())
        {
            continue;
        }
        let mtime = fs::metadata(&path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        out.push((path, mtime));
    }
    Ok(out)
}

/// Drops entries the OS failed to read, so one bad entry does not hide the rest.
fn readable<T>(
    entries: impl Iterator<Item = io::Result<T>>,
    root: &Path,
) -> impl Iterator<Item = T> {
    entries.filter_map(move |entry| match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::debug!(root = %root.display(), error = %err, "skipping unreadable dir entry");
            None
        }
    })
}

fn sort_by_mtime(dirs: &mut [(PathBuf, SystemTime)], order: SortOrder) {
    match order {
        SortOrder::NewestFirst => dirs.sort_by(|a, b| b.1.cmp(&a.1)),
        SortOrder::OldestFirst => dirs.sort_by(|a, b| a.1.cmp(&b.1)),
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/discovery_tests.rs"]
mod tests;
