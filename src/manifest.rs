use std::fs;
use std::path::{Path, PathBuf};

/// Reads app names out of `appmanifest_<id>.acf` files.
#[derive(Clone, Debug)]
pub struct ManifestReader {
    steamapps: PathBuf,
}

impl ManifestReader {
    pub fn new(steamapps: impl Into<PathBuf>) -> Self {
        Self {
            steamapps: steamapps.into(),
        }
    }

    pub fn manifest_path(&self, id: &str) -> PathBuf {
        self.steamapps.join(format!("appmanifest_{}.acf", id))
    }

    pub fn name_for(&self, id: &str) -> Option<String> {
        let path = self.manifest_path(id);
        if !path.is_file() {
            return None;
        }
        read_name(&path)
    }
}

/// Name from the first line mentioning `name`, e.g. `\t"name"\t\t"Half-Life"`.
pub fn read_name(path: &Path) -> Option<String> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "unreadable manifest");
            return None;
        }
    };
    let name = parse_name(&text);
    if name.is_none() {
        tracing::debug!(path = %path.display(), "manifest has no usable name line");
    }
    name
}

pub fn parse_name(text: &str) -> Option<String> {
    let line = text.lines().find(|l| l.contains("name"))?;
    let value = line.split('\t').next_back()?.trim();
    let value = value.strip_prefix('"')?.strip_suffix('"')?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
#[path = "tests/manifest_tests.rs"]
mod tests;
