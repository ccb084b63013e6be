use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Row projection used by the menu: each display field is addressed by index.
pub trait MenuRow {
    fn field(&self, index: usize) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeCandidate {
    pub id: String,
    pub root_path: PathBuf,
    /// The `files` or `dist` subdirectory holding the actual runtime.
    pub payload_path: PathBuf,
}

impl MenuRow for RuntimeCandidate {
    fn field(&self, index: usize) -> String {
        match index {
            0 => self.id.clone(),
            1 => self.root_path.display().to_string(),
            2 => self.payload_path.display().to_string(),
            _ => String::new(),
        }
    }
}

/// A compatdata directory found on disk, before it has a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SandboxDir {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxCandidate {
    pub id: String,
    pub display_name: String,
    pub path: PathBuf,
}

impl MenuRow for SandboxCandidate {
    fn field(&self, index: usize) -> String {
        match index {
            0 => self.id.clone(),
            1 => self.display_name.clone(),
            2 => self.path.display().to_string(),
            _ => String::new(),
        }
    }
}

impl MenuRow for Vec<String> {
    fn field(&self, index: usize) -> String {
        self.get(index).cloned().unwrap_or_default()
    }
}
