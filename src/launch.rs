use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::fs_util::{read_json_opt, write_atomic};
use crate::model::{RuntimeCandidate, SandboxCandidate};

pub type LaunchEnv = BTreeMap<String, String>;

/// The most recent launch, kept so it can be replayed without the menus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastLaunch {
    pub saved_at: String,
    pub runtime: String,
    pub sandbox_id: String,
    pub env: LaunchEnv,
}

pub fn create_env(runtime: &RuntimeCandidate, sandbox: &SandboxCandidate) -> LaunchEnv {
    let root = absolute(&runtime.root_path);
    let payload = absolute(&runtime.payload_path);
    let prefix = absolute(&sandbox.path);
    let p = |path: &Path| path.display().to_string();

    BTreeMap::from([
        ("PROTON".to_string(), p(&root)),
        ("WINEPREFIX".to_string(), p(&prefix.join("pfx"))),
        ("PATHEXTRA".to_string(), p(&payload.join("bin"))),
        ("WINESERVER".to_string(), p(&payload.join("wineserver"))),
        ("WINELOADER".to_string(), p(&payload.join("wine"))),
        (
            "WINEDLLPATH".to_string(),
            format!(
                "{}:{}",
                p(&payload.join("lib").join("wine")),
                p(&payload.join("lib64").join("wine"))
            ),
        ),
        ("APPID".to_string(), sandbox.id.clone()),
    ])
}

impl LastLaunch {
    pub fn new(runtime: &RuntimeCandidate, sandbox: &SandboxCandidate, env: LaunchEnv) -> Self {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            saved_at,
            runtime: runtime.id.clone(),
            sandbox_id: sandbox.id.clone(),
            env,
        }
    }
}

pub fn save_last(path: &Path, last: &LastLaunch) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(last).context("serialize last launch")?;
    write_atomic(path, &bytes).context("write last launch")
}

pub fn load_last(path: &Path) -> Result<LastLaunch> {
    read_json_opt(path)?
        .with_context(|| format!("no previous launch recorded at {}", path.display()))
}

/// Runs `args` with `env` layered over the inherited environment and waits
/// for it. In shell mode the first argument is a `sh -c` script and the rest
/// become its positional parameters.
pub fn execute_with_env(env: &LaunchEnv, args: &[String], shell: bool) -> Result<i32> {
    let Some((first, rest)) = args.split_first() else {
        bail!("missing command");
    };

    let mut cmd = if shell {
        let mut c = Command::new("sh");
        c.arg("-c").arg(first).args(rest);
        c
    } else {
        let mut c = Command::new(first);
        c.args(rest);
        c
    };
    cmd.envs(env);

    tracing::info!(command = %first, shell, "launching");
    let status = cmd
        .status()
        .with_context(|| format!("spawn `{}`", first))?;
    // Signal-terminated children have no code; report them as a failure.
    Ok(status.code().unwrap_or(1))
}

fn absolute(path: &Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
