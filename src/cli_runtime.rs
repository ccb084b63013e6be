use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;

use ncps::catalog::{CatalogCache, HttpCatalogClient};
use ncps::config::Config;
use ncps::launch::{self, LastLaunch};
use ncps::manifest::ManifestReader;
use ncps::menu::{PaginatedMenu, Selection};
use ncps::model::SandboxCandidate;
use ncps::names::{BatchResolution, annotate_sandboxes};
use ncps::{discovery, shortcuts};

#[derive(Parser)]
#[command(name = "ncps", version)]
#[command(about = "Pick a Proton build and a prefix, then run a command inside them", long_about = None)]
pub(crate) struct Cli {
    /// Run the command through `sh -c`
    #[arg(short = 'c', long = "shell")]
    shell: bool,

    /// Download a fresh app catalog and re-resolve prefix names
    #[arg(short = 'r', long = "refresh")]
    refresh: bool,

    /// Reuse the environment of the previous launch without prompting
    #[arg(short = 'l', long = "last")]
    last: bool,

    /// Command to run (with its arguments)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// What a parsed command line asks for, in precedence order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Refresh,
    Summary,
    Last,
    Choose,
}

impl Cli {
    pub(crate) fn action(&self) -> Action {
        if self.refresh {
            Action::Refresh
        } else if self.command.is_empty() {
            Action::Summary
        } else if self.last {
            Action::Last
        } else {
            Action::Choose
        }
    }
}

pub(crate) fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = Config::load().context("load config")?;

    let env = match cli.action() {
        Action::Refresh => {
            println!("refreshing app catalog...");
            let client = HttpCatalogClient::new(cfg.catalog_url.clone())?;
            CatalogCache::from_config(&cfg).refresh_full(true, &client)?;
            let batch = resolve_prefixes(&cfg)?;
            println!(
                "{} prefixes named{}",
                batch.candidates.len(),
                if batch.cache_updated {
                    " (quick cache updated)"
                } else {
                    ""
                }
            );
            return Ok(0);
        }
        Action::Summary => {
            print_summary(&cfg)?;
            return Ok(0);
        }
        Action::Last => {
            let last = launch::load_last(&cfg.last_launch_path())?;
            tracing::info!(runtime = %last.runtime, prefix = %last.sandbox_id, "reusing last launch");
            last.env
        }
        Action::Choose => choose_and_save(&cfg)?,
    };

    launch::execute_with_env(&env, &cli.command, cli.shell)
}

fn resolve_prefixes(cfg: &Config) -> Result<BatchResolution> {
    let dirs = discovery::list_sandbox_dirs(cfg)?;
    let index = shortcuts::parse_all_shortcuts(cfg);
    tracing::debug!(shortcuts = index.len(), "parsed shortcuts");
    Ok(annotate_sandboxes(
        &CatalogCache::from_config(cfg),
        &index,
        ManifestReader::new(cfg.steamapps_dir()),
        dirs,
    ))
}

fn choose_and_save(cfg: &Config) -> Result<launch::LaunchEnv> {
    let runtimes = discovery::list_runtime_dirs(cfg)?;
    let prefixes = resolve_prefixes(cfg)?.candidates;

    let runtime = match PaginatedMenu::new(&runtimes, &[0, 1])
        .title("Please select a Proton version to use")
        .quit_key(cfg.quit_key)
        .select()?
    {
        Selection::Selected(r) => r,
        Selection::Cancelled => bail!(
            "no Proton installations found under {}",
            cfg.steam_root.display()
        ),
    };

    let prefix = match PaginatedMenu::new(&prefixes, &[0, 1, 2])
        .title("Please select a prefix to use")
        .quit_key(cfg.quit_key)
        .select()?
    {
        Selection::Selected(p) => p,
        Selection::Cancelled => bail!(
            "no prefixes found under {}",
            cfg.steamapps_dir().join("compatdata").display()
        ),
    };

    let env = launch::create_env(runtime, prefix);
    let last = LastLaunch::new(runtime, prefix, env.clone());
    if let Err(err) = launch::save_last(&cfg.last_launch_path(), &last) {
        tracing::warn!(error = ?err, "could not record last launch");
    }
    Ok(env)
}

fn print_summary(cfg: &Config) -> Result<()> {
    let runtimes = discovery::list_runtime_dirs(cfg)?;
    let prefixes = resolve_prefixes(cfg)?.candidates;
    write_summary(&mut io::stdout().lock(), runtimes.len(), &prefixes).context("write summary")
}

fn write_summary(
    out: &mut impl Write,
    runtimes: usize,
    prefixes: &[SandboxCandidate],
) -> io::Result<()> {
    writeln!(out, "ncps: missing command")?;
    writeln!(out, "usage: ncps [-c] command")?;
    writeln!(out, "------------------------")?;
    writeln!(out, "{} Proton dirs found", runtimes)?;
    writeln!(out, "{} prefix dirs found", prefixes.len())?;
    if !prefixes.is_empty() {
        writeln!(out, "last prefixes created:")?;
        for SandboxCandidate {
            id, display_name, ..
        } in prefixes.iter().take(3)
        {
            writeln!(out, "\t{} - {}", id, display_name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/cli_runtime_tests.rs"]
mod tests;
