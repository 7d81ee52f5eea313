//! Runtime settings: data root and client tool commands.
//!
//! Precedence for every value: CLI flag > environment variable > default.
//! Empty or whitespace-only environment values count as unset.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::client::ClientCommand;
use crate::store::CurrentConnectionStore;

pub const ENV_DATA_DIR: &str = "DBSNAP_DATA_DIR";
pub const ENV_MYSQLDUMP: &str = "DBSNAP_MYSQLDUMP";
pub const ENV_MYSQL: &str = "DBSNAP_MYSQL";

const APP_DIR: &str = "dbsnap";

/// Everything a subcommand needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub dump_tool: ClientCommand,
    pub restore_tool: ClientCommand,
}

impl Settings {
    /// Resolve settings from (optional) CLI values, falling back to the environment.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        mysqldump: Option<String>,
        mysql: Option<String>,
    ) -> Result<Self> {
        Self::resolve_with(data_dir, mysqldump, mysql, |k| std::env::var(k).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable env lookup.
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        mysqldump: Option<String>,
        mysql: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |k: &str| env(k).filter(|v| !v.trim().is_empty());

        let data_dir = match data_dir.or_else(|| env(ENV_DATA_DIR).map(PathBuf::from)) {
            Some(d) => d,
            None => default_data_dir()?,
        };

        let dump_tool = match mysqldump.or_else(|| env(ENV_MYSQLDUMP)) {
            Some(raw) => ClientCommand::parse(&raw).context("Invalid dump client command")?,
            None => ClientCommand::new("mysqldump"),
        };
        let restore_tool = match mysql.or_else(|| env(ENV_MYSQL)) {
            Some(raw) => ClientCommand::parse(&raw).context("Invalid restore client command")?,
            None => ClientCommand::new("mysql"),
        };

        Ok(Settings {
            data_dir,
            dump_tool,
            restore_tool,
        })
    }

    pub fn store(&self) -> CurrentConnectionStore {
        CurrentConnectionStore::new(&self.data_dir)
    }
}

/// Per-user data directory, e.g. `~/.local/share/dbsnap` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .context("Could not determine the user data directory; set --data-dir or DBSNAP_DATA_DIR")
}
