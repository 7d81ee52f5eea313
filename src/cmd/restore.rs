//! `dbsnap restore [-n NAME]`: load a snapshot back into the current database.
//!
//! Without a name the newest snapshot (by creation time) is used.

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, status_line};
use crate::config::Settings;
use crate::snapshot::restore_snapshot;

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Snapshot file name (defaults to latest)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

pub fn execute_restore(args: RestoreArgs, settings: &Settings) -> Result<()> {
    let connection = settings.store().require_current()?;
    let filename = restore_snapshot(&connection, &settings.restore_tool, args.name.as_deref())?;
    println!("{}", status_line("Restored", &filename, &StyleOptions::detect()));
    Ok(())
}
