//! `dbsnap clear`: delete every snapshot of the current connection.

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::{StyleOptions, status_line};
use crate::config::Settings;
use crate::snapshot::clear_snapshots;

#[derive(Args, Debug)]
pub struct ClearArgs {}

pub fn execute_clear(_args: ClearArgs, settings: &Settings) -> Result<()> {
    let connection = settings.store().require_current()?;
    let removed = clear_snapshots(&connection).context("Failed to clear snapshots")?;
    println!(
        "{}",
        status_line("Cleared", removed.display().to_string(), &StyleOptions::detect())
    );
    Ok(())
}
