//! `dbsnap create [-n NAME]` (alias `snap`): dump the current database.

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, status_line};
use crate::config::Settings;
use crate::snapshot::create_snapshot;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Snapshot name (".sql" is appended when missing); defaults to a timestamp
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

pub fn execute_create(args: CreateArgs, settings: &Settings) -> Result<()> {
    let connection = settings.store().require_current()?;
    let filename = create_snapshot(&connection, &settings.dump_tool, args.name.as_deref())?;
    println!("{}", status_line("Created", &filename, &StyleOptions::detect()));
    Ok(())
}
