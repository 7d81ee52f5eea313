/*!
`list.rs`

Implements `dbsnap list`: snapshot names of the current connection, newest
first, one per line.

Output modes:
  - default : bare file names (script friendly)
  - --long  : table with NAME / SIZE / CREATED
  - --json  : array of { "name", "size", "created" } objects

Fails (exit 1) when no connection was ever stored.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::{StyleOptions, human_size, table};
use crate::config::Settings;
use crate::snapshot::{SnapshotEntry, list_snapshots};

/// CLI arguments for `dbsnap list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of plain names
    #[arg(long, conflicts_with = "long")]
    pub json: bool,

    /// Show size and creation time
    #[arg(short, long)]
    pub long: bool,
}

/// Entry point for the list subcommand.
pub fn execute_list(args: ListArgs, settings: &Settings) -> Result<()> {
    let connection = settings.store().require_current()?;
    let entries = list_snapshots(&connection.snapshot_dir)?;

    if args.json {
        let out = serde_json::to_string_pretty(&entries).context("Failed to encode snapshot list")?;
        println!("{out}");
    } else if args.long {
        if !entries.is_empty() {
            println!("{}", render_long(&entries, &StyleOptions::detect()));
        }
    } else {
        for e in &entries {
            println!("{}", e.name);
        }
    }
    Ok(())
}

fn render_long(entries: &[SnapshotEntry], style: &StyleOptions) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                human_size(e.size),
                e.created.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();
    table(&["NAME", "SIZE", "CREATED"], &rows, style)
}
