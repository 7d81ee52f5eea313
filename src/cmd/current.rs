//! `dbsnap current`: show the connection in use (password masked).

use anyhow::Result;
use clap::Args;

use crate::client::client_args_string;
use crate::cmd::format::{Role, StyleOptions, color, status_line};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct CurrentArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute_current(args: CurrentArgs, settings: &Settings) -> Result<()> {
    let current = settings.store().get_current()?;

    if args.json {
        let value = match &current {
            Some(c) => serde_json::json!({
                "url": c.redacted(),
                "database": c.database,
                "client_args": client_args_string(c, true),
                "snapshot_dir": c.snapshot_dir.display().to_string(),
            }),
            None => serde_json::Value::Null,
        };
        println!("{value}");
        return Ok(());
    }

    let style = StyleOptions::detect();
    match current {
        Some(c) => {
            println!("{}", status_line("Current", c.redacted(), &style));
            println!(
                "{}",
                status_line("Client args", client_args_string(&c, true), &style)
            );
            println!(
                "{}",
                status_line("Snapshots", c.snapshot_dir.display().to_string(), &style)
            );
        }
        None => println!("{}", color(Role::Dim, "No current connection", &style)),
    }
    Ok(())
}
