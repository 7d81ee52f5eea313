//! Snapshot files inside a connection's snapshot directory.
//!
//! list_snapshots   -> entries, newest first
//! snapshot_file_name / default_snapshot_name
//! create_snapshot / restore_snapshot / clear_snapshots
//!
//! Ordering uses the inode change time on unix, so a snapshot written again
//! under an existing name moves to the front. Elsewhere the creation time is
//! used (mtime where the platform has none). Ties are broken by name so
//! repeated listings of the same state agree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
#[cfg(unix)]
use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::client::{ClientCommand, dump_invocation, restore_invocation, run_dump, run_restore};
use crate::connection::ConnectionDescriptor;
use crate::error::{DbsnapError, IoResultExt, Result};
use crate::utils::slug::slug;
use crate::{log_debug, log_info};

const EXTENSION: &str = ".sql";

/// One directory entry of a snapshot folder.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub size: u64,
    pub created: DateTime<Local>,
}

/// List every entry in `dir`, newest first.
///
/// Subdirectories are included. An empty directory yields an empty list.
pub fn list_snapshots(dir: &Path) -> Result<Vec<SnapshotEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).at_path(dir)? {
        let entry = entry.at_path(dir)?;
        let path = entry.path();
        let meta = entry.metadata().at_path(&path)?;
        let created = change_time(&meta).at_path(&path)?;
        entries.push(SnapshotEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: meta.len(),
            created: created.into(),
        });
    }
    sort_newest_first(&mut entries);
    Ok(entries)
}

#[cfg(unix)]
fn change_time(meta: &fs::Metadata) -> std::io::Result<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    let secs = u64::try_from(meta.ctime()).unwrap_or(0);
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    Ok(UNIX_EPOCH + Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn change_time(meta: &fs::Metadata) -> std::io::Result<SystemTime> {
    meta.created().or_else(|_| meta.modified())
}

/// Ascending by (created, name), then reversed.
fn sort_newest_first(entries: &mut [SnapshotEntry]) {
    entries.sort_by(|a, b| (a.created, &a.name).cmp(&(b.created, &b.name)));
    entries.reverse();
}

/// Names only, newest first.
pub fn list_snapshot_names(dir: &Path) -> Result<Vec<String>> {
    Ok(list_snapshots(dir)?.into_iter().map(|e| e.name).collect())
}

/// Append `.sql` unless the name already ends with exactly `.sql`.
pub fn snapshot_file_name(name: &str) -> String {
    if name.ends_with(EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{EXTENSION}")
    }
}

/// `YYYYMMDD-HHMMSS-<slug(database)>.sql` in local time.
pub fn default_snapshot_name(database: &str, now: DateTime<Local>) -> String {
    format!("{}-{}{EXTENSION}", now.format("%Y%m%d-%H%M%S"), slug(database))
}

/// Names must stay inside the snapshot directory.
pub fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if bad {
        return Err(DbsnapError::InvalidSnapshotName(name.to_string()));
    }
    Ok(())
}

/// Dump the connection's database into its snapshot directory.
///
/// Returns the file name of the new snapshot.
pub fn create_snapshot(
    connection: &ConnectionDescriptor,
    dump_tool: &ClientCommand,
    name: Option<&str>,
) -> Result<String> {
    let filename = match name {
        Some(n) => {
            validate_name(n)?;
            snapshot_file_name(n)
        }
        None => default_snapshot_name(&connection.database, Local::now()),
    };
    let filepath = connection.snapshot_dir.join(&filename);
    log_info!("creating snapshot {}", filepath.display());

    let invocation = dump_invocation(dump_tool, connection);
    run_dump(&invocation, &filepath)?;
    Ok(filename)
}

/// Restore the named snapshot, or the newest one when `name` is `None`.
///
/// Returns the file name that was restored. Fails before spawning anything
/// when there is nothing to restore.
pub fn restore_snapshot(
    connection: &ConnectionDescriptor,
    restore_tool: &ClientCommand,
    name: Option<&str>,
) -> Result<String> {
    let filename = match name {
        Some(n) => {
            validate_name(n)?;
            n.to_string()
        }
        None => list_snapshot_names(&connection.snapshot_dir)?
            .into_iter()
            .next()
            .ok_or(DbsnapError::NoSnapshotsExist)?,
    };

    let filepath = connection.snapshot_dir.join(&filename);
    if !filepath.exists() {
        return Err(DbsnapError::SnapshotNotFound { path: filepath });
    }
    log_info!("restoring snapshot {}", filepath.display());

    let invocation = restore_invocation(restore_tool, connection);
    run_restore(&invocation, &filepath)?;
    Ok(filename)
}

/// Delete the whole snapshot directory. Returns the removed path.
pub fn clear_snapshots(connection: &ConnectionDescriptor) -> Result<PathBuf> {
    let dir = connection.snapshot_dir.clone();
    fs::remove_dir_all(&dir).at_path(&dir)?;
    log_debug!("removed {}", dir.display());
    Ok(dir)
}
