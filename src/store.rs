//! Single-slot persisted pointer to the connection in use.
//!
//! The pointer file (`<root>/current`) contains exactly the URL text given to
//! `connect`. Writes overwrite; nothing ever deletes it. No locking.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::connection::{ConnectionDescriptor, parse_connection};
use crate::error::{DbsnapError, IoResultExt, Result};
use crate::{log_debug, log_trace};

const POINTER_FILE: &str = "current";

/// Handle to the data root holding the pointer file and all snapshot folders.
#[derive(Debug, Clone)]
pub struct CurrentConnectionStore {
    root: PathBuf,
}

impl CurrentConnectionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn pointer_path(&self) -> PathBuf {
        self.root.join(POINTER_FILE)
    }

    /// Validate `url` and make it the current connection.
    pub fn set_current(&self, url: &str) -> Result<ConnectionDescriptor> {
        if url.contains(['\n', '\r']) {
            return Err(DbsnapError::MalformedConnectionString {
                input: url.to_string(),
                reason: "line breaks are not allowed".into(),
            });
        }
        let connection = parse_connection(url, &self.root)?;

        fs::create_dir_all(&self.root).at_path(&self.root)?;
        let pointer = self.pointer_path();
        fs::write(&pointer, url).at_path(&pointer)?;
        log_debug!("current connection written to {}", pointer.display());
        Ok(connection)
    }

    /// Read the current connection, if one was ever stored.
    ///
    /// A found connection has its snapshot directory created before it is
    /// returned. `Ok(None)` touches nothing on disk.
    pub fn get_current(&self) -> Result<Option<ConnectionDescriptor>> {
        let Some(url) = self.read_pointer()? else {
            log_trace!("no current connection at {}", self.pointer_path().display());
            return Ok(None);
        };
        let connection = parse_connection(&url, &self.root)?;
        fs::create_dir_all(&connection.snapshot_dir).at_path(&connection.snapshot_dir)?;
        Ok(Some(connection))
    }

    /// Like [`get_current`](Self::get_current), but absence is an error.
    pub fn require_current(&self) -> Result<ConnectionDescriptor> {
        self.get_current()?.ok_or(DbsnapError::NoCurrentConnection)
    }

    fn read_pointer(&self) -> Result<Option<String>> {
        let pointer = self.pointer_path();
        let content = match fs::read_to_string(&pointer) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DbsnapError::fs(pointer, e)),
        };

        let line = content
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&content);
        if line.is_empty() {
            return Ok(None);
        }
        if line.contains(['\n', '\r']) {
            return Err(DbsnapError::CorruptPointer { path: pointer });
        }
        Ok(Some(line.to_string()))
    }
}
