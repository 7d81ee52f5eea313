//! Error taxonomy shared by the connection, store, snapshot and client modules.
//!
//! Every variant is terminal for the current invocation: `main` prints the
//! message (with its source chain) and exits non-zero. Nothing is retried.

use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T, E = DbsnapError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DbsnapError {
    #[error("invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("malformed connection string '{input}': {reason}")]
    MalformedConnectionString { input: String, reason: String },

    #[error("Please run 'dbsnap connect' first")]
    NoCurrentConnection,

    #[error("current connection file {} holds more than one line", path.display())]
    CorruptPointer { path: PathBuf },

    #[error("Snapshot not found at: {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    #[error("No snapshot found")]
    NoSnapshotsExist,

    #[error("invalid snapshot name '{0}'")]
    InvalidSnapshotName(String),

    #[error("{}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start '{tool}'")]
    ClientToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}")]
    ClientToolFailed { tool: String, status: ExitStatus },
}

impl DbsnapError {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbsnapError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Attach a path to `std::io::Result` values.
pub trait IoResultExt<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| DbsnapError::fs(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            DbsnapError::NoCurrentConnection.to_string(),
            "Please run 'dbsnap connect' first"
        );
        assert_eq!(DbsnapError::NoSnapshotsExist.to_string(), "No snapshot found");
        let e = DbsnapError::SnapshotNotFound {
            path: PathBuf::from("/tmp/x/a.sql"),
        };
        assert_eq!(e.to_string(), "Snapshot not found at: /tmp/x/a.sql");
    }

    #[test]
    fn at_path_wraps_io_error() {
        let r: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = r.at_path("/root/secret").unwrap_err();
        assert!(matches!(err, DbsnapError::Filesystem { .. }));
        let shown = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(shown, "/root/secret: denied");
    }
}
