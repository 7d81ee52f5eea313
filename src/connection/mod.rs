//! Connection string parsing.
//!
//! parse_connection -> ConnectionDescriptor { scheme, credentials, host, port, database }
//! The snapshot directory is derived from the slug of the raw string, never
//! from the parsed fields, so the same input always maps to the same folder.
//!
use std::fmt;
use std::path::{Path, PathBuf};

use url::{Host, Url};

use crate::error::{DbsnapError, Result};
use crate::utils::slug::slug;

/// Supported database schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Mysql,
}

impl Scheme {
    /// Exact, case-sensitive match.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "mysql" => Some(Scheme::Mysql),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Password as written in the URL.
///
/// `user@host` and `user:@host` are different: the latter asks the client
/// tool to prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Password {
    Absent,
    Empty,
    Given(String),
}

impl Password {
    pub fn is_absent(&self) -> bool {
        matches!(self, Password::Absent)
    }
}

/// A parsed connection string plus the directory its snapshots live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// The string exactly as the user supplied it.
    pub original: String,
    pub scheme: Scheme,
    pub username: Option<String>,
    pub password: Password,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    /// URL path without leading slashes; may be empty.
    pub database: String,
    pub snapshot_dir: PathBuf,
}

impl ConnectionDescriptor {
    /// The original URL with any password replaced by `****`, for display.
    pub fn redacted(&self) -> String {
        let Some(userinfo) = raw_parts(&self.original).userinfo else {
            return self.original.clone();
        };
        let Some((user, _)) = userinfo.split_once(':') else {
            return self.original.clone();
        };
        self.original
            .replacen(&format!("{userinfo}@"), &format!("{user}:****@"), 1)
    }
}

/// Parse `scheme://[user[:password]@]host[:port]/path`.
///
/// Only the `mysql` scheme is accepted. Missing user, password, host or port
/// are represented as absent. Nothing is created on disk here; `data_root`
/// only anchors the computed `snapshot_dir`.
pub fn parse_connection(raw: &str, data_root: &Path) -> Result<ConnectionDescriptor> {
    let url = Url::parse(raw).map_err(|e| DbsnapError::MalformedConnectionString {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    // `Url` lowercases the scheme; the check is against the text as written.
    let raw_scheme = raw.trim_start().split(':').next().unwrap_or_default();
    let scheme = Scheme::from_raw(raw_scheme)
        .ok_or_else(|| DbsnapError::InvalidScheme(raw_scheme.to_string()))?;

    // Credentials and database are taken as written; `Url` would
    // percent-encode them.
    let parts = raw_parts(raw);
    let (username, password) = match parts.userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, pass)) => (user, Some(pass)),
            None => (info, None),
        },
        None => ("", None),
    };
    let username = Some(username)
        .filter(|u| !u.is_empty())
        .map(str::to_string);
    let password = match password {
        None => Password::Absent,
        Some("") => Password::Empty,
        Some(p) => Password::Given(p.to_string()),
    };

    let hostname = match url.host() {
        Some(Host::Domain(d)) if !d.is_empty() => Some(d.to_ascii_lowercase()),
        Some(Host::Ipv4(addr)) => Some(addr.to_string()),
        Some(Host::Ipv6(addr)) => Some(addr.to_string()),
        _ => None,
    };

    Ok(ConnectionDescriptor {
        original: raw.to_string(),
        scheme,
        username,
        password,
        hostname,
        port: url.port(),
        database: parts.path.trim_start_matches('/').to_string(),
        snapshot_dir: data_root.join(slug(raw)),
    })
}

/// Userinfo and path of a raw connection string, unencoded.
struct RawParts<'a> {
    userinfo: Option<&'a str>,
    path: &'a str,
}

/// The authority runs from `://` to the first `/`, `?` or `#`; userinfo is
/// everything before its last `@`. The path stops at `?` or `#`.
fn raw_parts(raw: &str) -> RawParts<'_> {
    let Some((_, rest)) = raw.split_once("://") else {
        // `scheme:path` has no authority at all.
        let path = raw.split_once(':').map(|(_, p)| p).unwrap_or_default();
        return RawParts {
            userinfo: None,
            path: without_query(path),
        };
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(end);
    RawParts {
        userinfo: authority.rsplit_once('@').map(|(info, _)| info),
        path: if tail.starts_with('/') {
            without_query(tail)
        } else {
            ""
        },
    }
}

fn without_query(s: &str) -> &str {
    s.split(['?', '#']).next().unwrap_or_default()
}
