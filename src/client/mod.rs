//! External MySQL client invocation.
//!
//! build_client_args -> argument vector shared by dump and restore
//! ClientCommand     -> program + prefix args (from config, shell-word split)
//! run_dump / run_restore -> spawn directly (no shell), wait, check status
//!
use std::fs::File;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use shell_words::split as shell_split;
use tokio::process::Command;

use crate::connection::{ConnectionDescriptor, Password};
use crate::error::{DbsnapError, IoResultExt, Result};
use crate::{log_debug, log_error, log_warn};

/// Credential and address flags, in fixed order: user, password, host, port.
///
/// An empty password yields a bare `-p`, which makes the client prompt.
pub fn build_client_args(connection: &ConnectionDescriptor) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(user) = &connection.username {
        args.push("-u".to_string());
        args.push(user.clone());
    }
    match &connection.password {
        Password::Absent => {}
        Password::Empty => args.push("-p".to_string()),
        Password::Given(p) => args.push(format!("-p={p}")),
    }
    if let Some(host) = &connection.hostname {
        args.push("-h".to_string());
        args.push(host.clone());
    }
    // Port 0 means "not set", as with an absent port.
    if let Some(port) = connection.port.filter(|p| *p != 0) {
        args.push("--port".to_string());
        args.push(port.to_string());
    }
    args
}

/// Space-joined form of [`build_client_args`], optionally with the
/// password masked.
pub fn client_args_string(connection: &ConnectionDescriptor, redact: bool) -> String {
    build_client_args(connection)
        .iter()
        .map(|a| if redact { redact_arg(a) } else { a.clone() })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn redact_arg(arg: &str) -> String {
    if arg.starts_with("-p=") {
        "-p=****".to_string()
    } else {
        arg.to_string()
    }
}

/// A client tool as configured: the program plus any leading arguments,
/// e.g. `docker exec -i db mysqldump`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCommand {
    pub program: String,
    pub prefix_args: Vec<String>,
}

impl ClientCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Split a command line with shell-word rules.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let parts = shell_split(raw.trim())
            .map_err(|e| anyhow::anyhow!("Failed to parse client command '{raw}': {e}"))?;
        let Some((program, rest)) = parts.split_first() else {
            anyhow::bail!("Client command is empty");
        };
        if program.is_empty() {
            anyhow::bail!("Empty program name in client command '{raw}'");
        }
        Ok(Self {
            program: program.clone(),
            prefix_args: rest.to_vec(),
        })
    }
}

/// A fully resolved child invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Shell-quoted command line with `-p=<secret>` masked, for logs.
    pub fn display_masked(&self) -> String {
        let words: Vec<String> = std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| redact_arg(a)))
            .collect();
        shell_words::join(words)
    }
}

/// `<dump> <client args> --databases <name> --add-drop-database`
pub fn dump_invocation(tool: &ClientCommand, connection: &ConnectionDescriptor) -> Invocation {
    let mut args = tool.prefix_args.clone();
    args.extend(build_client_args(connection));
    args.push("--databases".to_string());
    args.push(connection.database.clone());
    args.push("--add-drop-database".to_string());
    Invocation {
        program: tool.program.clone(),
        args,
    }
}

/// `<restore> <client args> <name>`
pub fn restore_invocation(tool: &ClientCommand, connection: &ConnectionDescriptor) -> Invocation {
    let mut args = tool.prefix_args.clone();
    args.extend(build_client_args(connection));
    args.push(connection.database.clone());
    Invocation {
        program: tool.program.clone(),
        args,
    }
}

/// Run the dump client with stdout written to `output`.
///
/// The dump goes to a hidden staging file next to `output` and is renamed
/// over it only on success, so a failed dump never touches an existing
/// snapshot of the same name and leaves nothing behind.
pub fn run_dump(invocation: &Invocation, output: &Path) -> Result<()> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staging = tempfile::Builder::new()
        .prefix(".dbsnap-")
        .suffix(".partial")
        .tempfile_in(dir)
        .at_path(dir)?;
    let file = staging.reopen().at_path(staging.path())?;

    if let Err(e) = run(invocation, Stdio::inherit(), Stdio::from(file)) {
        log_warn!("discarding incomplete dump for {}", output.display());
        let staged = staging.path().to_path_buf();
        if let Err(cleanup) = staging.close() {
            log_error!("could not remove {}: {cleanup}", staged.display());
        }
        return Err(e);
    }

    staging
        .persist(output)
        .map_err(|e| e.error)
        .at_path(output)?;
    Ok(())
}

/// Run the restore client reading stdin from `input`.
pub fn run_restore(invocation: &Invocation, input: &Path) -> Result<()> {
    let file = File::open(input).at_path(input)?;
    run(invocation, Stdio::from(file), Stdio::inherit())
}

fn run(invocation: &Invocation, stdin: Stdio, stdout: Stdio) -> Result<()> {
    log_debug!("running: {}", invocation.display_masked());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DbsnapError::ClientToolSpawn {
            tool: invocation.program.clone(),
            source: e,
        })?;
    let status = rt.block_on(wait_child(invocation, stdin, stdout))?;

    log_debug!("'{}' finished with {status}", invocation.program);
    if !status.success() {
        return Err(DbsnapError::ClientToolFailed {
            tool: invocation.program.clone(),
            status,
        });
    }
    Ok(())
}

async fn wait_child(invocation: &Invocation, stdin: Stdio, stdout: Stdio) -> Result<ExitStatus> {
    let spawn_err = |source| DbsnapError::ClientToolSpawn {
        tool: invocation.program.clone(),
        source,
    };
    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(spawn_err)?;
    child.wait().await.map_err(spawn_err)
}
