//! Command lines for the external calendar tool.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::FetchConfig;
use crate::target::FetchTarget;

/// A fully built invocation of the calendar tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub program: OsString,
    pub args: Vec<String>,
}

/// Build `<tool> calendar events [calendarId] --account A --from F --to T --max N --json`.
///
/// The calendar id is only emitted when set and non-empty.
pub fn build_fetch_command(
    program: impl Into<OsString>,
    max_results: u32,
    target: &FetchTarget,
) -> FetchCommand {
    let mut args = vec!["calendar".to_string(), "events".to_string()];

    if let Some(calendar_id) = target.calendar_id.as_deref().filter(|id| !id.is_empty()) {
        args.push(calendar_id.to_string());
    }

    args.extend([
        "--account".to_string(),
        target.account.clone(),
        "--from".to_string(),
        target.from.clone(),
        "--to".to_string(),
        target.to.clone(),
        "--max".to_string(),
        max_results.to_string(),
        "--json".to_string(),
    ]);

    FetchCommand {
        program: program.into(),
        args,
    }
}

impl FetchCommand {
    /// Child process with stdout and stderr piped. stdin is inherited so the
    /// tool can still prompt (e.g. for a keyring passphrase).
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl fmt::Display for FetchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Find the tool binary.
///
/// Names are looked up in PATH; when that fails the configured value is used
/// as given and any launch error is left to the fetch itself.
pub fn resolve_program(config: &FetchConfig) -> OsString {
    match which::which(&config.tool) {
        Ok(path) => path.into_os_string(),
        Err(e) => {
            tracing::debug!(tool = %config.tool, error = %e, "tool not found in PATH");
            PathBuf::from(&config.tool).into_os_string()
        }
    }
}
