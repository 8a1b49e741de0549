//! Running one fetch.
//!
//! A fetch never fails from the caller's point of view: whatever the tool
//! wrote to stdout is the result, even if it exited non-zero or could not be
//! started at all (in which case the result is empty).

use std::ffi::OsString;
use std::future::Future;

use crate::command::{FetchCommand, build_fetch_command};
use crate::target::FetchTarget;

/// Produces the raw output for a target.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, target: &FetchTarget) -> impl Future<Output = String> + Send;
}

/// Runs the external calendar tool as a subprocess.
#[derive(Debug, Clone)]
pub struct ToolFetcher {
    program: OsString,
    max_results: u32,
}

impl ToolFetcher {
    pub fn new(program: impl Into<OsString>, max_results: u32) -> Self {
        ToolFetcher {
            program: program.into(),
            max_results,
        }
    }

    pub fn command_for(&self, target: &FetchTarget) -> FetchCommand {
        build_fetch_command(self.program.clone(), self.max_results, target)
    }
}

impl Fetcher for ToolFetcher {
    async fn fetch(&self, target: &FetchTarget) -> String {
        let command = self.command_for(target);
        tracing::debug!(%command, "running calendar tool");

        // stderr is collected with stdout so the child never blocks on a full pipe
        let output = match command.to_command().output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    program = %command.program.to_string_lossy(),
                    error = %e,
                    "failed to run calendar tool"
                );
                return String::new();
            }
        };

        if !output.status.success() {
            tracing::debug!(
                account = %target.account,
                status = output.status.code().unwrap_or(-1),
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "calendar tool exited with failure"
            );
        }
        tracing::debug!(
            account = %target.account,
            bytes = output.stdout.len(),
            "calendar tool finished"
        );

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
