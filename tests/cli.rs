//! End-to-end runs of the `fetch_events` binary against a stub calendar tool.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Prints fixed data per account and records every invocation in `$STUB_LOG`.
const STUB_TOOL: &str = r#"#!/bin/sh
[ -n "$STUB_LOG" ] && echo "$*" >> "$STUB_LOG"
shift 2
cal=""
case "$1" in
  --*) ;;
  *) cal="$1"; shift ;;
esac
account="$2"
echo "stub diagnostics" >&2
if [ -n "$cal" ]; then
  printf '%s-%s' "$account" "$cal"
elif [ "$account" = personal ]; then
  printf 'P-DATA'
elif [ "$account" = work ]; then
  printf 'W-DATA'
else
  printf 'OTHER'
fi
"#;

struct Stub {
    dir: TempDir,
    tool: PathBuf,
}

impl Stub {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("gog-stub");
        std::fs::write(&tool, STUB_TOOL).unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        Stub { dir, tool }
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    fn calls(&self) -> Vec<String> {
        match std::fs::read_to_string(self.log_path()) {
            Ok(log) => log.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        fetch_events(self.dir.path())
            .arg("--tool")
            .arg(&self.tool)
            .args(args)
            .env("STUB_LOG", self.log_path())
            .output()
            .unwrap()
    }
}

fn fetch_events(config_home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fetch_events"));
    command
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("FETCH_EVENTS_TOOL")
        .env_remove("FETCH_EVENTS_MAX_RESULTS")
        .env_remove("FETCH_EVENTS_LOG");
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_personal_and_work_sections() {
    let stub = Stub::new();
    let output = stub.run(&["personal", "work", "2026-02-20", "2026-02-20"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "===PERSONAL===\nP-DATA\n===WORK===\nW-DATA\n");
    assert!(!stderr(&output).contains("stub diagnostics"));

    let mut calls = stub.calls();
    calls.sort();
    assert_eq!(
        calls,
        [
            "calendar events --account personal --from 2026-02-20 --to 2026-02-20 --max 50 --json",
            "calendar events --account work --from 2026-02-20 --to 2026-02-20 --max 50 --json",
        ]
    );
}

#[test]
fn test_extra_calendar_section() {
    let stub = Stub::new();
    let output = stub.run(&["personal", "work", "2026-02-20", "2026-02-20", "work:cal123"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "===PERSONAL===\nP-DATA\n===WORK===\nW-DATA\n===EXTRA:cal123===\nwork-cal123\n"
    );
    assert!(stub.calls().contains(
        &"calendar events cal123 --account work --from 2026-02-20 --to 2026-02-20 --max 50 --json".to_string()
    ));
}

#[test]
fn test_malformed_extras_are_skipped_with_warning() {
    let stub = Stub::new();
    let output = stub.run(&[
        "me@gmail.com",
        "me@company.com",
        "2026-02-19T00:00:00Z",
        "2026-02-19T23:59:59Z",
        "personal:family",
        "broken",
        "team@example.com:shared",
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    let markers: Vec<&str> = out.lines().filter(|l| l.starts_with("===")).collect();
    assert_eq!(
        markers,
        ["===PERSONAL===", "===WORK===", "===EXTRA:family===", "===EXTRA:shared==="]
    );
    assert!(out.contains("===EXTRA:family===\nme@gmail.com-family\n"));
    assert!(out.contains("===EXTRA:shared===\nteam@example.com-shared\n"));
    assert!(!out.contains("Warning"));

    let warnings: Vec<String> = stderr(&output)
        .lines()
        .filter(|l| l.starts_with("Warning:"))
        .map(str::to_string)
        .collect();
    assert_eq!(
        warnings,
        ["Warning: skipping invalid extra calendar 'broken' (expected account:calendarId)"]
    );
    assert_eq!(stub.calls().len(), 4);
}

#[test]
fn test_too_few_arguments_prints_usage() {
    let stub = Stub::new();
    let output = stub.run(&["personal", "work", "2026-02-20"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"));
    assert_eq!(stdout(&output), "");
    assert!(stub.calls().is_empty());
}

#[test]
fn test_missing_tool_prints_empty_sections() {
    let dir = TempDir::new().unwrap();
    let output = fetch_events(dir.path())
        .args(["--tool", "/nonexistent/gog", "personal", "work", "2026-02-20", "2026-02-20"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "===PERSONAL===\n\n===WORK===\n\n");
}

#[test]
fn test_max_results_flag_and_env() {
    let stub = Stub::new();
    let output = fetch_events(stub.dir.path())
        .args(["--max", "5"])
        .arg("--tool")
        .arg(&stub.tool)
        .args(["personal", "work", "a", "b"])
        .env("STUB_LOG", stub.log_path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stub.calls().iter().all(|c| c.contains("--max 5 --json")));

    let stub = Stub::new();
    let output = fetch_events(stub.dir.path())
        .env("FETCH_EVENTS_TOOL", &stub.tool)
        .env("FETCH_EVENTS_MAX_RESULTS", "7")
        .args(["personal", "work", "a", "b"])
        .env("STUB_LOG", stub.log_path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "===PERSONAL===\nP-DATA\n===WORK===\nW-DATA\n");
    assert!(stub.calls().iter().all(|c| c.contains("--max 7 --json")));
}

#[test]
fn test_tool_reads_inherited_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("prompting-tool");
    std::fs::write(
        &tool,
        "#!/bin/sh\nif [ \"$4\" = personal ]; then IFS= read -r answer; printf '%s' \"$answer\"; else printf 'W'; fi\n",
    )
    .unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut child = fetch_events(dir.path())
        .arg("--tool")
        .arg(&tool)
        .args(["personal", "work", "a", "b"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"from-stdin\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "===PERSONAL===\nfrom-stdin\n===WORK===\nW\n");
}

#[test]
fn test_invalid_config_env_still_fetches() {
    let stub = Stub::new();
    let output = fetch_events(stub.dir.path())
        .env("FETCH_EVENTS_MAX_RESULTS", "abc")
        .arg("--tool")
        .arg(&stub.tool)
        .args(["personal", "work", "a", "b"])
        .env("STUB_LOG", stub.log_path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "===PERSONAL===\nP-DATA\n===WORK===\nW-DATA\n");
    assert!(stub.calls().iter().all(|c| c.contains("--max 50 --json")));
}
