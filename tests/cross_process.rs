//! Cross-process lock scenarios driven through the `flockguard` binary.
//!
//! Each holder is a separate `flockguard probe` process. Tests wait for a
//! holder's milestone line on stdout before starting the next holder, so the
//! ordering does not depend on sleeps alone.

#![cfg(unix)]

use flockguard::events::{EventAction, read_events};
use serial_test::serial;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// One time unit of the scenarios, in milliseconds.
const UNIT_MS: u64 = 400;

fn units(n: u64) -> String {
    format!("{}ms", n * UNIT_MS)
}

struct Holder {
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl Holder {
    fn spawn(args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_flockguard"))
            .arg("probe")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn flockguard probe");
        let stdout = BufReader::new(child.stdout.take().unwrap());
        Self { child, stdout }
    }

    fn next_line(&mut self) -> String {
        let mut line = String::new();
        self.stdout.read_line(&mut line).unwrap();
        line.trim_end().to_string()
    }

    fn finish(mut self) -> (i32, String) {
        let mut rest = String::new();
        self.stdout.read_to_string(&mut rest).unwrap();
        let status = self.child.wait().unwrap();
        (status.code().unwrap(), rest)
    }
}

fn probe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flockguard"))
        .arg("probe")
        .args(args)
        .output()
        .expect("failed to run flockguard probe")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
#[serial]
fn exclusive_holder_excludes_nonblocking_contender() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let lock = path_str(&lock);

    let mut a = Holder::spawn(&[lock, "exclusive", "blocking", &units(2)]);
    assert_eq!(a.next_line(), "LOCKED_EXCLUSIVE");

    let b = probe(&[lock, "exclusive", "nonblocking", "0"]);
    assert_eq!(b.status.code(), Some(1));
    let b_out = String::from_utf8(b.stdout).unwrap();
    assert!(b_out.starts_with("LOCK_FAILED: "), "got {:?}", b_out);
    assert!(b_out.contains("Resource temporarily unavailable"), "got {:?}", b_out);

    let c = probe(&[lock, "shared", "nonblocking", "0"]);
    assert_eq!(c.status.code(), Some(1));

    let (code, rest) = a.finish();
    assert_eq!(code, 0);
    assert_eq!(rest, "UNLOCKED\n");

    let d = probe(&[lock, "exclusive", "nonblocking", "0"]);
    assert_eq!(d.status.code(), Some(0));
    assert_eq!(String::from_utf8(d.stdout).unwrap(), "LOCKED_EXCLUSIVE\nUNLOCKED\n");
}

#[test]
#[serial]
fn shared_holders_coexist() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let lock = path_str(&lock);

    let mut a = Holder::spawn(&[lock, "shared", "nonblocking", &units(2)]);
    assert_eq!(a.next_line(), "LOCKED_SHARED");

    let b = probe(&[lock, "shared", "nonblocking", "0"]);
    assert_eq!(b.status.code(), Some(0));
    assert_eq!(String::from_utf8(b.stdout).unwrap(), "LOCKED_SHARED\nUNLOCKED\n");

    let (code, rest) = a.finish();
    assert_eq!(code, 0);
    assert_eq!(rest, "UNLOCKED\n");
}

#[test]
#[serial]
fn blocking_contender_waits_for_release() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let events = temp_dir.path().join("events.ndjson");
    let lock = path_str(&lock);
    let events = path_str(&events);

    let mut a = Holder::spawn(&[lock, "exclusive", "blocking", &units(2), "--events", events]);
    assert_eq!(a.next_line(), "LOCKED_EXCLUSIVE");

    let b = probe(&[lock, "exclusive", "blocking", "0", "--events", events]);
    assert_eq!(b.status.code(), Some(0));
    assert_eq!(String::from_utf8(b.stdout).unwrap(), "LOCKED_EXCLUSIVE\nUNLOCKED\n");

    let (code, _) = a.finish();
    assert_eq!(code, 0);

    // B could only lock once A's hold was over.
    let log = read_events(Path::new(events)).unwrap();
    assert_eq!(log.len(), 4);
    let a_pid = log[0].pid;
    assert_eq!(log[0].action, EventAction::Locked);
    let b_locked = log
        .iter()
        .find(|e| e.pid != a_pid && e.action == EventAction::Locked)
        .unwrap();
    let gap = b_locked.ts.signed_duration_since(log[0].ts);
    assert!(gap.num_milliseconds() >= (2 * UNIT_MS) as i64 - 10, "gap {:?}", gap);
}

#[test]
#[serial]
fn released_lock_is_free_while_holder_lingers() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let lock = path_str(&lock);

    let mut a = Holder::spawn(&[lock, "exclusive", "blocking", &units(2), &units(5)]);
    assert_eq!(a.next_line(), "LOCKED_EXCLUSIVE");
    assert_eq!(a.next_line(), "UNLOCKED");

    let started = Instant::now();
    let b = probe(&[lock, "exclusive", "blocking", "0"]);
    let waited = started.elapsed();

    assert_eq!(b.status.code(), Some(0));
    assert_eq!(String::from_utf8(b.stdout).unwrap(), "LOCKED_EXCLUSIVE\nUNLOCKED\n");
    assert!(waited < Duration::from_millis(3 * UNIT_MS), "waited {:?}", waited);
    assert!(a.child.try_wait().unwrap().is_none(), "holder A should still be lingering");

    let (code, rest) = a.finish();
    assert_eq!(code, 0);
    assert_eq!(rest, "");
}

#[test]
#[serial]
fn killed_holder_releases_its_lock() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let lock = path_str(&lock);

    let mut a = Holder::spawn(&[lock, "exclusive", "blocking", "1m"]);
    assert_eq!(a.next_line(), "LOCKED_EXCLUSIVE");

    a.child.kill().unwrap();
    a.child.wait().unwrap();

    let b = probe(&[lock, "exclusive", "nonblocking", "0"]);
    assert_eq!(b.status.code(), Some(0));
}

#[test]
#[serial]
fn run_command_is_excluded_by_probe_holder() {
    let temp_dir = TempDir::new().unwrap();
    let lock = temp_dir.path().join("t.lock");
    let lock = path_str(&lock);

    let mut a = Holder::spawn(&[lock, "shared", "blocking", &units(2)]);
    assert_eq!(a.next_line(), "LOCKED_SHARED");

    let run = Command::new(env!("CARGO_BIN_EXE_flockguard"))
        .args(["run", "--nonblocking", lock, "--", "true"])
        .output()
        .unwrap();
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8(run.stderr).unwrap().contains("Error:"));

    let shared = Command::new(env!("CARGO_BIN_EXE_flockguard"))
        .args(["run", "--shared", "--nonblocking", lock, "--", "sh", "-c", "exit 3"])
        .output()
        .unwrap();
    assert_eq!(shared.status.code(), Some(3));

    let (code, _) = a.finish();
    assert_eq!(code, 0);
}

#[test]
fn directory_path_is_reported_as_lock_failure() {
    let temp_dir = TempDir::new().unwrap();

    let output = probe(&[path_str(temp_dir.path()), "exclusive", "nonblocking", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("LOCK_FAILED: "), "got {:?}", stdout);
    assert!(stdout.contains("Is a directory (EISDIR)"), "got {:?}", stdout);
}

#[test]
fn invalid_arguments_exit_with_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_flockguard"))
        .args(["probe", "/tmp/t.lock", "sideways", "blocking", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
