//! End-to-end tests for the `lxc-monitor` binary.
//!
//! Each test points the binary at a socket file inside a temporary
//! directory so that runs never collide with a real monitor.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use lxcmon_common::types::{ContainerState, Event, EventKind, MonitorAddress};
use lxcmon_monitor::channel::notify;

fn monitor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lxc-monitor"));
    let _ = cmd.env_remove("LXCMON_SOCKET").env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    monitor().args(args).output().expect("spawn lxc-monitor")
}

fn wait_for(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !path.exists() {
        assert!(Instant::now() < deadline, "monitor socket never appeared");
        thread::sleep(Duration::from_millis(20));
    }
}

fn spawn(args: &[&str]) -> Child {
    monitor()
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn lxc-monitor")
}

#[test]
fn missing_name_prints_usage_and_exits_1() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-n <NAME>"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn empty_name_exits_1() {
    let output = run(&["-n", ""]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_0() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn invalid_pattern_exits_before_opening_channel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("monitor.sock");
    let output = run(&["-n", "web(", "-s", socket.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'web('"), "stderr: {stderr}");
    assert!(!socket.exists());
}

#[test]
fn channel_open_failure_exits_1() {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("missing").join("monitor.sock");
    let output = run(&["-n", "web1", "-s", socket.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open monitor channel"), "stderr: {stderr}");
}

#[test]
fn invalid_log_priority_exits_1() {
    let output = run(&["-n", "web1", "-l", "loud"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid log priority"), "stderr: {stderr}");
}

#[test]
fn prints_state_changes_of_matching_containers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("monitor.sock");
    let log = dir.path().join("monitor.log");
    let mut child = spawn(&[
        "-n",
        "web.*",
        "-s",
        socket.to_str().unwrap(),
        "-o",
        log.to_str().unwrap(),
        "-l",
        "INFO",
    ]);
    wait_for(&socket);

    let address = MonitorAddress::Path(socket.clone());
    notify(&address, &Event::state_changed("web1", ContainerState::Starting)).expect("send");
    notify(&address, &Event::state_changed("db1", ContainerState::Running)).expect("send");
    let garbage = Event {
        name: "web1".into(),
        kind: EventKind::Unknown(77),
        value: 2,
    };
    notify(&address, &garbage).expect("send");
    notify(&address, &Event::state_changed("web-prod", ContainerState::Running)).expect("send");

    let mut stdout = BufReader::new(child.stdout.take().expect("stdout"));
    let mut first = String::new();
    let mut second = String::new();
    let _ = stdout.read_line(&mut first).expect("line 1");
    let _ = stdout.read_line(&mut second).expect("line 2");

    child.kill().expect("kill");
    let _ = child.wait().expect("wait");

    assert_eq!(first, "'web1' changed state to [STARTING]\n");
    assert_eq!(second, "'web-prod' changed state to [RUNNING]\n");
    assert!(log.exists());
}

#[test]
fn sigterm_removes_socket_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("monitor.sock");
    let mut child = spawn(&["-n", "web1", "-s", socket.to_str().unwrap()]);
    wait_for(&socket);
    // The handler learns the path just after the bind.
    thread::sleep(Duration::from_millis(100));

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("kill -TERM");
    assert!(status.success());

    let exit = child.wait().expect("wait");
    assert_eq!(exit.code(), Some(130));
    assert!(!socket.exists());
}

#[test]
fn restarts_over_socket_left_by_killed_monitor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket = dir.path().join("monitor.sock");

    let mut first = spawn(&["-n", "web1", "-s", socket.to_str().unwrap()]);
    wait_for(&socket);
    first.kill().expect("kill");
    let _ = first.wait().expect("wait");
    assert!(socket.exists());

    let mut second = spawn(&["-n", "web1", "-s", socket.to_str().unwrap()]);
    let address = MonitorAddress::Path(socket.clone());
    let deadline = Instant::now() + Duration::from_secs(5);
    while notify(&address, &Event::state_changed("web1", ContainerState::Running)).is_err() {
        assert!(Instant::now() < deadline, "restarted monitor never listened");
        thread::sleep(Duration::from_millis(20));
    }

    let mut stdout = BufReader::new(second.stdout.take().expect("stdout"));
    let mut line = String::new();
    let _ = stdout.read_line(&mut line).expect("line");
    second.kill().expect("kill");
    let _ = second.wait().expect("wait");

    assert_eq!(line, "'web1' changed state to [RUNNING]\n");
}
