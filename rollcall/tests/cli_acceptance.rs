//! CLI acceptance tests
//!
//! These run the built `rollcall` binary against snapshot files in a
//! sandboxed home, so config and log paths never touch the real user
//! environment.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use chrono::{Duration, TimeZone, Utc};
use rollcall_core::store::{NewAttendance, NewMember, NewSession, Store};
use rollcall_core::types::{AttendanceStatus, Role, SessionKind, SessionStatus, UserSnapshot};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write_snapshot(&self, store: &Store) -> PathBuf {
        let path = self.home.join("snapshot.json");
        fs::write(&path, store.to_json_string().expect("snapshot serializes"))
            .expect("failed to write snapshot");
        path
    }
}

fn run_rollcall(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("rollcall"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .expect("failed to execute rollcall")
}

fn seeded_store() -> Store {
    let mut store = Store::new();
    let creator = UserSnapshot {
        id: "creator-1".to_string(),
        name: "Dana Admin".to_string(),
        email: "dana@example.edu".to_string(),
        role: Role::SystemAdmin,
    };
    let member = store.add_member(NewMember {
        department: "Science".to_string(),
        user: creator.clone(),
        minor: false,
        guardian: None,
    });
    // 2025-11-16 is a Sunday.
    let starts_at = Utc.with_ymd_and_hms(2025, 11, 16, 9, 0, 0).unwrap();
    let session = store.add_session(NewSession {
        kind: SessionKind::CheckIn,
        name: "Morning Lecture".to_string(),
        department: "Science".to_string(),
        location: "Hall B".to_string(),
        starts_at,
        ends_at: starts_at + Duration::hours(2),
        expected_attendees: 30,
        status: SessionStatus::Active,
        created_by: creator,
    });
    store
        .add_attendance(NewAttendance {
            member_id: member.id.clone(),
            session_id: session.id,
            members: Some(vec![member.id]),
            date: "2025-11-16".to_string(),
            arrived_at: starts_at - Duration::minutes(10),
            departed_at: None,
            status: AttendanceStatus::Present,
        })
        .expect("references resolve");
    store
}

#[test]
fn test_chart_over_empty_snapshot_prints_all_seven_days() {
    let env = CliTestEnv::new();
    let path = env.write_snapshot(&Store::new());

    let output = run_rollcall(&env, &["chart", "--input", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    for day in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        assert!(stdout.contains(day), "missing {} in:\n{}", day, stdout);
    }
}

#[test]
fn test_chart_json_reflects_seeded_record() {
    let env = CliTestEnv::new();
    let path = env.write_snapshot(&seeded_store());

    let output = run_rollcall(&env, &["chart", "--input", path.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let series: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("chart output is JSON");
    assert_eq!(series.as_array().map(Vec::len), Some(7));
    assert_eq!(series[0]["day"], "Sun");
    assert_eq!(series[0]["present"], 1);
    assert_eq!(series[0]["expected"], 1);
}

#[test]
fn test_early_lists_seeded_arrival() {
    let env = CliTestEnv::new();
    let path = env.write_snapshot(&seeded_store());

    let output = run_rollcall(&env, &["early", "--input", path.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Morning Lecture"), "unexpected output:\n{}", stdout);
}

#[test]
fn test_missing_snapshot_fails_with_context() {
    let env = CliTestEnv::new();

    let output = run_rollcall(&env, &["summary", "--input", "/nonexistent/snapshot.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read snapshot"), "stderr:\n{}", stderr);
}
