use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("studyplan-{nanos}-{file_name}"))
}

fn run_session(store: &PathBuf, script: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_studyplan");
    let config = temp_path("session-config.json");

    let mut child = Command::new(exe)
        .env("STUDYPLAN_STORE_PATH", store)
        .env("STUDYPLAN_CONFIG_PATH", &config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .unwrap();

    let output = child.wait_with_output().expect("failed to wait for session");
    std::fs::remove_file(&config).ok();
    output
}

fn seed_two(path: &PathBuf) {
    let goals = serde_json::json!([
        { "id": 1, "subject": "Math", "topic": "limits", "date": "2024-05-01", "completed": false },
        { "id": 2, "subject": "Bio", "topic": "cells", "date": "2024-05-02", "completed": false }
    ]);
    std::fs::write(path, serde_json::to_string_pretty(&goals).unwrap()).unwrap();
}

fn persisted_ids(path: &PathBuf) -> Vec<u64> {
    let content = std::fs::read_to_string(path).unwrap();
    let goals: serde_json::Value = serde_json::from_str(&content).unwrap();
    goals
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn session_adds_and_lists_goals() {
    let store = temp_path("session-add.json");

    let output = run_session(
        &store,
        "add Math \"Integration by parts\" 2024-05-03\nlist\nexit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Goal created"));
    assert!(stdout.contains("Integration by parts"));
    assert!(stdout.contains("Total: 1"));
    assert_eq!(persisted_ids(&store), vec![1]);

    std::fs::remove_file(&store).ok();
}

#[test]
fn session_delete_requires_confirmation() {
    let store = temp_path("session-delete.json");
    seed_two(&store);

    let output = run_session(&store, "delete 1\ny\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete 'limits'"));
    assert!(stdout.contains("Goal removed"));
    assert_eq!(persisted_ids(&store), vec![2]);

    std::fs::remove_file(&store).ok();
}

#[test]
fn session_delete_can_be_cancelled() {
    let store = temp_path("session-cancel.json");
    seed_two(&store);

    let output = run_session(&store, "delete 1\nn\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete cancelled"));
    assert_eq!(persisted_ids(&store), vec![1, 2]);

    std::fs::remove_file(&store).ok();
}

#[test]
fn session_newest_delete_request_wins() {
    let store = temp_path("session-last-wins.json");
    seed_two(&store);

    let output = run_session(&store, "delete 1\ndelete 2\ny\nexit\n");

    assert!(output.status.success());
    assert_eq!(persisted_ids(&store), vec![1]);

    std::fs::remove_file(&store).ok();
}

#[test]
fn session_toggle_then_stats() {
    let store = temp_path("session-toggle.json");
    seed_two(&store);

    let output = run_session(&store, "toggle 1\nstats\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completed goal"));
    assert!(stdout.contains("50%"));

    std::fs::remove_file(&store).ok();
}

#[test]
fn session_reports_parse_errors_and_continues() {
    let store = temp_path("session-badcmd.json");

    let output = run_session(&store, "frobnicate\nhelp\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stderr.contains("ERROR:"));
    assert!(stdout.contains("Usage"));
}
