use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("studyplan-{nanos}-{file_name}"))
}

fn run_theme(store: &PathBuf, config: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_studyplan");
    Command::new(exe)
        .args(args)
        .env("STUDYPLAN_STORE_PATH", store)
        .env("STUDYPLAN_CONFIG_PATH", config)
        .output()
        .expect("failed to run theme command")
}

fn persisted_theme(config: &PathBuf) -> String {
    let content = std::fs::read_to_string(config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["theme"].as_str().unwrap().to_string()
}

#[test]
fn theme_toggles_between_light_and_dark() {
    let store = temp_path("theme-store.json");
    let config = temp_path("theme-config.json");

    let output = run_theme(&store, &config, &["theme"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Theme set to dark"));
    assert_eq!(persisted_theme(&config), "dark");

    let output = run_theme(&store, &config, &["theme"]);
    assert!(output.status.success());
    assert_eq!(persisted_theme(&config), "light");

    std::fs::remove_file(&config).ok();
}

#[test]
fn theme_sets_explicit_value_idempotently() {
    let store = temp_path("theme-set-store.json");
    let config = temp_path("theme-set-config.json");

    for _ in 0..2 {
        let output = run_theme(&store, &config, &["theme", "dark"]);
        assert!(output.status.success());
        assert_eq!(persisted_theme(&config), "dark");
    }

    std::fs::remove_file(&config).ok();
}

#[test]
fn theme_rejects_unknown_names() {
    let store = temp_path("theme-bad-store.json");
    let config = temp_path("theme-bad-config.json");

    let output = run_theme(&store, &config, &["theme", "solarized"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("light or dark"));
    assert!(!config.exists());
}

#[test]
fn dark_theme_colors_list_output() {
    let store = temp_path("theme-color-store.json");
    let config = temp_path("theme-color-config.json");
    let goals = serde_json::json!([
        { "id": 1, "subject": "Math", "topic": "limits", "date": "2024-05-01", "completed": false }
    ]);
    std::fs::write(&store, serde_json::to_string_pretty(&goals).unwrap()).unwrap();
    std::fs::write(&config, "{\"theme\":\"dark\"}").unwrap();

    let output = run_theme(&store, &config, &["list"]);

    std::fs::remove_file(&store).ok();
    std::fs::remove_file(&config).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b["));
}
