//! CLI Integration Tests
//!
//! These tests drive the `twwx` binary against a temporary database and a
//! temporary config path. No network access is needed: feed runs use
//! `--file` with documents written to the temp directory.
//!
//! ```
//! cargo test --package twwx-cli --test cli_integration
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Isolated environment: its own database and config file.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("data").join("weather.db")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_db(&self.db(), args)
    }

    fn run_with_db(&self, db: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_twwx"))
            .args(args)
            .arg("--db")
            .arg(db)
            .arg("--config")
            .arg(self.config())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "warn")
            .env_remove("TWWX_API_KEY")
            .env_remove("TWWX_DB")
            .env_remove("TWWX_CONFIG")
            .env_remove("TWWX_STYLE")
            .output()
            .expect("Failed to run twwx binary")
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args);
        assert!(output.status.success(), "{:?} failed: {}", args, stderr(&output));
        serde_json::from_slice(&output.stdout).expect("valid JSON output")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn feed_document(locations: &[(&str, &str, &str)]) -> String {
    let entries: Vec<serde_json::Value> = locations
        .iter()
        .map(|(name, min, max)| {
            serde_json::json!({
                "locationName": name,
                "weatherElement": [
                    {"elementName": "Wx", "time": [{"parameter": {"parameterName": "晴"}}]},
                    {"elementName": "MinT", "time": [{"startTime": "2025-01-01T06:00:00+08:00", "parameter": {"parameterName": min}}]},
                    {"elementName": "MaxT", "time": [{"parameter": {"parameterName": max}}]}
                ]
            })
        })
        .collect();
    serde_json::json!({"cwaopendata": {"dataset": {"location": entries}}}).to_string()
}

fn exists(path: &Path) -> bool {
    path.exists()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    for cmd in ["run", "latest", "history", "stats", "prune", "seed", "legend", "config"] {
        assert!(text.contains(cmd), "help should list {}", cmd);
    }
}

#[test]
fn test_version_command() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("twwx"));
}

// =============================================================================
// Seed and queries
// =============================================================================

#[test]
fn test_seed_creates_database() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["seed"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Inserted 20 sample records"));
    assert!(exists(&sandbox.db()));
}

#[test]
fn test_latest_after_seed() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());

    let latest = sandbox.json(&["latest", "--format", "json"]);
    let records = latest.as_array().expect("array");
    assert_eq!(records.len(), 20);
    // Ordered by region label, then location.
    assert_eq!(records[0]["region"], "Central");
    assert_eq!(records[19]["region"], "South");

    let east = sandbox.json(&["latest", "--region", "東部", "--format", "json"]);
    let names: Vec<_> = east
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["location"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"花蓮縣".to_string()));
    assert!(names.contains(&"臺東縣".to_string()));
}

#[test]
fn test_latest_text_output() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());

    let output = sandbox.run(&["latest", "--region", "Islands"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("澎湖縣"));
    assert!(text.contains("金門縣"));
    assert!(text.contains("連江縣"));
    assert!(!text.contains("臺北市"));
}

#[test]
fn test_latest_on_empty_store() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["latest"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No weather records found."));
}

#[test]
fn test_stats_after_seeding_twice() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());
    assert!(sandbox.run(&["seed"]).status.success());

    let stats = sandbox.json(&["stats", "--format", "json"]);
    assert_eq!(stats["total_records"], 40);
    assert_eq!(stats["unique_locations"], 20);
    assert_eq!(stats["min_temp"], 15.0);
    assert_eq!(stats["max_temp"], 32.5);
    assert!(stats["latest_update"].is_string());

    let latest = sandbox.json(&["latest", "--format", "json"]);
    assert_eq!(latest.as_array().map(Vec::len), Some(20));
}

#[test]
fn test_stats_on_empty_store() {
    let sandbox = Sandbox::new();
    let stats = sandbox.json(&["stats", "--format", "json"]);
    assert_eq!(stats["total_records"], 0);
    assert!(stats["latest_update"].is_null());
    assert!(stats["min_temp"].is_null());
}

#[test]
fn test_history_csv_for_location() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());
    assert!(sandbox.run(&["seed"]).status.success());

    let output = sandbox.run(&["history", "--location", "臺北市", "--format", "csv"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,location,region,min_temp"));
    assert!(lines[1].contains("臺北市"));
    assert!(lines[1].contains("多雲時晴"));
}

#[test]
fn test_history_limit_and_invalid_since() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());

    let limited = sandbox.json(&["history", "--limit", "5", "--format", "json"]);
    assert_eq!(limited.as_array().map(Vec::len), Some(5));

    let output = sandbox.run(&["history", "--since", "last tuesday"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid date format"));
}

#[test]
fn test_prune_keeps_recent_records() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());

    let output = sandbox.run(&["prune", "--days", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Deleted 0 records older than 1 days"));

    let stats = sandbox.json(&["stats", "--format", "json"]);
    assert_eq!(stats["total_records"], 20);
}

#[test]
fn test_prune_with_huge_retention() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["seed"]).status.success());

    let output = sandbox.run(&["prune", "--days", "5000000"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Deleted 0 records"));
}

#[test]
fn test_prune_rejects_zero_days() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["prune", "--days", "0"]);
    assert!(!output.status.success());
}

// =============================================================================
// Pipeline runs from saved documents
// =============================================================================

#[test]
fn test_run_from_file() {
    let sandbox = Sandbox::new();
    let feed = sandbox.write(
        "feed.json",
        &feed_document(&[("臺北市", "18", "25"), ("高雄市", "23", "31")]),
    );

    let summary = sandbox.json(&["run", "--file", feed.to_str().unwrap(), "--format", "json"]);
    assert_eq!(summary["fetched"], 2);
    assert_eq!(summary["stored"], 2);
    assert_eq!(summary["stats"]["total_records"], 2);

    let latest = sandbox.json(&["latest", "--format", "json"]);
    let first = &latest[0];
    assert_eq!(first["location"], "臺北市");
    assert_eq!(first["region"], "North");
    assert_eq!(first["description"], "晴");
    assert_eq!(first["forecast_time"], "2025-01-01T06:00:00+08:00");
    assert!(first["current_temp"].is_null());
}

#[test]
fn test_run_with_prune_reports_pruned() {
    let sandbox = Sandbox::new();
    let feed = sandbox.write("feed.json", &feed_document(&[("花蓮縣", "20", "27")]));

    let summary = sandbox.json(&[
        "run",
        "--file",
        feed.to_str().unwrap(),
        "--prune",
        "--format",
        "json",
    ]);
    assert_eq!(summary["pruned"], 0);
}

#[test]
fn test_run_parse_failure_exit_code() {
    let sandbox = Sandbox::new();
    let feed = sandbox.write("bad.json", r#"{"unexpected": true}"#);

    let output = sandbox.run(&["run", "--file", feed.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("parse failure"));
}

#[test]
fn test_run_fetch_failure_exit_code() {
    let sandbox = Sandbox::new();
    let missing = sandbox.dir.path().join("missing.json");

    let output = sandbox.run(&["run", "--file", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("fetch failure"));
}

#[test]
fn test_run_store_failure_exit_code() {
    let sandbox = Sandbox::new();
    let feed = sandbox.write("feed.json", &feed_document(&[("臺北市", "18", "25")]));
    let not_a_db = sandbox.dir.path().join("db_dir");
    std::fs::create_dir_all(&not_a_db).unwrap();

    let output = sandbox.run_with_db(&not_a_db, &["run", "--file", feed.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("store failure"));
}

#[test]
fn test_run_blank_document_is_fetch_failure() {
    let sandbox = Sandbox::new();
    let feed = sandbox.write("blank.json", "{}");

    let output = sandbox.run(&["run", "--file", feed.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("fetch failure"));
}

#[test]
fn test_run_requires_api_key() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["run"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No API key configured"));
}

// =============================================================================
// Config, legend, completions
// =============================================================================

#[test]
fn test_config_path_and_init() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["config", "path"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("config.toml"));

    let output = sandbox.run(&["config", "init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(exists(&sandbox.config()));

    // A second init refuses to overwrite.
    let output = sandbox.run(&["config", "init"]);
    assert!(!output.status.success());
    assert!(sandbox.run(&["config", "init", "--force"]).status.success());
}

#[test]
fn test_config_show_redacts_api_key() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.config().parent().unwrap()).unwrap();
    std::fs::write(
        sandbox.config(),
        "[feed]\napi_key = \"CWA-SECRET-KEY\"\n[retention]\ndays = 3\n",
    )
    .unwrap();

    let output = sandbox.run(&["config", "show"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(!text.contains("CWA-SECRET-KEY"));
    assert!(text.contains("days = 3"));
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.config().parent().unwrap()).unwrap();
    std::fs::write(sandbox.config(), "[retention]\ndays = 0\n").unwrap();

    let output = sandbox.run(&["stats"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("retention.days"));
}

#[test]
fn test_legend_lists_scale() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["legend"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("#0066CC"));
    assert!(text.contains("#CC0000"));
    assert!(text.contains("Comfortable"));
}

#[test]
fn test_completions_bash() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("twwx"));
}
