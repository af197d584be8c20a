//! End-to-end runs of the `floodcast` binary against a temporary store.

mod common;

use common::{floodcast, run_json, stderr_of, stdout_of};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_score_json() {
    let dir = TempDir::new().unwrap();
    let json = run_json(&dir, &["score", "--rainfall", "35.2", "--elevation", "12.3"]);

    assert_eq!(json["result"]["risk_score"], 80.0);
    assert_eq!(json["result"]["severity"], "Critical");
    assert_eq!(json["result"]["rainfall_points"], 50.0);
    assert_eq!(json["result"]["elevation_points"], 30.0);
    assert_eq!(json["result"]["explanation"]["rainfall"], "high contribution");
}

#[test]
fn test_score_terminal_plain() {
    let dir = TempDir::new().unwrap();
    let assert = floodcast(&dir)
        .args(["score", "--rainfall", "0", "--elevation", "500"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Risk score: 15.0 / 100  (Low)"), "{}", stdout);
    assert!(stdout.contains("[200, ∞) m"));
}

#[test]
fn test_assess_without_readings_flags_missing_data() {
    let dir = TempDir::new().unwrap();
    let json = run_json(&dir, &["assess", "--lat", "51.5", "--lon=-0.12"]);

    assert_eq!(json["rainfall"]["source"], "unavailable");
    assert_eq!(json["elevation"]["source"], "unavailable");
    // 0 mm and 0 m: 10 + 40
    assert_eq!(json["result"]["risk_score"], 50.0);
}

#[test]
fn test_assess_rejects_bad_latitude() {
    let dir = TempDir::new().unwrap();
    let assert = floodcast(&dir)
        .args(["assess", "--lat", "123", "--lon", "0"])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("latitude"));
}

#[test]
fn test_batch_preserves_row_order() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rows.json");
    fs::write(
        &input,
        indoc! {r#"
            [
                {"rainfall_mm": 60, "elevation_m": 0},
                {"rainfall_mm": 0, "elevation_m": 500},
                {"elevation_m": 75}
            ]
        "#},
    )
    .unwrap();
    let output = dir.path().join("out").join("scores.json");

    floodcast(&dir)
        .args(["--format", "json", "batch"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    let severities: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["result"]["severity"].as_str().unwrap())
        .collect();
    assert_eq!(severities, vec!["Critical", "Low", "Medium"]);
}

#[test]
fn test_event_lifecycle() {
    let dir = TempDir::new().unwrap();
    let first = run_json(
        &dir,
        &[
            "events", "add", "--name", "Riverside", "--lat", "29.76", "--lon=-95.37",
            "--rainfall", "20", "--elevation", "75",
        ],
    );
    let second = run_json(
        &dir,
        &[
            "events", "add", "--name", "Harbor", "--lat", "29.70", "--lon=-95.30",
            "--rainfall", "55", "--elevation", "3", "--description", "storm surge",
        ],
    );
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
    assert_eq!(second["severity"], "Critical");

    let listed = run_json(&dir, &["events", "list"]);
    let ids: Vec<u64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);

    let critical = run_json(&dir, &["events", "list", "--severity", "critical"]);
    assert_eq!(critical.as_array().unwrap().len(), 1);

    run_json(&dir, &["events", "delete", "2"]);
    let third = run_json(
        &dir,
        &[
            "events", "add", "--name", "Uptown", "--lat", "29.80", "--lon=-95.40",
            "--rainfall", "1", "--elevation", "300",
        ],
    );
    assert_eq!(third["id"], 3);
}

#[test]
fn test_show_missing_event_fails() {
    let dir = TempDir::new().unwrap();
    let assert = floodcast(&dir)
        .args(["events", "show", "42"])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("flood event 42 not found"));
}

#[test]
fn test_list_limit_out_of_range() {
    let dir = TempDir::new().unwrap();
    floodcast(&dir)
        .args(["events", "list", "--limit", "501"])
        .assert()
        .failure();
}

#[test]
fn test_nearby_filters_by_box() {
    let dir = TempDir::new().unwrap();
    for (name, lat, lon) in [("Near", "10.0", "10.0"), ("Far", "11.0", "10.0")] {
        run_json(
            &dir,
            &[
                "events", "add", "--name", name, "--lat", lat, "--lon", lon, "--rainfall", "0",
                "--elevation", "0",
            ],
        );
    }
    let nearby = run_json(
        &dir,
        &["events", "nearby", "--lat", "10.01", "--lon", "10.0", "--radius-km", "5"],
    );
    let names: Vec<&str> = nearby
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["location_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Near"]);
}

#[test]
fn test_alerts_send_counts_deliveries() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &[
            "subscriptions", "add", "--email", "ops@example.com", "--phone", "+15550100",
            "--lat", "29.76", "--lon=-95.37", "--min-severity", "high",
        ],
    );
    let event = run_json(
        &dir,
        &[
            "events", "add", "--name", "Bayou", "--lat", "29.76", "--lon=-95.37",
            "--rainfall", "40", "--elevation", "5", "--no-notify",
        ],
    );
    let id = event["id"].as_u64().unwrap().to_string();

    let result = run_json(&dir, &["alerts", "send", &id]);
    assert_eq!(result["sms_sent"], 1);
    assert_eq!(result["emails_sent"], 1);
    assert_eq!(result["message"], "Notified 1 subscriptions");
}

#[test]
fn test_events_add_notifies_subscribers() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &[
            "subscriptions", "add", "--phone", "+15550100", "--lat", "29.76", "--lon=-95.37",
        ],
    );

    let assert = floodcast(&dir)
        .args([
            "-v", "events", "add", "--name", "Bayou", "--lat", "29.76", "--lon=-95.37",
            "--rainfall", "60", "--elevation", "2",
        ])
        .assert()
        .success();
    assert!(stderr_of(&assert).contains("SMS to +15550100"));

    let assert = floodcast(&dir)
        .args([
            "-v", "events", "add", "--name", "Bayou", "--lat", "29.76", "--lon=-95.37",
            "--rainfall", "60", "--elevation", "2", "--no-notify",
        ])
        .assert()
        .success();
    assert!(!stderr_of(&assert).contains("SMS to"));
}

#[test]
fn test_events_add_honours_auto_notify_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".floodcast.toml"),
        "[alerts]\nauto_notify = false\n",
    )
    .unwrap();
    run_json(
        &dir,
        &[
            "subscriptions", "add", "--email", "ops@example.com", "--lat", "29.76",
            "--lon=-95.37",
        ],
    );

    let assert = floodcast(&dir)
        .args([
            "-v", "events", "add", "--name", "Bayou", "--lat", "29.76", "--lon=-95.37",
            "--rainfall", "60", "--elevation", "2",
        ])
        .assert()
        .success();
    assert!(!stderr_of(&assert).contains("Email to"));
}

#[test]
fn test_alerts_send_without_subscribers() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &[
            "events", "add", "--name", "Lonely", "--lat", "0", "--lon", "0", "--rainfall", "60",
            "--elevation", "0",
        ],
    );
    let result = run_json(&dir, &["alerts", "send", "1"]);
    assert_eq!(result["message"], "No subscriptions found for this location");
    assert_eq!(result["sms_sent"], 0);
}

#[test]
fn test_subscription_requires_contact() {
    let dir = TempDir::new().unwrap();
    let assert = floodcast(&dir)
        .args(["subscriptions", "add", "--lat", "1", "--lon", "1"])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("contact"));
}

#[test]
fn test_subscription_update_and_inactive_listing() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &["subscriptions", "add", "--phone", "+15550123", "--lat", "1", "--lon", "1"],
    );
    let updated = run_json(&dir, &["subscriptions", "update", "1", "--active", "false"]);
    assert_eq!(updated[0]["active"], false);

    let active = run_json(&dir, &["subscriptions", "list"]);
    assert_eq!(active.as_array().unwrap().len(), 0);
    let all = run_json(&dir, &["subscriptions", "list", "--all"]);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_supplies_default_readings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".floodcast.toml"),
        indoc! {r#"
            [providers]
            rainfall_mm = 32.0
            elevation_m = 8.0
        "#},
    )
    .unwrap();

    let json = run_json(&dir, &["assess", "--lat", "0", "--lon", "0"]);
    assert_eq!(json["rainfall"]["source"], "provider");
    assert_eq!(json["result"]["risk_score"], 90.0);
}

#[test]
fn test_explicit_bad_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[alerts\nauto_notify = ").unwrap();

    floodcast(&dir)
        .arg("--config")
        .arg(&config)
        .args(["score", "--rainfall", "1", "--elevation", "1"])
        .assert()
        .failure();
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    floodcast(&dir).arg("init").assert().success();
    assert!(dir.path().join(".floodcast.toml").exists());

    let assert = floodcast(&dir)
        .arg("init")
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("already exists"));
    floodcast(&dir).args(["init", "--force"]).assert().success();
}
