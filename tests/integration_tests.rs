// Integration tests: HTTP endpoints over an in-memory source

mod common;

use axum_test::TestServer;
use common::{GB, daily_series};
use disk_analyser::config::AppConfig;
use disk_analyser::models::*;
use disk_analyser::routes;
use disk_analyser::source::MemorySource;
use std::sync::Arc;

const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/test.db"
max_pool_size = 2
"#;

fn test_app() -> axum::Router {
    let config = AppConfig::load_from_str(TEST_CONFIG).unwrap();
    let source = MemorySource::new()
        .with_snapshot(
            Snapshot::with_used_bytes("web01", "/", 100.0 * GB, 90.0 * GB).with_triggers(0, 1),
        )
        .with_snapshot(Snapshot::with_percent_used("db01", "", 1024.0 * GB, 25.0))
        .with_history("web01", "/", MetricType::Used, daily_series(0, 10, 80.0, 1.0));
    routes::app(Arc::new(source), config)
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = TestServer::new(test_app());
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Disk Analyser");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = TestServer::new(test_app());
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("disk-analyser")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_disk_analysis_endpoint() {
    let server = TestServer::new(test_app());
    let response = server.get("/api/disk-analysis").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();

    let filesystems = json["filesystems"].as_array().unwrap();
    assert_eq!(filesystems.len(), 2);

    let web = filesystems
        .iter()
        .find(|f| f["host"] == "web01")
        .unwrap();
    assert_eq!(web["totalSpace"], "100 GB");
    assert_eq!(web["usedSpace"], "90 GB");
    assert_eq!(web["usagePct"], 90.0);
    assert_eq!(web["growthRate"], 1.0);
    assert_eq!(web["daysUntilFull"], "10 days");
    assert_eq!(web["daysUntilFullValue"], 10);
    assert_eq!(web["riskBucket"], "days");
    assert_eq!(web["severity"], "warning");
    assert_eq!(web["fsWarnings"], 1);

    let db = filesystems.iter().find(|f| f["host"] == "db01").unwrap();
    assert_eq!(db["mount"], "/");
    assert_eq!(db["totalSpace"], "1 TB");
    assert_eq!(db["daysUntilFull"], "Stable");
    assert!(db["daysUntilFullValue"].is_null());

    let summary = &json["summary"];
    assert_eq!(summary["totalStorage"], "1.1 TB");
    assert_eq!(summary["avgGrowth"], "0.5 GB/day");
    assert_eq!(summary["growthAggregation"], "mean");
    let risky = summary["riskyFilesystems"].as_array().unwrap();
    assert_eq!(risky.len(), 1);
    assert_eq!(risky[0]["host"], "web01");
}

#[tokio::test]
async fn test_disk_analysis_host_filter() {
    let server = TestServer::new(test_app());
    let response = server
        .get("/api/disk-analysis")
        .add_query_param("host", "db")
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    let filesystems = json["filesystems"].as_array().unwrap();
    assert_eq!(filesystems.len(), 1);
    assert_eq!(filesystems[0]["host"], "db01");
    assert!(json["summary"]["riskyFilesystems"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_disk_analysis_exact_hosts() {
    let server = TestServer::new(test_app());
    let response = server
        .get("/api/disk-analysis")
        .add_query_param("hosts", "web01, nope")
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["filesystems"].as_array().unwrap().len(), 1);
}
