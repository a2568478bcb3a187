#![allow(clippy::unwrap_used, clippy::expect_used)]
//! `specscout discover`, `batch` and `check` against a mock Messages API

mod common;

use common::{mount_answer, mount_document, specscout_cmd, with_reasoning};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn widgets_answer(spec_url: &str) -> String {
    json!({
        "download_url": spec_url,
        "version": "1.2.0",
        "format": "yaml",
        "versioning_strategy": "release-tag",
        "github_info": {"owner": "acme", "repo": "widgets-oai", "path": "openapi.yaml"},
        "confidence": "high",
        "reasoning": "Linked from the API reference."
    })
    .to_string()
}

async fn site() -> MockServer {
    let server = MockServer::start().await;
    mount_document(&server, "/docs", 200, "<h1>Widgets API</h1>").await;
    mount_document(&server, "/openapi.yaml", 200, "openapi: 3.0.0\n").await;
    server
}

#[tokio::test]
async fn discover_prints_location_json() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    let spec_url = format!("{}/openapi.yaml", docs.uri());
    mount_answer(&llm, &format!("```json\n{}\n```", widgets_answer(&spec_url))).await;

    let mut cmd = specscout_cmd(config_dir.path());
    with_reasoning(&mut cmd, &llm);
    let output = cmd
        .args(["discover", "acme", "widgets", &format!("{}/docs", docs.uri())])
        .args(["--verify", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["download_url"], spec_url.as_str());
    assert_eq!(body["version"], "1.2.0");
    assert_eq!(body["versioning_strategy"], "release-tag");
    assert_eq!(body["github_info"]["repo"], "widgets-oai");
    assert_eq!(body["confidence"], "high");
    assert_eq!(body["verification"]["valid"], true);
}

#[tokio::test]
async fn discover_sends_api_key_and_hints() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "{}"}]
        })))
        .expect(1)
        .mount(&llm)
        .await;

    let mut cmd = specscout_cmd(config_dir.path());
    with_reasoning(&mut cmd, &llm);
    cmd.args(["discover", "acme", "widgets", &format!("{}/docs", docs.uri())])
        .args(["--hint", "Check API reference", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"confidence\": \"low\""));

    let requests = llm.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("- Check API reference"));
    assert!(prompt.contains("<h1>Widgets API</h1>"));
}

#[tokio::test]
async fn discover_registry_entry() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    mount_answer(&llm, &widgets_answer("https://example.invalid/openapi.yaml")).await;

    let mut cmd = specscout_cmd(config_dir.path());
    with_reasoning(&mut cmd, &llm);
    let output = cmd
        .args(["discover", "acme", "widgets", &format!("{}/docs", docs.uri())])
        .args(["--registry", "-f", "json"])
        .output()
        .unwrap();

    let entry: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entry["id"], "acme-widgets");
    assert_eq!(entry["discovery_mode"], "hybrid");
    assert_eq!(entry["sources"]["github"]["spec_path"], "openapi.yaml");
    assert_eq!(entry["version_tracking"]["last_known_version"], "1.2.0");
    assert!(entry.get("verification").is_none());
}

#[tokio::test]
async fn discover_without_api_key_degrades() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing x-api-key"))
        .mount(&llm)
        .await;

    let output = specscout_cmd(config_dir.path())
        .env("ANTHROPIC_BASE_URL", llm.uri())
        .args(["discover", "acme", "widgets", &format!("{}/docs", docs.uri()), "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["download_url"], "");
    assert_eq!(body["confidence"], "low");
    assert!(body["reasoning"].as_str().unwrap().contains("401"));
}

#[test]
fn discover_requires_documentation_url() {
    let config_dir = tempdir().unwrap();
    specscout_cmd(config_dir.path())
        .args(["discover", "acme", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<DOCUMENTATION_URL>"));
}

#[tokio::test]
async fn batch_keeps_manifest_order() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    mount_answer(&llm, &widgets_answer("https://example.invalid/openapi.yaml")).await;

    let manifest = config_dir.path().join("targets.toml");
    std::fs::write(
        &manifest,
        format!(
            "[[targets]]\nvendor = \"acme\"\napi = \"widgets\"\ndocumentation_url = \"{0}/docs\"\n\n\
             [[targets]]\nvendor = \"globex\"\napi = \"billing\"\ndocumentation_url = \"{0}/docs\"\n",
            docs.uri()
        ),
    )
    .unwrap();

    let mut cmd = specscout_cmd(config_dir.path());
    with_reasoning(&mut cmd, &llm);
    let output = cmd
        .arg("batch")
        .arg(&manifest)
        .args(["--concurrency", "2", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["generated"].is_string());
    let ids: Vec<&str> = report["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["acme-widgets", "globex-billing"]);
}

#[tokio::test]
async fn check_confirms_known_repository() {
    let config_dir = tempdir().unwrap();
    let docs = site().await;
    let llm = MockServer::start().await;
    mount_answer(&llm, &widgets_answer("https://example.invalid/openapi.yaml")).await;

    let mut cmd = specscout_cmd(config_dir.path());
    with_reasoning(&mut cmd, &llm);
    let output = cmd
        .args(["check", "acme", "widgets", &format!("{}/docs", docs.uri())])
        .args(["--owner", "Acme", "--repo", "widgets-oai", "-f", "json"])
        .output()
        .unwrap();

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "confirmed");
    assert_eq!(report["found"]["owner"], "acme");
}
