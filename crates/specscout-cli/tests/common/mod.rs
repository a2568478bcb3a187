#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a `specscout` command isolated from the user's config and key.
///
/// `config_dir` holds a (possibly absent) `config.toml`.
#[allow(dead_code)]
pub fn specscout_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("specscout"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("SPECSCOUT_CONFIG", config_dir.join("config.toml"));
    cmd.env_remove("ANTHROPIC_API_KEY");
    cmd.env_remove("ANTHROPIC_BASE_URL");
    cmd.env_remove("ANTHROPIC_MODEL");
    cmd.env_remove("SPECSCOUT_OUTPUT_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Point a command at a mock Messages API.
#[allow(dead_code)]
pub fn with_reasoning(cmd: &mut Command, server: &MockServer) {
    cmd.env("ANTHROPIC_BASE_URL", server.uri());
    cmd.env("ANTHROPIC_API_KEY", "sk-test");
}

/// Mount a Messages API response whose text is `answer`.
#[allow(dead_code)]
pub async fn mount_answer(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": answer}],
            "stop_reason": "end_turn"
        })))
        .mount(server)
        .await;
}

/// Mount a spec document with both `HEAD` and `GET`.
#[allow(dead_code)]
pub async fn mount_document(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
        .mount(server)
        .await;
}
