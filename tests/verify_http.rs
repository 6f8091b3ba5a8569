use std::process::{Command, Output};

use assert_cmd::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run(mut cmd: Command) -> Output {
    cmd.env("RUST_LOG", "off");
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn openai_cli_accepts_valid_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer sk-good"))
        .and(header("openai-project", "proj_42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verify-openai-key-cli"));
    cmd.args(["--key", "sk-good", "--project", "proj_42", "--base-url"])
        .arg(format!("{}/v1/", server.uri()));

    let out = run(cmd).await;
    out.clone().assert().success();
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "ok: openai key valid (cli)\nstatus: 200\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn openai_cli_reads_key_from_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer sk-piped"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let server_uri = server.uri();
    let out = tokio::task::spawn_blocking(move || {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("verify-openai-key-cli"))
            .env("RUST_LOG", "off")
            .args(["--stdin", "--base-url", server_uri.as_str()])
            .write_stdin("sk-piped\n")
            .assert()
            .success()
            .get_output()
            .clone()
    })
    .await
    .unwrap();
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("ok: openai key valid (cli)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn anthropic_env_key_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("x-api-key", "sk-ant-bad"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"type":"error","error":{"type":"authentication_error"}}"#),
        )
        .mount(&server)
        .await;

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verify-anthropic-key"));
    cmd.env("ANTHROPIC_API_KEY", "sk-ant-bad")
        .env("MDE_SECRET_OVERRIDE", "0")
        .env("ANTHROPIC_BASE_URL", format!("{}/v1", server.uri()));

    let out = run(cmd).await;
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "error: anthropic key invalid (env)\nstatus: 401\nresponse: {\"type\":\"error\",\"error\":{\"type\":\"authentication_error\"}}\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn openai_env_key_with_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer sk-env"))
        .and(header("openai-project", "proj_env"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verify-openai-key"));
    cmd.env("OPENAI_API_KEY", "sk-env")
        .env("OPENAI_PROJECT", "proj_env")
        .env("MDE_SECRET_OVERRIDE", "0")
        .env("OPENAI_BASE_URL", server.uri());

    let out = run(cmd).await;
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "ok: openai key valid (env)\nstatus: 200\n"
    );
}
