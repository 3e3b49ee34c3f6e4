//! Server dispatch over real client↔server round trips.

use super::test_helpers::{call_blocking, start_server};

#[tokio::test]
async fn about_returns_the_configured_banner() {
    let (addr, ct, _handle) = start_server(&[]).await;

    let response = call_blocking(addr, "about").await.expect("round trip");
    assert!(response.is_result());
    assert_eq!(response.summary(), "bridge under test");

    ct.cancel();
}

#[tokio::test]
async fn unknown_command_is_reported_through_error_field() {
    let (addr, ct, _handle) = start_server(&[]).await;

    let response = call_blocking(addr, "frobnicate").await.expect("round trip");
    assert!(!response.is_result());
    assert_eq!(
        response.error.as_deref(),
        Some("unknown command: frobnicate")
    );

    ct.cancel();
}

#[cfg(unix)]
#[tokio::test]
async fn registered_alias_runs_and_captures_output() {
    let (addr, ct, _handle) = start_server(&[("greet", "echo hello")]).await;

    let response = call_blocking(addr, "greet").await.expect("round trip");
    assert!(response.is_result());

    let payload = response.result.expect("payload present");
    assert_eq!(payload["status"], 0);
    assert_eq!(payload["stdout"].as_str().map(str::trim), Some("hello"));
    assert_eq!(payload["stderr"], "");

    ct.cancel();
}

#[tokio::test]
async fn alias_with_missing_program_reports_exec_error() {
    let (addr, ct, _handle) =
        start_server(&[("broken", "definitely-not-a-real-program-xyz")]).await;

    let response = call_blocking(addr, "broken").await.expect("round trip");
    assert!(!response.is_result());
    let message = response.error.expect("error present");
    assert!(message.contains("failed to spawn"), "got: {message}");

    ct.cancel();
}

#[tokio::test]
async fn invalid_json_request_gets_an_error_reply() {
    let (addr, ct, _handle) = start_server(&[]).await;

    let reply = tokio::task::spawn_blocking(move || {
        use std::io::{BufRead, BufReader, Write};
        let mut stream = std::net::TcpStream::connect(addr).expect("connect");
        stream.write_all(b"not json\n").expect("send garbage");
        let mut line = String::new();
        BufReader::new(stream).read_line(&mut line).expect("read reply");
        line
    })
    .await
    .expect("client task joins");

    assert!(reply.contains("invalid json"), "got: {reply}");
    assert!(reply.contains("\"error\""), "got: {reply}");

    ct.cancel();
}

#[tokio::test]
async fn each_call_is_an_independent_exchange() {
    let (addr, ct, _handle) = start_server(&[]).await;

    let first = call_blocking(addr, "about").await.expect("first call");
    let second = call_blocking(addr, "about").await.expect("second call");
    assert_eq!(first.summary(), second.summary());

    ct.cancel();
}
