//! End-to-end checks of `ApiCorrector` behind the orchestrator, against a
//! canned HTTP responder on localhost.

use std::sync::Arc;
use std::time::Duration;

use text_polisher::config::LlmConfig;
use text_polisher::correction::{normalize, CorrectionOrchestrator, CorrectionResult};
use text_polisher::credential::StaticCredentialStore;
use text_polisher::llm::{ApiCorrector, InstructionPreset};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const INPUT: &str = "this is bad , ok";

// ---------------------------------------------------------------------------
// Canned responder
// ---------------------------------------------------------------------------

/// Accept one connection, capture the request, reply with `status` + `body`.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// Read headers plus `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn orchestrator(base_url: &str, key: Option<&str>, timeout: Duration) -> CorrectionOrchestrator {
    let config = LlmConfig {
        base_url: base_url.to_string(),
        ..LlmConfig::default()
    };
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("client");

    CorrectionOrchestrator::new(
        Arc::new(ApiCorrector::with_client(&config, client)),
        Arc::new(StaticCredentialStore::new(key)),
        InstructionPreset::English.instruction(),
    )
}

fn local() -> CorrectionResult {
    CorrectionResult::success(normalize(INPUT))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_returns_remote_text_verbatim() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":" Fixed text "}}]}"#,
    )
    .await;

    let result = orchestrator(&url, Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, CorrectionResult::success("Fixed text"));

    let request = server.await.expect("server");
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /v1/chat/completions "));
    assert!(lower.contains("authorization: bearer sk-test"));
    assert!(request.contains(r#""role":"system""#));
    assert!(request.contains(&format!(r#""content":"{INPUT}""#)));
}

#[tokio::test]
async fn unauthorized_falls_back_to_local() {
    let (url, server) = serve_once(
        "401 Unauthorized",
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    )
    .await;

    let result = orchestrator(&url, Some("sk-wrong"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
    server.await.expect("server");
}

#[tokio::test]
async fn server_error_falls_back_to_local() {
    let (url, server) = serve_once("500 Internal Server Error", "{}").await;

    let result = orchestrator(&url, Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
    server.await.expect("server");
}

#[tokio::test]
async fn malformed_body_falls_back_to_local() {
    let (url, server) = serve_once("200 OK", "<html>gateway</html>").await;

    let result = orchestrator(&url, Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
    server.await.expect("server");
}

#[tokio::test]
async fn empty_choices_fall_back_to_local() {
    let (url, server) = serve_once("200 OK", r#"{"choices":[]}"#).await;

    let result = orchestrator(&url, Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
    server.await.expect("server");
}

#[tokio::test]
async fn blank_content_is_an_empty_success() {
    let (url, server) = serve_once("200 OK", r#"{"choices":[{"message":{"content":"  \n "}}]}"#).await;

    let result = orchestrator(&url, Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, CorrectionResult::success(""));
    server.await.expect("server");
}

#[tokio::test]
async fn connection_refused_falls_back_to_local() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = orchestrator(&format!("http://{addr}"), Some("sk-test"), Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
}

#[tokio::test]
async fn timeout_falls_back_to_local() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let _silent = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let result = orchestrator(&format!("http://{addr}"), Some("sk-test"), Duration::from_millis(300))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
}

#[tokio::test]
async fn no_key_never_contacts_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let result = orchestrator(&format!("http://{addr}"), None, Duration::from_secs(5))
        .correct(INPUT)
        .await;

    assert_eq!(result, local());
    let accepted = tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
    assert!(accepted.is_err(), "server should not have been contacted");
}

#[tokio::test]
async fn empty_input_is_the_only_failure() {
    let orch = orchestrator("http://127.0.0.1:9", Some("sk-test"), Duration::from_secs(1));
    assert!(!orch.correct("").await.is_success());
    assert!(!orch.correct("   ").await.is_success());
}
