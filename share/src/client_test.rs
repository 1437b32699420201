use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;

/// Answer exactly one HTTP request with a canned response; returns the base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> ShareClient {
    ShareClient::new(&ShareConfig { base_url, request_timeout_secs: 5, connect_timeout_secs: 5 }).unwrap()
}

#[test]
fn retryable_classification() {
    assert!(ShareError::Status { status: 503, body: String::new() }.retryable());
    assert!(ShareError::Status { status: 500, body: String::new() }.retryable());
    assert!(!ShareError::Status { status: 400, body: String::new() }.retryable());
    assert!(!ShareError::Status { status: 413, body: String::new() }.retryable());
    assert!(!ShareError::Malformed("x".into()).retryable());
}

#[test]
fn new_trims_trailing_slash() {
    assert_eq!(client("http://127.0.0.1:3000/".into()).base_url(), "http://127.0.0.1:3000");
}

#[tokio::test]
async fn share_returns_view_link() {
    let base = serve_once("200 OK", r#"{"id":"0123456789ab"}"#).await;
    let link = client(base.clone()).share("<svg/>").await.unwrap();
    assert_eq!(link.id, "0123456789ab");
    assert_eq!(link.url, format!("{base}/view/0123456789ab"));
}

#[tokio::test]
async fn server_error_is_retryable_status() {
    let base = serve_once("503 Service Unavailable", r#"{"error":"busy"}"#).await;
    let err = client(base).share("<svg/>").await.unwrap_err();
    assert!(matches!(err, ShareError::Status { status: 503, .. }));
    assert!(err.retryable());
}

#[tokio::test]
async fn client_error_is_not_retryable() {
    let base = serve_once("400 Bad Request", "").await;
    let err = client(base).share("not svg").await.unwrap_err();
    assert!(matches!(err, ShareError::Status { status: 400, .. }));
    assert!(!err.retryable());
}

#[tokio::test]
async fn url_only_response_is_malformed() {
    let base = serve_once("200 OK", r#"{"url":"https://blob.test/a.svg"}"#).await;
    let err = client(base).share("<svg/>").await.unwrap_err();
    assert!(matches!(err, ShareError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_server_is_retryable_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(format!("http://{addr}")).share("<svg/>").await.unwrap_err();
    assert!(matches!(err, ShareError::Request(_)));
    assert!(err.retryable());
}
