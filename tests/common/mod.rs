//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use statuspage_exporter::config::ExporterConfig;
use statuspage_exporter::probe::ProbeEngine;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// statuspage.io style summary with a degraded page.
#[allow(dead_code)]
pub const DEGRADED_SUMMARY: &str = r#"{
    "overall": "degraded_performance",
    "components": [
        {"name": "API", "status": "operational"},
        {"name": "CDN", "status": "major_outage"}
    ]
}"#;

/// Start a programmable status page on an ephemeral port.
///
/// `f` receives the request path and returns the status code and body.
pub async fn start_status_page<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        serve_one(socket, f.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Status page that always answers with the same document.
#[allow(dead_code)]
pub async fn start_static_page(body: &'static str) -> SocketAddr {
    start_status_page(move |_| async move { (200, body.to_string()) }).await
}

async fn serve_one<F, Fut>(mut socket: TcpStream, f: &F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = (u16, String)>,
{
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") && head.len() < 16 * 1024 {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let path = String::from_utf8_lossy(&head)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let (status, body) = f(path).await;
    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Configuration with short timeouts and fast backoff.
pub fn test_config(retry_count: u32, backoff_base_ms: u64) -> ExporterConfig {
    let mut config = ExporterConfig::default();
    config.client.timeout_secs = 2.0;
    config.client.retry_count = retry_count;
    config.client.backoff_base_ms = backoff_base_ms;
    config.client.backoff_max_ms = backoff_base_ms.max(1) * 8;
    config
}

#[allow(dead_code)]
pub fn test_engine(retry_count: u32, backoff_base_ms: u64) -> ProbeEngine {
    ProbeEngine::new(&test_config(retry_count, backoff_base_ms)).unwrap()
}

/// Value of the first `name{..}` series carrying every label in `labels`.
#[allow(dead_code)]
pub fn sample(text: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    let prefix = format!("{}{{", name);
    text.lines()
        .filter(|line| line.starts_with(&prefix))
        .find(|line| {
            labels
                .iter()
                .all(|(k, v)| line.contains(&format!("{}=\"{}\"", k, v)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

/// Status series with the target URL masked, for comparing probes of
/// different addresses.
#[allow(dead_code)]
pub fn status_series(text: &str, url: &str) -> Vec<String> {
    let mut series: Vec<String> = text
        .lines()
        .filter(|line| line.starts_with("statuspage_"))
        .map(|line| line.replace(url, "<target>"))
        .collect();
    series.sort();
    series
}

#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
