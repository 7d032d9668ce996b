//! In-process stand-in for the analysis server.

#![allow(dead_code)]

use ailbums_core::{HttpAnalysisClient, ServiceConfig};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Canned answer for one request, optionally held back until released.
pub struct Reply {
    pub status: u16,
    pub body: String,
    gate: Option<oneshot::Receiver<()>>,
}

impl Reply {
    pub fn json(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            gate: None,
        }
    }

    pub fn analysis(total_score: f64) -> Self {
        Self::json(format!(
            r#"{{"blur_score": {}, "eyes_open": true, "smiling": false, "exposure_quality": "good", "total_score": {}}}"#,
            total_score * 100.0,
            total_score
        ))
    }

    pub fn gated(mut self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.gate = Some(rx);
        (self, tx)
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn contains(&self, needle: &[u8]) -> bool {
        find(&self.body, needle).is_some()
    }
}

pub struct FakeAnalysisServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    _task: JoinHandle<()>,
}

impl FakeAnalysisServer {
    /// Answers one connection per reply, in order.
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = requests.clone();

        let task = tokio::spawn(async move {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let Some(request) = read_request(&mut stream).await else {
                    return;
                };
                captured.lock().unwrap().push(request);

                if let Some(gate) = reply.gate {
                    let _ = gate.await;
                }
                let _ = write_response(&mut stream, reply.status, &reply.body).await;
                tokio::spawn(drain(stream));
            }
        });

        Self {
            addr,
            requests,
            _task: task,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> HttpAnalysisClient {
        client_for(&self.endpoint())
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn client_for(endpoint: &str) -> HttpAnalysisClient {
    let config = ServiceConfig {
        endpoint: endpoint.to_string(),
        connect_timeout_secs: 2,
        request_timeout_secs: Some(10),
    };
    HttpAnalysisClient::new(&config).unwrap()
}

/// An endpoint nothing listens on.
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

async fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?.to_string();
    let content_type = lines
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case("content-type")
                .then(|| value.trim().to_string())
        })
        .unwrap_or_default();

    // Read until the closing multipart boundary, whatever the transfer encoding.
    if let Some(boundary) = content_type.split("boundary=").nth(1) {
        let closing = format!("--{}--", boundary.trim_matches('"'));
        while find(&buf[header_end..], closing.as_bytes()).is_none() {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    }

    Some(CapturedRequest {
        request_line,
        content_type,
        body: buf[header_end..].to_vec(),
    })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

/// Swallows whatever the client still sends so closing never resets the connection.
async fn drain(mut stream: TcpStream) {
    let _ = stream.shutdown().await;
    let mut sink = [0u8; 1024];
    let _ = tokio::time::timeout(Duration::from_secs(2), async {
        while let Ok(n) = stream.read(&mut sink).await {
            if n == 0 {
                break;
            }
        }
    })
    .await;
}
