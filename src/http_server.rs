// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! HTTP server for the metrics endpoint
//!
//! A small HTTP/1.1 server built on tokio. `/metrics` always answers 200 with
//! whatever the registry gathered, even when that is nothing.
//!
//! # Examples
//!
//! ```no_run
//! use awsexlib::http_server::HttpServer;
//! use awsexlib::prometheus::Registry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(Registry::new());
//!     let server = HttpServer::bind("0.0.0.0:9759".parse()?, registry).await?;
//!     server.run(std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::prometheus::{encode, Registry, CONTENT_TYPE};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Path serving the exposition text
pub const METRICS_PATH: &str = "/metrics";

/// Longest request head read before giving up on finding the request line
const MAX_REQUEST_LINE: usize = 8192;

const LANDING_PAGE: &str = "<html>\n\
<head><title>AWS Exporter</title></head>\n\
<body>\n\
<h1>AWS Exporter</h1>\n\
<p><a href=\"/metrics\">Metrics</a></p>\n\
</body>\n\
</html>\n";

/// Parsed request line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Request {
    method: String,
    path: String,
}

/// Response ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
struct Response {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn new(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut resp = format!("HTTP/1.1 {} {}\r\n", self.status, status_text(self.status));
        resp.push_str(&format!("Content-Type: {}\r\n", self.content_type));
        resp.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        resp.push_str("Connection: close\r\n");
        resp.push_str("\r\n");
        resp.push_str(&self.body);
        resp.into_bytes()
    }
}

/// HTTP server exposing a registry
pub struct HttpServer {
    listener: TcpListener,
    registry: Arc<Registry>,
}

impl HttpServer {
    /// Bind the listen socket
    pub async fn bind(addr: SocketAddr, registry: Arc<Registry>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, registry })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::pin!(shutdown);

        loop {
            let (mut stream, peer_addr) = tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutting down HTTP server");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        log::warn!("Accept error: {}", e);
                        continue;
                    }
                },
            };

            let registry = Arc::clone(&self.registry);

            tokio::spawn(async move {
                let buf = match read_request_line(&mut stream).await {
                    Ok(buf) if !buf.is_empty() => buf,
                    _ => return,
                };

                let raw = String::from_utf8_lossy(&buf);
                let response = match parse_request(&raw) {
                    Some(request) => {
                        log::debug!("{} {} from {}", request.method, request.path, peer_addr);
                        handle(&registry, &request).await
                    }
                    None => Response::new(400, "text/plain", "Bad Request"),
                };

                let _ = stream.write_all(&response.to_bytes()).await;
            });
        }
    }
}

async fn handle(registry: &Registry, request: &Request) -> Response {
    if request.method != "GET" {
        return Response::new(405, "text/plain", "Method Not Allowed");
    }

    match request.path.as_str() {
        METRICS_PATH => Response::new(200, CONTENT_TYPE, encode(&registry.gather().await)),
        "/health" => Response::new(
            200,
            "application/json",
            serde_json::json!({
                "status": "healthy",
                "version": crate::VERSION,
                "timestamp": chrono::Utc::now().timestamp(),
            })
            .to_string(),
        ),
        "/" => Response::new(200, "text/html; charset=utf-8", LANDING_PAGE),
        _ => Response::new(404, "text/plain", "Not Found"),
    }
}

/// Read until the request line is complete
///
/// Stops at the first CRLF, at end of stream, or after `MAX_REQUEST_LINE`
/// bytes, whichever comes first.
async fn read_request_line<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(2).any(|w| w == b"\r\n") && buf.len() < MAX_REQUEST_LINE {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(buf)
}

/// Parse the request line of a raw HTTP/1.1 request
fn parse_request(raw: &str) -> Option<Request> {
    let request_line = raw.lines().next()?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let path = parts[1].split('?').next().unwrap_or(parts[1]);

    Some(Request {
        method: parts[0].to_uppercase(),
        path: path.to_string(),
    })
}

fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
