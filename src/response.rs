//! Response building module
//!
//! Builders for the two fixed responses this server produces. All bodies
//! are built here so handlers never concatenate headers or HTML inline.

use chrono::{SecondsFormat, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::logger;

const RUNTIME_NAME: &str = "Rust";
// Toolchain version captured by build.rs, e.g. "rustc 1.83.0"
const RUNTIME_VERSION: &str = env!("RUSTC_VERSION");

/// Fixed welcome page served for every path without a route.
/// Byte-identical across requests.
pub const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>AI Cloud IDE</title></head>
  <body>
    <h1>🚀 AI Cloud IDE</h1>
    <p>Welcome to your AI-accessible development environment!</p>
    <p>API: <a href="/api/hello">/api/hello</a></p>
  </body>
</html>
"#;

/// Body of the `/api/hello` response. Everything except the timestamp
/// is fixed at compile time.
#[derive(Debug, Serialize)]
pub struct HelloPayload {
    pub message: &'static str,
    pub runtime: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl HelloPayload {
    /// Payload with the timestamp taken at call time (UTC, ISO-8601,
    /// millisecond precision with a `Z` suffix).
    pub fn now() -> Self {
        Self {
            message: "Hello from AI Cloud IDE!",
            runtime: RUNTIME_NAME,
            version: RUNTIME_VERSION,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Serialize the greeting payload for the current instant.
pub fn hello_json() -> String {
    serde_json::to_string(&HelloPayload::now()).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize hello payload: {e}"));
        "{}".to_string()
    })
}

/// Build 200 HTML response
pub fn build_html_response(html: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", html.len())
        .body(Full::new(Bytes::from_static(html.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 JSON response
pub fn build_json_response(json: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
