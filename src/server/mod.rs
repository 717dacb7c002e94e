//! Server module
//!
//! Owns the TCP listener and the accept loop. The server is an explicit
//! value: bound from configuration, started with `run`, and stoppable
//! through a `ShutdownHandle` so tests do not depend on process lifetime.

mod connection;
mod listener;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// HTTP server bound to a fixed address for the process lifetime.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
}

/// Handle for stopping a running server from another task.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

impl Server {
    /// Bind the listener. A bind failure here is a fatal startup error.
    pub fn bind(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<Self> {
        let listener = listener::create_reusable_listener(addr)?;
        Ok(Self {
            listener,
            state,
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// The actually bound address. Differs from the configured one when
    /// binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Accept loop. Runs until the shutdown handle fires; accept errors
    /// are logged and the loop continues.
    pub async fn run(self) -> std::io::Result<()> {
        let access_log = self.state.config.logging.access_log;
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            if access_log {
                                logger::log_connection_accepted(&peer_addr);
                            }
                            connection::handle_connection(stream, Arc::clone(&self.state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = self.shutdown.notified() => {
                    logger::log_shutdown();
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, ServerConfig};
    use chrono::DateTime;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(&Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig { access_log: false },
        }))
    }

    fn start_server() -> (SocketAddr, ShutdownHandle, tokio::task::JoinHandle<std::io::Result<()>>) {
        let server = Server::bind("127.0.0.1:0".parse().unwrap(), test_state()).unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle();
        let task = tokio::spawn(server.run());
        (addr, handle, task)
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn body_of(response: &str) -> &str {
        response
            .split_once("\r\n\r\n")
            .map(|(_, body)| body)
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_root_serves_welcome_page() {
        let (addr, handle, task) = start_server();

        let response = raw_request(
            addr,
            "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response
            .to_lowercase()
            .contains("content-type: text/html; charset=utf-8"));
        let body = body_of(&response);
        assert!(body.contains("AI Cloud IDE"));
        assert!(body.contains(r#"<a href="/api/hello">"#));

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_unknown_path_serves_same_body_as_root() {
        let (addr, handle, task) = start_server();

        let root = raw_request(
            addr,
            "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        let unknown = raw_request(
            addr,
            "GET /unknown/path HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;

        assert!(unknown.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body_of(&root), body_of(&unknown));

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_get_api_hello_serves_json() {
        let (addr, handle, task) = start_server();

        let response = raw_request(
            addr,
            "GET /api/hello HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response
            .to_lowercase()
            .contains("content-type: application/json"));

        let value: serde_json::Value = serde_json::from_str(body_of(&response)).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["message"], "Hello from AI Cloud IDE!");
        assert_eq!(obj["runtime"], "Rust");
        assert!(obj["version"].is_string());
        assert!(obj["timestamp"].is_string());

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_post_api_hello_same_as_get() {
        let (addr, handle, task) = start_server();

        let response = raw_request(
            addr,
            "POST /api/hello HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response
            .to_lowercase()
            .contains("content-type: application/json"));
        let value: serde_json::Value = serde_json::from_str(body_of(&response)).unwrap();
        assert_eq!(value["message"], "Hello from AI Cloud IDE!");

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_sequential_timestamps_non_decreasing() {
        let (addr, handle, task) = start_server();

        let mut timestamps = Vec::new();
        for _ in 0..2 {
            let response = raw_request(
                addr,
                "GET /api/hello HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            )
            .await;
            let value: serde_json::Value = serde_json::from_str(body_of(&response)).unwrap();
            let ts = DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).unwrap();
            timestamps.push(ts);
        }
        assert!(timestamps[0] <= timestamps[1]);

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_stops_accept_loop() {
        let (_addr, handle, task) = start_server();
        handle.shutdown();
        task.await.unwrap().unwrap();
    }
}
