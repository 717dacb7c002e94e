use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr) {
    println!("Server running at: http://{addr}");
    println!("API endpoint:      http://{addr}/api/hello");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_response(size: usize) {
    println!("[Response] Sent 200 OK ({size} bytes)");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}

pub fn log_shutdown() {
    println!("[Shutdown] Accept loop stopped");
}

pub fn log_server_stopped() {
    println!("Server stopped");
}
