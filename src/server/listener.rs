// Listener setup with SO_REUSEADDR/SO_REUSEPORT so a restarted process
// does not trip over sockets left in TIME_WAIT.

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a bound, non-blocking `TcpListener` with the reuse flags set.
pub fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking is required before handing the fd to tokio
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
