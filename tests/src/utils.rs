use std::net::{IpAddr, SocketAddr, TcpListener as StdTcpListener};

use tokio::net::TcpListener;

/// A listener on an ephemeral port of `ip`.
pub async fn listen_on(ip: IpAddr) -> (TcpListener, u16) {
    let listener = TcpListener::bind(SocketAddr::new(ip, 0))
        .await
        .expect("failed to bind loopback listener");
    let port = listener.local_addr().expect("listener has no address").port();
    (listener, port)
}

/// A listening port `p` together with `p + 1`, which was just bound and released
/// so nothing is listening on it.
pub async fn listener_with_closed_neighbour(ip: IpAddr) -> (TcpListener, u16, u16) {
    for _ in 0..64 {
        let (listener, port) = listen_on(ip).await;
        let Some(next) = port.checked_add(1) else { continue };

        if let Ok(probe) = StdTcpListener::bind(SocketAddr::new(ip, next)) {
            drop(probe);
            return (listener, port, next);
        }
    }
    panic!("could not find an ephemeral port with a free neighbour");
}

pub fn is_strictly_ascending(ports: &[u16]) -> bool {
    ports.windows(2).all(|pair| pair[0] < pair[1])
}
