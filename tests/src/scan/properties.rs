use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tokio::net::TcpListener;

use crate::utils::{is_strictly_ascending, listen_on};

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const TIMEOUT: Duration = Duration::from_millis(500);

async fn several_listeners(count: usize) -> (Vec<TcpListener>, Vec<u16>) {
    let mut listeners = Vec::with_capacity(count);
    let mut ports = Vec::with_capacity(count);
    for _ in 0..count {
        let (listener, port) = listen_on(LOCALHOST).await;
        listeners.push(listener);
        ports.push(port);
    }
    ports.sort_unstable();
    (listeners, ports)
}

/// Other processes may listen inside the range, so only containment is asserted.
#[tokio::test]
async fn result_is_an_ascending_subset_of_the_range() {
    let (_listeners, ports) = several_listeners(3).await;
    let (start, end) = (ports[0], ports[ports.len() - 1]);

    // Keep the range small enough for a quick run
    if end - start > 4096 {
        eprintln!("Skipping: ephemeral ports too far apart ({start}-{end})");
        return;
    }

    let open = portr_core::scan("127.0.0.1", start.into(), end.into(), TIMEOUT, 128)
        .await
        .expect("scan failed");

    assert!(is_strictly_ascending(&open), "not strictly ascending: {open:?}");
    assert!(open.iter().all(|p| (start..=end).contains(p)));
    for port in &ports {
        assert!(open.contains(port), "listener on {port} missing from {open:?}");
    }
}

#[tokio::test]
async fn repeated_scans_are_identical() {
    let (_listeners, ports) = several_listeners(2).await;
    let (start, end) = (ports[0], ports[1]);

    if end - start > 4096 {
        eprintln!("Skipping: ephemeral ports too far apart ({start}-{end})");
        return;
    }

    let first = portr_core::scan("127.0.0.1", start.into(), end.into(), TIMEOUT, 64)
        .await
        .expect("first scan failed");
    let second = portr_core::scan("127.0.0.1", start.into(), end.into(), TIMEOUT, 64)
        .await
        .expect("second scan failed");

    assert_eq!(first, second);
}
