use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use portr_common::config::Config;
use portr_common::error::{ScanError, ScanErrorKind};
use portr_common::network::target::Host;
use portr_core::network::resolver::{Resolver, SystemResolver};
use tokio_util::sync::CancellationToken;

use crate::utils::{listen_on, listener_with_closed_neighbour};

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const TIMEOUT: Duration = Duration::from_millis(500);

/// A single listening loopback port is reported, and nothing else.
#[tokio::test]
async fn scan_single_open_loopback_port() {
    let (_listener, port) = listen_on(LOCALHOST).await;

    let open = portr_core::scan("127.0.0.1", port.into(), port.into(), TIMEOUT, 4)
        .await
        .expect("scan failed");

    assert_eq!(open, vec![port]);
}

#[tokio::test]
async fn scan_open_and_closed_reports_only_the_listener() {
    let (_listener, open_port, closed_port) = listener_with_closed_neighbour(LOCALHOST).await;

    let open = portr_core::scan("127.0.0.1", open_port.into(), closed_port.into(), TIMEOUT, 4)
        .await
        .expect("scan failed");

    assert_eq!(open, vec![open_port]);
}

#[tokio::test]
async fn scan_closed_port_reports_refusal() {
    let (_listener, _open_port, closed_port) = listener_with_closed_neighbour(LOCALHOST).await;
    let config = Config {
        timeout: TIMEOUT,
        ..Config::default()
    };

    let result = portr_core::scan_with(
        "127.0.0.1",
        closed_port.into(),
        closed_port.into(),
        &config,
        &CancellationToken::new(),
    )
    .await
    .expect("scan failed");

    assert!(result.open_ports().is_empty());
    assert_eq!(result.summary().probed, 1);
    assert_eq!(result.summary().refused, 1);
}

#[tokio::test]
async fn scan_by_domain_name() {
    let ip = SystemResolver::default()
        .resolve(&Host::Domain("localhost".into()))
        .await
        .expect("localhost did not resolve");
    let (_listener, port) = listen_on(ip).await;

    let open = portr_core::scan("localhost", port.into(), port.into(), TIMEOUT, 4)
        .await
        .expect("scan failed");

    assert_eq!(open, vec![port]);
}

#[tokio::test]
async fn unresolvable_host_is_not_reported_as_closed() {
    let err = portr_core::scan("portr-test.invalid", 1, 1024, TIMEOUT, 64)
        .await
        .unwrap_err();

    assert_eq!(err, ScanError::ResolutionFailed { host: "portr-test.invalid".into() });
}

#[tokio::test]
async fn invalid_arguments_are_discriminated_by_kind() {
    let cases: [(&str, u32, u32, Duration, ScanErrorKind); 6] = [
        ("", 1, 10, TIMEOUT, ScanErrorKind::InvalidHost),
        ("not a host!!", 1, 10, TIMEOUT, ScanErrorKind::InvalidHost),
        ("127.0.0.1", 0, 10, TIMEOUT, ScanErrorKind::InvalidPortRange),
        ("127.0.0.1", 1, 65536, TIMEOUT, ScanErrorKind::InvalidPortRange),
        ("127.0.0.1", 10, 9, TIMEOUT, ScanErrorKind::InvalidPortRange),
        ("127.0.0.1", 1, 10, Duration::ZERO, ScanErrorKind::InvalidTimeout),
    ];

    for (host, start, end, timeout, expected) in cases {
        let err = portr_core::scan(host, start, end, timeout, 4).await.unwrap_err();
        assert_eq!(err.kind(), expected, "scan({host:?}, {start}, {end}, {timeout:?})");
    }

    let err = portr_core::scan("127.0.0.1", 1, 10, TIMEOUT, 0).await.unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::InvalidConcurrency);
}

#[tokio::test]
async fn pre_cancelled_scan_returns_empty_and_flagged() {
    let (_listener, port) = listen_on(LOCALHOST).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = portr_core::scan_with("127.0.0.1", port.into(), port.into(), &Config::default(), &cancel)
        .await
        .expect("scan failed");

    assert!(result.is_cancelled());
    assert!(result.open_ports().is_empty());
    assert_eq!(result.summary().probed, 0);
}
