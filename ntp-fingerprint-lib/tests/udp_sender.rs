mod helpers;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use helpers::{spawn_udp_responder, TestResult};
use ntp_fingerprint_lib::{
    run, FingerprintTable, ProbeCatalog, ProbeId, ProbeOutcome, ProbeSender, ScanConfig,
    TargetHost, TraceMode, UdpProbeSender,
};
use tokio::net::UdpSocket;

const TIMEOUT: Duration = Duration::from_millis(200);

fn probe(id: ProbeId) -> TestResult<&'static ntp_fingerprint_lib::Probe> {
    Ok(ProbeCatalog::standard()
        .get(id)
        .ok_or("probe missing from catalog")?)
}

#[tokio::test]
async fn test_reply_is_detected() -> TestResult {
    let addr = spawn_udp_responder(vec![ProbeId::Basic]).await?;
    let sender = UdpProbeSender::new(TIMEOUT, TraceMode::Bytes);

    assert_eq!(sender.send(probe(ProbeId::Basic)?, addr).await, ProbeOutcome::Reply);
    Ok(())
}

#[tokio::test]
async fn test_missing_reply_times_out_as_silent() -> TestResult {
    let addr = spawn_udp_responder(vec![ProbeId::Basic]).await?;
    let sender = UdpProbeSender::new(TIMEOUT, TraceMode::Quiet);

    let started = Instant::now();
    assert_eq!(sender.send(probe(ProbeId::Short)?, addr).await, ProbeOutcome::Silent);
    assert!(started.elapsed() >= TIMEOUT);
    Ok(())
}

#[tokio::test]
async fn test_reply_content_is_not_inspected() -> TestResult {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    let addr = socket.local_addr()?;
    tokio::spawn(async move {
        let mut buf = [0u8; 256];
        if let Ok((_, peer)) = socket.recv_from(&mut buf).await {
            let _ = socket.send_to(b"not ntp at all", peer).await;
        }
    });

    let sender = UdpProbeSender::new(TIMEOUT, TraceMode::Quiet);
    assert_eq!(sender.send(probe(ProbeId::Version7)?, addr).await, ProbeOutcome::Reply);
    Ok(())
}

#[tokio::test]
async fn test_closed_port_counts_as_silent() -> TestResult {
    let addr = {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        socket.local_addr()?
    };
    let sender = UdpProbeSender::new(TIMEOUT, TraceMode::Quiet);
    assert_eq!(sender.send(probe(ProbeId::Basic)?, addr).await, ProbeOutcome::Silent);
    Ok(())
}

#[tokio::test]
async fn test_full_run_against_local_responder() -> TestResult {
    // Chrony answers basic, symmetric active, all-zero and type 0 extension probes.
    let addr = spawn_udp_responder(vec![
        ProbeId::Basic,
        ProbeId::SymmetricActive,
        ProbeId::AllZero,
        ProbeId::ExtensionType0,
    ])
    .await?;

    let config = ScanConfig {
        target: TargetHost::Ip(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        port: addr.port(),
        timeout: TIMEOUT,
        concurrency: 13,
        trace: TraceMode::Quiet,
    };
    let sender = Arc::new(config.udp_sender());
    let report = run(&config, sender, FingerprintTable::builtin()).await?;

    assert_eq!(report.vector.bits(), vec![1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0]);
    assert_eq!(report.identified.as_deref(), Some("Chrony"));
    assert_eq!(report.address, addr);
    Ok(())
}
