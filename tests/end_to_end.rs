//! Demo roles over real TCP sockets on localhost

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use packet_wire::config::NetworkConfig;
use packet_wire::core::codec::FrameCodec;
use packet_wire::error::{ProtocolError, TransportError};
use packet_wire::service::demo::{
    connect_client, demo_characters, run_client, run_client_on, run_server_on, serve_characters,
};
use packet_wire::transport::tcp::{TcpListener, TcpTransport};

#[tokio::test]
async fn test_server_and_client_exchange_characters() {
    let listener = TcpListener::listen("127.0.0.1:0", FrameCodec::default())
        .await
        .expect("bind");
    let address = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(run_server_on(listener));

    let config = NetworkConfig::default();
    let report = run_client(&config, &address).await.expect("client run");
    server.await.unwrap().expect("server run");

    let (first, second) = demo_characters();
    assert_eq!(report.regular, Some(first));
    assert_eq!(report.transformed, Some(second));
}

#[tokio::test]
async fn test_client_reports_connection_before_exchange() {
    let listener = TcpListener::listen("127.0.0.1:0", FrameCodec::default())
        .await
        .expect("bind");
    let address = listener.local_addr().unwrap();
    let (go_tx, go_rx) = tokio::sync::oneshot::channel::<()>();

    // The server holds the records back until the client says it is connected
    let server = tokio::spawn(async move {
        let (mut conn, _) = listener.accept().await.unwrap();
        go_rx.await.unwrap();
        serve_characters(&mut conn).await.unwrap();
        conn.close().await.unwrap();
    });

    let config = NetworkConfig::default();
    let client = connect_client(&config, &address.to_string())
        .await
        .expect("connected without any records sent");
    assert_eq!(client.peer_addr(), address);

    go_tx.send(()).unwrap();
    let report = run_client_on(client).await.expect("client run");
    server.await.unwrap();

    let (first, second) = demo_characters();
    assert_eq!(report.regular, Some(first));
    assert_eq!(report.transformed, Some(second));
}

#[tokio::test]
async fn test_client_against_closed_port() {
    // Bind then drop to get a port with nothing listening
    let address = {
        let listener = TcpListener::listen("127.0.0.1:0", FrameCodec::default())
            .await
            .unwrap();
        listener.local_addr().unwrap().to_string()
    };

    let config = NetworkConfig::default();
    let result = run_client(&config, &address).await;
    assert!(matches!(
        result,
        Err(ProtocolError::Transport(TransportError::ConnectionRefused(_)))
    ));
}

#[tokio::test]
async fn test_client_with_unresolvable_address() {
    let result = TcpTransport::connect(
        "definitely not a host",
        Duration::from_secs(1),
        FrameCodec::default(),
    )
    .await;
    assert!(matches!(result, Err(TransportError::InvalidAddress(_))));
}

#[tokio::test]
async fn test_oversized_frame_rejected_by_receiver() {
    let listener = TcpListener::listen("127.0.0.1:0", FrameCodec::default())
        .await
        .unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(async move {
        let (mut conn, _) = listener.accept().await.unwrap();
        let mut packet = packet_wire::Packet::new();
        packet.append(&[0u8; 64]);
        packet_wire::send_packet(&mut conn, &packet).await.unwrap();
        conn.close().await.unwrap();
    });

    let mut client = TcpTransport::connect(&address, Duration::from_secs(2), FrameCodec::new(16))
        .await
        .unwrap();
    let mut packet = packet_wire::Packet::new();
    let result = packet_wire::receive_packet(&mut client, &mut packet).await;
    assert!(matches!(result, Err(TransportError::OversizedFrame(64))));
    assert_eq!(packet.data_size(), 0);

    server.await.unwrap();
}
