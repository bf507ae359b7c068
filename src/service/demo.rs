//! # Demo Roles
//!
//! The server sends two [`Character`] records: the first in a plain packet,
//! the second in a [`ByteShift`] packet. The client receives and decodes both.
//! Transport errors end the run; a record that fails to decode is reported
//! as missing and the client moves on.

use tracing::{info, instrument, warn};

use crate::config::NetworkConfig;
use crate::core::codec::FrameCodec;
use crate::core::packet::Packet;
use crate::error::Result;
use crate::protocol::Character;
use crate::transport::tcp::{TcpListener, TcpTransport};
use crate::transport::{receive_packet, send_packet, Transport};
use crate::utils::metrics::global_metrics;
use crate::utils::transform::{ByteShift, Transform};

/// Records the server sends, in order
pub fn demo_characters() -> (Character, Character) {
    (
        Character::new(12, "Bill", 1.32),
        Character::new(56, "Bob", 1.87),
    )
}

/// What the client got out of the two packets
#[derive(Debug, Clone, PartialEq)]
pub struct ClientReport {
    pub regular: Option<Character>,
    pub transformed: Option<Character>,
}

/// Send the demo records over an established connection.
pub async fn serve_characters<C: Transport>(transport: &mut C) -> Result<()> {
    let (first, second) = demo_characters();

    let mut regular = Packet::new();
    regular.write(&first);
    send_packet(transport, &regular).await?;
    info!(character = %first, "Character sent (regular packet)");

    let mut transformed = Packet::with_transform(ByteShift::default());
    transformed.write(&second);
    send_packet(transport, &transformed).await?;
    info!(character = %second, "Character sent (transformed packet)");

    Ok(())
}

/// Receive and decode the demo records from an established connection.
pub async fn receive_characters<C: Transport>(transport: &mut C) -> Result<ClientReport> {
    let mut regular = Packet::new();
    receive_packet(transport, &mut regular).await?;
    let regular = decode_character(&mut regular, "regular");

    let mut transformed = Packet::with_transform(ByteShift::default());
    receive_packet(transport, &mut transformed).await?;
    let transformed = decode_character(&mut transformed, "transformed");

    Ok(ClientReport {
        regular,
        transformed,
    })
}

fn decode_character<T: Transform>(packet: &mut Packet<T>, kind: &str) -> Option<Character> {
    match packet.try_read::<Character>() {
        Ok(character) => {
            info!(%character, kind, "Character received");
            Some(character)
        }
        Err(e) => {
            global_metrics().decode_failure();
            warn!(error = %e, kind, "Failed to decode character");
            None
        }
    }
}

/// Listen, serve exactly one client, and return.
#[instrument(skip(config))]
pub async fn run_server(config: &NetworkConfig) -> Result<()> {
    let codec = FrameCodec::new(config.transport.max_frame_size);
    let listener = TcpListener::listen(&config.server.address, codec).await?;
    run_server_on(listener).await
}

/// Serve exactly one client on an already bound listener.
pub async fn run_server_on(listener: TcpListener) -> Result<()> {
    let (mut client, _peer) = listener.accept().await?;
    serve_characters(&mut client).await?;
    client.close().await?;
    global_metrics().log_metrics();
    Ok(())
}

/// Connect to `address` with the configured timeout and frame limit.
#[instrument(skip(config))]
pub async fn connect_client(config: &NetworkConfig, address: &str) -> Result<TcpTransport> {
    let codec = FrameCodec::new(config.transport.max_frame_size);
    let server = TcpTransport::connect(address, config.client.connection_timeout, codec).await?;
    Ok(server)
}

/// Receive both records over an established connection, then disconnect.
pub async fn run_client_on(mut server: TcpTransport) -> Result<ClientReport> {
    let report = receive_characters(&mut server).await?;
    server.close().await?;
    global_metrics().log_metrics();
    Ok(report)
}

/// Connect to `address`, receive both records, and disconnect.
pub async fn run_client(config: &NetworkConfig, address: &str) -> Result<ClientReport> {
    let server = connect_client(config, address).await?;
    run_client_on(server).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_roles_over_memory_pair() {
        let (mut server, mut client) = MemoryTransport::pair();
        serve_characters(&mut server).await.unwrap();

        let report = receive_characters(&mut client).await.unwrap();
        let (first, second) = demo_characters();
        assert_eq!(report.regular, Some(first));
        assert_eq!(report.transformed, Some(second));
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_missing_inverse_corrupts_record() {
        let (mut server, mut client) = MemoryTransport::pair();
        serve_characters(&mut server).await.unwrap();

        let mut regular = Packet::new();
        receive_packet(&mut client, &mut regular).await.unwrap();

        // Reading the shifted packet without undoing the shift
        let mut wrong = Packet::new();
        receive_packet(&mut client, &mut wrong).await.unwrap();
        let (_, second) = demo_characters();
        assert_ne!(wrong.read::<Character>(), Some(second));
    }

    #[tokio::test]
    async fn test_client_aborts_on_closed_transport() {
        let (server, mut client) = MemoryTransport::pair();
        drop(server);
        assert!(receive_characters(&mut client).await.is_err());
    }
}
