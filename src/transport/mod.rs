//! # Transport Layer
//!
//! The byte-stream collaborator and the adapter that moves packets over it.
//!
//! A [`Transport`] delivers whole messages over one established connection:
//! what goes into one `send` comes out of one `receive` on the other end.
//! [`send_packet`] and [`receive_packet`] bridge a
//! [`Packet`](crate::core::packet::Packet) to that interface, calling the
//! packet's send/receive hooks so its transform is applied on the wire only.
//!
//! One adapter call moves one packet in one transport round-trip. There is no
//! retry and nothing is buffered between calls.
//!
//! ## Implementations
//! - [`tcp`]: length-prefixed frames over TCP
//! - [`memory`]: connected in-process pair

pub mod memory;
pub mod tcp;

use std::borrow::Cow;
use std::future::Future;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::core::packet::Packet;
use crate::error::TransportError;
use crate::utils::metrics::global_metrics;
use crate::utils::transform::Transform;

/// Reliable, ordered, message-preserving connection to one peer.
pub trait Transport: Send {
    /// Deliver one message to the peer.
    fn send(&mut self, data: Bytes) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Wait for the next complete message from the peer.
    fn receive(&mut self) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// Send `packet` through its pre-send hook over `transport`.
pub async fn send_packet<C, T>(transport: &mut C, packet: &Packet<T>) -> Result<(), TransportError>
where
    C: Transport,
    T: Transform,
{
    let wire = match packet.on_send() {
        Cow::Borrowed(bytes) => Bytes::copy_from_slice(bytes),
        Cow::Owned(bytes) => Bytes::from(bytes),
    };
    let len = wire.len();

    if let Err(e) = transport.send(wire).await {
        global_metrics().transport_error();
        warn!(error = %e, "Failed to send packet");
        return Err(e);
    }

    global_metrics().packet_sent(len as u64);
    debug!(
        bytes = len,
        transform = packet.transform().name(),
        "Packet sent"
    );
    Ok(())
}

/// Receive one message from `transport` into `packet` through its post-receive hook.
///
/// On error the packet is left untouched.
pub async fn receive_packet<C, T>(
    transport: &mut C,
    packet: &mut Packet<T>,
) -> Result<(), TransportError>
where
    C: Transport,
    T: Transform,
{
    let wire = match transport.receive().await {
        Ok(wire) => wire,
        Err(e) => {
            global_metrics().transport_error();
            warn!(error = %e, "Failed to receive packet");
            return Err(e);
        }
    };

    packet.on_receive(&wire);

    global_metrics().packet_received(wire.len() as u64);
    debug!(
        bytes = wire.len(),
        transform = packet.transform().name(),
        "Packet received"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryTransport;
    use super::*;
    use crate::utils::transform::ByteShift;

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_transformed_bytes_travel_on_the_wire() {
        let (mut a, mut b) = MemoryTransport::pair();

        let mut packet = Packet::with_transform(ByteShift::default());
        packet.write(&0x41u8);
        send_packet(&mut a, &packet).await.unwrap();

        // Raw receive sees the shifted byte
        assert_eq!(b.receive().await.unwrap().as_ref(), &[0x42]);
    }

    #[tokio::test]
    async fn test_receive_error_leaves_packet_untouched() {
        let (mut a, b) = MemoryTransport::pair();
        drop(b);

        let mut packet = Packet::new();
        packet.write(&1u8);
        let result = receive_packet(&mut a, &mut packet).await;

        assert!(matches!(result, Err(TransportError::ConnectionClosed)));
        assert_eq!(packet.data(), &[1]);
        assert!(packet.is_valid());
    }
}
