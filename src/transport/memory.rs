//! In-process transport: two endpoints joined by unbounded channels.

use bytes::Bytes;
use tokio::sync::mpsc;

use super::Transport;
use crate::error::TransportError;

#[derive(Debug)]
pub struct MemoryTransport {
    tx: mpsc::UnboundedSender<Bytes>,
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl MemoryTransport {
    /// Two connected endpoints; what one sends the other receives.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (
            Self { tx: a_tx, rx: a_rx },
            Self { tx: b_tx, rx: b_rx },
        )
    }
}

impl Transport for MemoryTransport {
    async fn send(&mut self, data: Bytes) -> Result<(), TransportError> {
        self.tx
            .send(data)
            .map_err(|_| TransportError::ConnectionClosed)
    }

    async fn receive(&mut self) -> Result<Bytes, TransportError> {
        self.rx.recv().await.ok_or(TransportError::ConnectionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_pair_preserves_message_boundaries() {
        let (mut a, mut b) = MemoryTransport::pair();
        a.send(Bytes::from_static(b"one")).await.unwrap();
        a.send(Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(b.receive().await.unwrap(), Bytes::from_static(b"one"));
        assert_eq!(b.receive().await.unwrap(), Bytes::from_static(b"two"));
    }

    #[tokio::test]
    async fn test_send_to_dropped_peer_fails() {
        let (mut a, b) = MemoryTransport::pair();
        drop(b);
        assert!(matches!(
            a.send(Bytes::new()).await,
            Err(TransportError::ConnectionClosed)
        ));
    }
}
