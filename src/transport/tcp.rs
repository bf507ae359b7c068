//! # TCP Transport
//!
//! Framed TCP connections implementing [`Transport`].
//!
//! Each message travels as one [`FrameCodec`] frame, so a `receive` yields
//! exactly the bytes of one `send` on the other side.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::net::{self, TcpStream};
use tokio_util::codec::Framed;
use tracing::{debug, info, instrument};

use super::Transport;
use crate::core::codec::FrameCodec;
use crate::error::{constants, TransportError};
use crate::utils::metrics::global_metrics;

/// One established TCP connection
#[derive(Debug)]
pub struct TcpTransport {
    framed: Framed<TcpStream, FrameCodec>,
    peer: SocketAddr,
}

impl TcpTransport {
    fn from_stream(stream: TcpStream, peer: SocketAddr, codec: FrameCodec) -> Self {
        global_metrics().connection_established();
        Self {
            framed: Framed::new(stream, codec),
            peer,
        }
    }

    /// Resolve `address` ("host:port") and connect to the first address that accepts.
    #[instrument(skip(codec))]
    pub async fn connect(
        address: &str,
        timeout: Duration,
        codec: FrameCodec,
    ) -> Result<Self, TransportError> {
        let addrs: Vec<SocketAddr> = resolve(address).await?;

        let attempt = async {
            let mut last_err = None;
            for addr in addrs {
                match TcpStream::connect(addr).await {
                    Ok(stream) => return Ok((stream, addr)),
                    Err(e) => {
                        debug!(%addr, error = %e, "Connect attempt failed");
                        last_err = Some(e);
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, constants::ERR_UNRESOLVED_ADDRESS)
            }))
        };

        let (stream, peer) = within_timeout(address, timeout, attempt).await?;

        info!(%peer, "Connected to server");
        Ok(Self::from_stream(stream, peer, codec))
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Flush pending frames and shut the connection down.
    pub async fn close(mut self) -> Result<(), TransportError> {
        SinkExt::<Bytes>::close(&mut self.framed).await?;
        debug!(peer = %self.peer, "Connection closed");
        Ok(())
    }
}

impl Transport for TcpTransport {
    async fn send(&mut self, data: Bytes) -> Result<(), TransportError> {
        self.framed.send(data).await
    }

    async fn receive(&mut self) -> Result<Bytes, TransportError> {
        match self.framed.next().await {
            Some(frame) => frame,
            None => Err(TransportError::ConnectionClosed),
        }
    }
}

/// Listening socket handing out [`TcpTransport`]s
#[derive(Debug)]
pub struct TcpListener {
    listener: net::TcpListener,
    codec: FrameCodec,
}

impl TcpListener {
    /// Bind to `address` ("ip:port"; port 0 picks a free port).
    #[instrument(skip(codec))]
    pub async fn listen(address: &str, codec: FrameCodec) -> Result<Self, TransportError> {
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| TransportError::InvalidAddress(address.to_string()))?;
        let listener = net::TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listening");
        Ok(Self { listener, codec })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for the next peer to connect.
    pub async fn accept(&self) -> Result<(TcpTransport, SocketAddr), TransportError> {
        let (stream, peer) = self.listener.accept().await?;
        info!(%peer, "Client connected");
        Ok((TcpTransport::from_stream(stream, peer, self.codec), peer))
    }
}

/// Run a connect attempt under `timeout`, mapping failures to transport errors.
async fn within_timeout<F, T>(
    address: &str,
    timeout: Duration,
    attempt: F,
) -> Result<T, TransportError>
where
    F: Future<Output = io::Result<T>>,
{
    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(connected)) => Ok(connected),
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
            Err(TransportError::ConnectionRefused(address.to_string()))
        }
        Ok(Err(e)) => Err(TransportError::Io(e)),
        Err(_) => {
            debug!("{}", constants::ERR_CONNECT_TIMEOUT);
            Err(TransportError::Timeout)
        }
    }
}

/// Resolve "host:port" to socket addresses.
pub async fn resolve(address: &str) -> Result<Vec<SocketAddr>, TransportError> {
    let addrs: Vec<SocketAddr> = net::lookup_host(address)
        .await
        .map_err(|_| TransportError::InvalidAddress(address.to_string()))?
        .collect();
    if addrs.is_empty() {
        return Err(TransportError::InvalidAddress(address.to_string()));
    }
    Ok(addrs)
}
