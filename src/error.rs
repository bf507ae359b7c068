//! # Error Types
//!
//! Error handling for packets, transports, and configuration.
//!
//! Two failure channels exist and they never mix:
//! - **Transport errors** ([`TransportError`]) come from the byte-stream
//!   collaborator and terminate the current operation.
//! - **Decode errors** ([`DecodeError`]) come from typed extraction on a
//!   [`Packet`](crate::core::packet::Packet). They are local to the packet,
//!   flip its validity flag, and are never raised across the transport boundary.
//!
//! [`ProtocolError`] wraps both for callers that drive a whole session.
//!
//! ## Example Usage
//! ```rust
//! use packet_wire::error::{ProtocolError, Result};
//! use packet_wire::core::packet::Packet;
//!
//! fn read_age(packet: &mut Packet) -> Result<u16> {
//!     packet.try_read::<u16>().map_err(ProtocolError::from)
//! }
//!
//! let mut packet = Packet::new();
//! packet.write(&42u16);
//! assert_eq!(read_age(&mut packet).ok(), Some(42));
//! assert!(read_age(&mut packet).is_err());
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Connection errors
    pub const ERR_CONNECTION_CLOSED: &str = "Connection closed";
    pub const ERR_CONNECT_TIMEOUT: &str = "Timed out connecting to server";

    /// Address errors
    pub const ERR_UNRESOLVED_ADDRESS: &str = "Address did not resolve to any socket address";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

/// Failures of the underlying byte-stream collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{}", constants::ERR_CONNECTION_CLOSED)]
    ConnectionClosed,

    #[error("Frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("Operation timed out")]
    Timeout,
}

/// Reasons a typed extraction from a packet can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Not enough data: needed {needed} bytes, {remaining} remaining")]
    InsufficientData { needed: usize, remaining: usize },

    #[error("Declared length {declared} exceeds {remaining} remaining bytes")]
    LengthOverflow { declared: usize, remaining: usize },

    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8,

    #[error("Invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("Packet is invalid after an earlier failed read")]
    Invalidated,
}

/// ProtocolError is the primary error type for session-level operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
