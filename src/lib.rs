//! # packet-wire
//!
//! Typed packet serialization with a pluggable transform applied where bytes
//! leave and enter the process.
//!
//! Build a [`Packet`], write typed fields into it, and hand it to
//! [`send_packet`]. On the other side, [`receive_packet`] fills a packet that
//! is then read field by field in the order the fields were written. A packet
//! built with a [`Transform`] rewrites its bytes on the wire only; the code
//! that writes and reads fields never sees the difference.
//!
//! ```rust
//! use packet_wire::core::packet::Packet;
//! use packet_wire::protocol::Character;
//! use packet_wire::transport::memory::MemoryTransport;
//! use packet_wire::transport::{receive_packet, send_packet};
//! use packet_wire::utils::transform::ByteShift;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let (mut server, mut client) = MemoryTransport::pair();
//!
//! let mut outgoing = Packet::with_transform(ByteShift::default());
//! outgoing.write(&Character::new(56, "Bob", 1.87));
//! send_packet(&mut server, &outgoing).await.unwrap();
//!
//! let mut incoming = Packet::with_transform(ByteShift::default());
//! receive_packet(&mut client, &mut incoming).await.unwrap();
//! assert_eq!(incoming.read::<Character>(), Some(Character::new(56, "Bob", 1.87)));
//! # });
//! # }
//! ```
//!
//! [`Packet`]: core::packet::Packet
//! [`Transform`]: utils::transform::Transform
//! [`send_packet`]: transport::send_packet
//! [`receive_packet`]: transport::receive_packet

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod utils;

pub use crate::core::packet::Packet;
pub use crate::error::{DecodeError, ProtocolError, Result, TransportError};
pub use crate::transport::{receive_packet, send_packet, Transport};
pub use crate::utils::transform::{ByteShift, Identity, Transform};
