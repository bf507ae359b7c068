//! # Core Packet Components
//!
//! Typed packet buffer, wire encoding rules, and stream framing.
//!
//! ## Components
//! - **Wire**: fixed big-endian encoding for primitives, strings and sequences
//! - **Packet**: cursor-based buffer with typed writes/reads and send/receive hooks
//! - **Codec**: Tokio codec for length-prefixed framing over byte streams
//!
//! ## Frame Format
//! ```text
//! [Length(4)] [Payload(N)]
//! ```
//!
//! ## Limits
//! - Maximum frame size: 1MB by default (configurable)
//! - Length prefixes are validated against the remaining bytes before any read

pub mod codec;
pub mod packet;
pub mod wire;
