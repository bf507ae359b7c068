//! # Packet
//!
//! Ordered byte buffer with a read cursor, typed writes and reads, and a
//! sticky validity flag.
//!
//! Values are read back in the order they were written; there is no random
//! access. A read that cannot be satisfied marks the packet invalid, leaves
//! the cursor where it was, and yields nothing. Every read after that fails
//! too, until [`Packet::clear`] resets the packet.
//!
//! Each packet carries a [`Transform`] chosen at construction. The transport
//! adapter calls [`Packet::on_send`] and [`Packet::on_receive`] so the
//! transform is applied only at the wire boundary.
//!
//! ```rust
//! use packet_wire::core::packet::Packet;
//!
//! let mut packet = Packet::new();
//! packet.write(&12u16).write("Bill").write(&1.32f32);
//!
//! assert_eq!(packet.read::<u16>(), Some(12));
//! assert_eq!(packet.read::<String>().as_deref(), Some("Bill"));
//! assert_eq!(packet.read::<f32>(), Some(1.32));
//! assert!(packet.is_exhausted());
//! ```

use std::borrow::Cow;

use crate::core::wire::{WireDecode, WireEncode, WireReader};
use crate::error::DecodeError;
use crate::utils::transform::{Identity, Transform};

#[derive(Debug, Clone)]
pub struct Packet<T: Transform = Identity> {
    buffer: Vec<u8>,
    read_position: usize,
    valid: bool,
    transform: T,
}

impl Packet<Identity> {
    /// Empty packet without any transform
    pub fn new() -> Self {
        Self::with_transform(Identity)
    }

    /// Packet holding exactly `data`, ready to be read from the start
    pub fn from_data(data: &[u8]) -> Self {
        let mut packet = Self::new();
        packet.append(data);
        packet
    }
}

impl Default for Packet<Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transform> Packet<T> {
    pub fn with_transform(transform: T) -> Self {
        Self {
            buffer: Vec::new(),
            read_position: 0,
            valid: true,
            transform,
        }
    }

    /// Append the wire encoding of `value`.
    pub fn write<V: WireEncode + ?Sized>(&mut self, value: &V) -> &mut Self {
        value.encode(&mut self.buffer);
        self
    }

    /// Read the next value, or `None` if the packet cannot supply one.
    pub fn read<V: WireDecode>(&mut self) -> Option<V> {
        self.try_read().ok()
    }

    /// Like [`read`](Self::read) but reports why the read failed.
    pub fn try_read<V: WireDecode>(&mut self) -> Result<V, DecodeError> {
        if !self.valid {
            return Err(DecodeError::Invalidated);
        }

        let mut reader = WireReader::new(&self.buffer[self.read_position..]);
        match V::decode(&mut reader) {
            Ok(value) => {
                self.read_position += reader.position();
                Ok(value)
            }
            Err(e) => {
                self.valid = false;
                Err(e)
            }
        }
    }

    /// Append raw bytes, bypassing the wire codec.
    pub fn append(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Reset to the freshly constructed state. The transform is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.read_position = 0;
        self.valid = true;
    }

    /// Serialized bytes, before any transform
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    pub fn data_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn read_position(&self) -> usize {
        self.read_position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.read_position
    }

    /// True when every written byte has been read
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Bytes to place on the wire. Called by the transport adapter.
    pub fn on_send(&self) -> Cow<'_, [u8]> {
        self.transform.encode(&self.buffer)
    }

    /// Undo the transform on `wire` bytes and append the result to the
    /// buffer. Called by the transport adapter.
    pub fn on_receive(&mut self, wire: &[u8]) {
        let decoded = self.transform.decode(wire);
        self.append(&decoded);
    }
}
