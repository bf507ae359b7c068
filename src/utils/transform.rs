//! # Packet Transforms
//!
//! Byte transforms applied at the send/receive boundary of a packet.
//!
//! A [`Transform`] sees the fully serialized packet right before it goes to
//! the transport (`encode`) and the raw bytes right after they come off it
//! (`decode`). Callers building or reading packets never see the transformed
//! form. `decode` must be the exact inverse of `encode`; nothing detects a
//! mismatch between the sender's transform and the receiver's.
//!
//! [`ByteShift`] is a placeholder obfuscation. It is trivially reversible and
//! provides no confidentiality or integrity.

use std::borrow::Cow;

/// Capability for rewriting packet bytes on their way to and from the wire.
pub trait Transform: Send + Sync {
    /// Pre-send: serialized packet bytes in, wire bytes out.
    fn encode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]>;

    /// Post-receive: wire bytes in, original serialized bytes out.
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]>;

    /// Short name used in log fields
    fn name(&self) -> &'static str;
}

/// Leaves bytes untouched. The default transform of every packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Transform for Identity {
    #[inline]
    fn encode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Borrowed(data)
    }

    #[inline]
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Borrowed(data)
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Adds a fixed offset (mod 256) to every byte on send and removes it on receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteShift {
    offset: u8,
}

impl ByteShift {
    pub fn new(offset: u8) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }
}

impl Default for ByteShift {
    /// Shift by one
    fn default() -> Self {
        Self::new(1)
    }
}

impl Transform for ByteShift {
    fn encode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Owned(data.iter().map(|b| b.wrapping_add(self.offset)).collect())
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        Cow::Owned(data.iter().map(|b| b.wrapping_sub(self.offset)).collect())
    }

    fn name(&self) -> &'static str {
        "byte-shift"
    }
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn encode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        (**self).encode(data)
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        (**self).decode(data)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_borrows() {
        let data = [1u8, 2, 3];
        assert!(matches!(Identity.encode(&data), Cow::Borrowed(_)));
        assert!(matches!(Identity.decode(&data), Cow::Borrowed(_)));
    }

    #[test]
    fn test_byte_shift_adds_one_by_default() {
        let shift = ByteShift::default();
        assert_eq!(shift.encode(&[0x00, 0x41, 0xFF]).into_owned(), vec![0x01, 0x42, 0x00]);
        assert_eq!(shift.decode(&[0x01, 0x42, 0x00]).into_owned(), vec![0x00, 0x41, 0xFF]);
    }

    #[test]
    fn test_boxed_transform_delegates() {
        let boxed: Box<dyn Transform> = Box::new(ByteShift::new(3));
        assert_eq!(boxed.name(), "byte-shift");
        assert_eq!(boxed.encode(&[1]).into_owned(), vec![4]);
    }
}
