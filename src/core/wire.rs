//! # Wire Codec
//!
//! Fixed encoding rules used by [`Packet`](super::packet::Packet)'s typed
//! `write` and `read` operations.
//!
//! ## Wire Format
//! ```text
//! u8/i8          1 byte
//! u16/i16        2 bytes, big-endian
//! u32/i32/f32    4 bytes, big-endian (floats as IEEE-754 bits)
//! u64/i64/f64    8 bytes, big-endian
//! bool           1 byte, 0x00 or 0x01
//! string         [len: u32 BE] [UTF-8 bytes; len]
//! sequence       [count: u32 BE] [element; count]
//! record         fields concatenated in declared order
//! ```
//!
//! There is no embedded schema. Both ends must agree on field order out of band.

use bytes::{Buf, BufMut};

use crate::error::DecodeError;

/// Width of string and sequence length prefixes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Length prefix for `len` items.
///
/// Anything past `u32::MAX` is cut off, so the prefix always matches what is
/// written. No frame can carry that much anyway.
pub fn length_prefix(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Types that can append their wire encoding to a byte buffer.
pub trait WireEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types that can be decoded from the front of a [`WireReader`].
///
/// Implementations consume bytes from the reader as they go; the packet
/// discards the reader's progress when decoding fails, so a partially decoded
/// record never moves the packet cursor.
pub trait WireDecode: Sized {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError>;
}

/// Bounds-checked forward reader over a byte slice.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Consume exactly `len` bytes, or fail without consuming anything.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::InsufficientData {
                needed: len,
                remaining,
            });
        }
        let chunk = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(chunk)
    }

    /// Read a length prefix and check it against the bytes left behind it.
    ///
    /// `unit` is the minimum encoded size of one counted element.
    pub fn length_prefix(&mut self, unit: usize) -> Result<usize, DecodeError> {
        let declared = self.take(LENGTH_PREFIX_SIZE)?.get_u32() as usize;
        let remaining = self.remaining();
        if declared.saturating_mul(unit) > remaining {
            return Err(DecodeError::LengthOverflow {
                declared,
                remaining,
            });
        }
        Ok(declared)
    }
}

macro_rules! impl_wire_for_number {
    ($($t:ty => $put:ident, $get:ident);* $(;)?) => {
        $(
            impl WireEncode for $t {
                #[inline]
                fn encode(&self, out: &mut Vec<u8>) {
                    out.$put(*self);
                }
            }

            impl WireDecode for $t {
                #[inline]
                fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
                    Ok(reader.take(std::mem::size_of::<$t>())?.$get())
                }
            }
        )*
    };
}

impl_wire_for_number!(
    u8 => put_u8, get_u8;
    i8 => put_i8, get_i8;
    u16 => put_u16, get_u16;
    i16 => put_i16, get_i16;
    u32 => put_u32, get_u32;
    i32 => put_i32, get_i32;
    u64 => put_u64, get_u64;
    i64 => put_i64, get_i64;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
);

impl WireEncode for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        out.put_u8(u8::from(*self));
    }
}

impl WireDecode for bool {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        match reader.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }
}

impl WireEncode for str {
    fn encode(&self, out: &mut Vec<u8>) {
        let len = length_prefix(self.len());
        out.put_u32(len);
        out.put_slice(&self.as_bytes()[..len as usize]);
    }
}

impl WireEncode for String {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_str().encode(out);
    }
}

impl WireDecode for String {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let len = reader.length_prefix(1)?;
        let bytes = reader.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8)
    }
}

impl<T: WireEncode> WireEncode for [T] {
    fn encode(&self, out: &mut Vec<u8>) {
        let count = length_prefix(self.len());
        out.put_u32(count);
        for item in &self[..count as usize] {
            item.encode(out);
        }
    }
}

impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_slice().encode(out);
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let count = reader.length_prefix(1)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(reader)?);
        }
        Ok(items)
    }
}

impl<T: WireEncode + ?Sized> WireEncode for &T {
    fn encode(&self, out: &mut Vec<u8>) {
        (**self).encode(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<T: WireEncode + ?Sized>(value: &T) -> Vec<u8> {
        let mut out = Vec::new();
        value.encode(&mut out);
        out
    }

    #[test]
    fn test_integers_are_big_endian() {
        assert_eq!(encoded(&0x0102u16), vec![0x01, 0x02]);
        assert_eq!(encoded(&-2i32), vec![0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(encoded(&1u64), vec![0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_float_uses_ieee_bits() {
        assert_eq!(encoded(&1.0f32), vec![0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_string_layout() {
        assert_eq!(encoded("Bob"), vec![0, 0, 0, 3, b'B', b'o', b'b']);
        assert_eq!(encoded(""), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_length_prefix_saturates() {
        assert_eq!(length_prefix(0), 0);
        assert_eq!(length_prefix(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(length_prefix(u32::MAX as usize + 1), u32::MAX);
    }

    #[test]
    fn test_take_past_end_consumes_nothing() {
        let data = [1u8, 2, 3];
        let mut reader = WireReader::new(&data);
        assert_eq!(
            reader.take(4),
            Err(DecodeError::InsufficientData {
                needed: 4,
                remaining: 3
            })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_string_length_overflow() {
        let data = [0u8, 0, 0, 10, b'a', b'b'];
        let mut reader = WireReader::new(&data);
        assert_eq!(
            String::decode(&mut reader),
            Err(DecodeError::LengthOverflow {
                declared: 10,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let data = [0u8, 0, 0, 2, 0xC3, 0x28];
        let mut reader = WireReader::new(&data);
        assert_eq!(String::decode(&mut reader), Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn test_bool_rejects_other_bytes() {
        let mut reader = WireReader::new(&[2u8]);
        assert_eq!(bool::decode(&mut reader), Err(DecodeError::InvalidBool(2)));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_sequence_roundtrip() {
        let values = vec![String::from("a"), String::new(), String::from("ccc")];
        let bytes = encoded(&values);
        let mut reader = WireReader::new(&bytes);
        assert_eq!(Vec::<String>::decode(&mut reader).unwrap(), values);
        assert_eq!(reader.remaining(), 0);
    }
}
