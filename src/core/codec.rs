//! # Frame Codec
//!
//! Length-prefixed framing for stream transports.
//!
//! ```text
//! [Length(4, u32 BE)] [Payload(N)]
//! ```
//!
//! The payload is whatever the packet handed to the transport, i.e. the bytes
//! after its send transform. Frames above the configured maximum are rejected
//! before any allocation for the payload happens.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::config::MAX_FRAME_SIZE;
use crate::error::TransportError;

/// Size of the length header in bytes
pub const FRAME_HEADER_SIZE: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    /// Create a codec. The limit is capped at `u32::MAX`, the largest length the header can carry.
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            max_frame_size: max_frame_size.min(u32::MAX as usize),
        }
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE)
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = TransportError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        // Peek so a partial frame leaves the buffer untouched
        let len = (&src[..FRAME_HEADER_SIZE]).get_u32() as usize;
        if len > self.max_frame_size {
            return Err(TransportError::OversizedFrame(len));
        }

        let total = FRAME_HEADER_SIZE + len;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(FRAME_HEADER_SIZE);
        Ok(Some(src.split_to(len).freeze()))
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = TransportError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let len = match u32::try_from(item.len()) {
            Ok(len) if item.len() <= self.max_frame_size => len,
            _ => return Err(TransportError::OversizedFrame(item.len())),
        };

        dst.reserve(FRAME_HEADER_SIZE + item.len());
        dst.put_u32(len);
        dst.extend_from_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_encode_then_decode() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        codec
            .encode(Bytes::from_static(b"hello"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 5]);

        let frame = codec.decode(&mut buf).unwrap();
        assert_eq!(frame.as_deref(), Some(&b"hello"[..]));
        assert!(buf.is_empty());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_partial_frame_waits_for_more() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0u8, 0, 0, 3, b'a'][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 5);

        buf.extend_from_slice(b"bc");
        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some(&b"abc"[..])
        );
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut codec = FrameCodec::new(8);
        let mut buf = BytesMut::from(&[0u8, 0, 0, 9][..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(TransportError::OversizedFrame(9))
        ));

        let mut out = BytesMut::new();
        assert!(matches!(
            codec.encode(Bytes::from(vec![0u8; 9]), &mut out),
            Err(TransportError::OversizedFrame(9))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_max_frame_size_capped_at_header_range() {
        assert_eq!(FrameCodec::new(16).max_frame_size(), 16);
        assert_eq!(FrameCodec::new(usize::MAX).max_frame_size(), u32::MAX as usize);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_empty_frame() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        codec.encode(Bytes::new(), &mut buf).unwrap();
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Bytes::new()));
    }
}
