#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use packet_wire::core::codec::FrameCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Frame decoding must respect the size limit and never panic
    let mut codec = FrameCodec::new(4096);
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_frame)) = codec.decode(&mut buf) {}
});
