#![no_main]

use libfuzzer_sys::fuzz_target;
use packet_wire::protocol::Character;
use packet_wire::{ByteShift, Packet};

fuzz_target!(|data: &[u8]| {
    // Typed reads over arbitrary bytes must fail cleanly, never panic
    let mut packet = Packet::from_data(data);
    while packet.read::<Character>().is_some() {}
    let _ = packet.read::<u8>();

    let mut packet = Packet::from_data(data);
    let _ = packet.read::<Vec<String>>();

    // Same bytes as they would arrive through a shifted transport
    let mut packet = Packet::with_transform(ByteShift::default());
    packet.on_receive(data);
    let _ = packet.read::<Character>();
});
