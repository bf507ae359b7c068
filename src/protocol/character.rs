//! Example record carried by the demo.
//!
//! ```text
//! [age: u16] [name: string] [height: f32]
//! ```

use std::fmt;

use crate::core::wire::{WireDecode, WireEncode, WireReader};
use crate::error::DecodeError;

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub age: u16,
    pub name: String,
    /// Meters
    pub height: f32,
}

impl Character {
    pub fn new(age: u16, name: impl Into<String>, height: f32) -> Self {
        Self {
            age,
            name: name.into(),
            height,
        }
    }
}

impl WireEncode for Character {
    fn encode(&self, out: &mut Vec<u8>) {
        self.age.encode(out);
        self.name.encode(out);
        self.height.encode(out);
    }
}

impl WireDecode for Character {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            age: u16::decode(reader)?,
            name: String::decode(reader)?,
            height: f32::decode(reader)?,
        })
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} years old, {} meters",
            self.name, self.age, self.height
        )
    }
}
