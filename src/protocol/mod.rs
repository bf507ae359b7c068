//! # Application Records
//!
//! Records built on the wire codec. Each record's field order is its wire
//! format; there is no schema on the wire.

pub mod character;

pub use character::Character;
