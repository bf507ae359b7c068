//! # Services
//!
//! Session-level flows built on the transport adapter.

pub mod demo;
