//! # Utility Modules
//!
//! Supporting utilities used throughout the crate.
//!
//! ## Components
//! - **Transform**: byte transforms applied at the packet send/receive boundary
//! - **Logging**: structured logging setup
//! - **Metrics**: thread-safe packet traffic counters

pub mod logging;
pub mod metrics;
pub mod transform;
