//! Probers for the Linux `/proc` filesystem.
//!
//! This module provides parsers and probers for reading network, memory and
//! routing information from the `/proc` virtual filesystem.

pub mod gateway;
pub mod memory;
pub mod netif;
pub mod parser;

pub use gateway::{CommandPinger, GatewayProber, Pinger};
pub use memory::MemoryProber;
pub use netif::{Applied, CounterRecord, DeviceTable, NetIfProber, ProbeState};
pub use parser::ParseError;
