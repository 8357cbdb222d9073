//! hagent-core - shared library for the hagent health agent.
//!
//! Provides:
//! - `metrics` - hierarchical metrics namespace, value cells, JSON snapshots
//! - `collector` - probers for network interfaces, memory, default gateway
//!   and DNS, plus the collector that runs them

pub mod collector;
pub mod metrics;
