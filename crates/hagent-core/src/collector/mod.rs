//! Probers that sample local resources into the metrics tree.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Collector                           │
//! │  ┌───────────────┐ ┌──────────────┐ ┌────────┐ ┌──────────┐  │
//! │  │  NetIfProber  │ │ MemoryProber │ │Gateway │ │DnsProber │  │
//! │  │ /proc/net/dev │ │/proc/meminfo │ │ route, │ │ Resolver │  │
//! │  │  DeviceTable  │ │              │ │  arp   │ │          │  │
//! │  └───────┬───────┘ └──────┬───────┘ └───┬────┘ └──────────┘  │
//! │          └────────────────┼─────────────┘                    │
//! │                    ┌──────▼──────┐                           │
//! │                    │  FileSystem │ (trait)                   │
//! │                    └──────┬──────┘                           │
//! └───────────────────────────┼──────────────────────────────────┘
//!                             │
//!                  ┌──────────┴──────────┐
//!           ┌──────▼──────┐       ┌──────▼──────┐
//!           │   RealFs    │       │   MockFs    │
//!           │  (Linux)    │       │  (Testing)  │
//!           └─────────────┘       └─────────────┘
//! ```
//!
//! Every prober registers its metrics in a [`crate::metrics::Directory`]
//! when constructed and updates them on each [`Prober::probe`].
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use hagent_core::collector::{Collector, RealFs};
//! use hagent_core::collector::procfs::NetIfProber;
//! use hagent_core::metrics::{Directory, MetricsTree};
//!
//! let tree = MetricsTree::new();
//! let netif = tree.root().register_directory("netif")?;
//! let mut collector = Collector::new()
//!     .with_prober(Box::new(NetIfProber::new(RealFs::new(), "/proc", netif)));
//! collector.probe_all();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use hagent_core::collector::{Collector, MockFs};
//! use hagent_core::collector::procfs::NetIfProber;
//! use hagent_core::metrics::{Directory, MetricsTree, Value};
//!
//! let tree = MetricsTree::new();
//! let netif = tree.root().register_directory("netif").unwrap();
//! let fs = MockFs::typical_system();
//! let mut collector = Collector::new()
//!     .with_prober(Box::new(NetIfProber::new(fs, "/proc", netif)));
//!
//! assert_eq!(collector.probe_all().failures(), 0);
//! assert_eq!(tree.get("/netif/lo/rx-packets"), Some(Value::U64(9876)));
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod dns;
mod error;
pub mod mock;
mod prober;
pub mod procfs;
pub mod traits;

pub use collector::{Collector, CollectorTiming, ProbeTiming};
pub use dns::{DnsProber, Resolver, SystemResolver};
pub use error::CollectError;
pub use mock::MockFs;
pub use prober::Prober;
pub use traits::{FileSystem, RealFs};
