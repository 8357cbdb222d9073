//! Hierarchical metrics namespace.
//!
//! Probers publish their values through the [`Directory`] trait: they create
//! subdirectories and register named, unit-tagged metrics backed by shared
//! value cells. The prober keeps a clone of every cell it registers and
//! updates it in place on each cycle; the registry reads the same cell when
//! it exports.
//!
//! [`MetricsTree`] is the in-process registry used by the daemon. Tests may
//! substitute any other [`Directory`] implementation.
//!
//! ```
//! use hagent_core::metrics::{Directory, MetricValue, MetricsTree, U64Cell, Unit};
//!
//! let tree = MetricsTree::new();
//! let dir = tree.root().register_directory("sys").unwrap();
//! let cell = U64Cell::new();
//! dir.register_metric("uptime", MetricValue::U64(cell.clone()), Unit::None, "uptime")
//!     .unwrap();
//! cell.set(42);
//! assert_eq!(tree.snapshot()[0].path, "/sys/uptime");
//! ```

mod cell;
mod distribution;
mod tree;

pub use cell::{BoolCell, TextCell, U64Cell};
pub use distribution::{Bucket, Distribution, DistributionSnapshot};
pub use tree::{MetricSample, MetricsTree, TreeDirectory, TreeSnapshot};

use serde::Serialize;

/// Unit tag attached to every registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Dimensionless count or flag.
    None,
    /// Byte count.
    Byte,
    Millisecond,
}

/// Storage behind a registered metric.
///
/// Cloning a `MetricValue` clones the handle, not the value: both sides
/// observe the same cell.
#[derive(Debug, Clone)]
pub enum MetricValue {
    U64(U64Cell),
    Bool(BoolCell),
    Text(TextCell),
    Distribution(Distribution),
}

impl MetricValue {
    /// Reads the current value.
    pub fn read(&self) -> Value {
        match self {
            MetricValue::U64(c) => Value::U64(c.get()),
            MetricValue::Bool(c) => Value::Bool(c.get()),
            MetricValue::Text(c) => Value::Text(c.get()),
            MetricValue::Distribution(d) => Value::Distribution(d.snapshot()),
        }
    }
}

/// Point-in-time reading of a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    U64(u64),
    Bool(bool),
    Text(String),
    Distribution(DistributionSnapshot),
}

/// Error type for registration failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Name is empty or contains a path separator.
    InvalidName(String),
    /// A metric is already registered at this path.
    DuplicateMetric(String),
    /// A metric occupies the path where a directory was requested.
    NotADirectory(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::InvalidName(name) => write!(f, "invalid metric name {:?}", name),
            RegistryError::DuplicateMetric(path) => {
                write!(f, "metric {} already registered", path)
            }
            RegistryError::NotADirectory(path) => write!(f, "{} is not a directory", path),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A directory in the metrics namespace.
pub trait Directory: Send + Sync {
    /// Absolute path of this directory (`/` for the root).
    fn path(&self) -> &str;

    /// Returns the subdirectory `name`, creating it if needed.
    fn register_directory(&self, name: &str) -> Result<Box<dyn Directory>, RegistryError>;

    /// Registers a metric named `name` in this directory.
    ///
    /// Fails if the name is already taken.
    fn register_metric(
        &self,
        name: &str,
        value: MetricValue,
        unit: Unit,
        description: &str,
    ) -> Result<(), RegistryError>;
}

/// Checks that `name` can be used as a single path component.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.contains('/') {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(())
}
