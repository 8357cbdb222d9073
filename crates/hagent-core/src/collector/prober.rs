//! The interface every prober implements.

use crate::collector::CollectError;

/// A source of metrics sampled once per collection cycle.
///
/// Probers register their metrics when constructed and update the
/// registered cells on every successful [`Prober::probe`] call. A failed
/// probe leaves the cells at their last successfully probed values.
pub trait Prober: Send {
    /// Short name used in logs and cycle reports.
    fn name(&self) -> &str;

    /// Runs one sampling pass.
    fn probe(&mut self) -> Result<(), CollectError>;
}
