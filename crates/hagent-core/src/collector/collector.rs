//! Main collector that runs every registered prober once per cycle.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::collector::Prober;

/// Timing and outcome of one prober within a cycle.
#[derive(Debug, Clone)]
pub struct ProbeTiming {
    pub name: String,
    pub elapsed: Duration,
    /// Error message if the probe failed.
    pub error: Option<String>,
}

/// Timing information for a whole cycle.
///
/// Used for debugging and performance monitoring.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total cycle time.
    pub total: Duration,
    /// Per-prober results, in registration order.
    pub probes: Vec<ProbeTiming>,
}

impl CollectorTiming {
    pub fn failures(&self) -> usize {
        self.probes.iter().filter(|p| p.error.is_some()).count()
    }
}

/// Runs probers serially.
///
/// One failing prober is logged and does not prevent the others from
/// running in the same cycle.
#[derive(Default)]
pub struct Collector {
    probers: Vec<Box<dyn Prober>>,
    /// Timing information from the last probe_all call.
    last_timing: Option<CollectorTiming>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prober. Probers run in the order they were added.
    pub fn with_prober(mut self, prober: Box<dyn Prober>) -> Self {
        self.probers.push(prober);
        self
    }

    pub fn add_prober(&mut self, prober: Box<dyn Prober>) {
        self.probers.push(prober);
    }

    pub fn len(&self) -> usize {
        self.probers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probers.is_empty()
    }

    /// Names of registered probers, in run order.
    pub fn prober_names(&self) -> Vec<&str> {
        self.probers.iter().map(|p| p.name()).collect()
    }

    /// Returns timing information from the last probe_all call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Runs one cycle over every prober.
    pub fn probe_all(&mut self) -> &CollectorTiming {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();

        for prober in &mut self.probers {
            let start = Instant::now();
            let result = prober.probe();
            let elapsed = start.elapsed();

            let error = match result {
                Ok(()) => {
                    debug!(prober = prober.name(), ?elapsed, "probe ok");
                    None
                }
                Err(e) => {
                    warn!(prober = prober.name(), error = %e, "probe failed");
                    Some(e.to_string())
                }
            };
            timing.probes.push(ProbeTiming {
                name: prober.name().to_string(),
                elapsed,
                error,
            });
        }

        timing.total = total_start.elapsed();
        self.last_timing.insert(timing)
    }
}
