//! Cumulative distribution of observed values (e.g. lookup latency).

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Default bucket upper bounds for latencies in milliseconds.
const LATENCY_BOUNDS_MS: &[f64] = &[
    0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
];

#[derive(Debug, Default)]
struct State {
    bounds: Vec<f64>,
    /// One slot per bound plus the overflow bucket.
    counts: Vec<u64>,
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

/// Shared, cloneable histogram.
#[derive(Debug, Clone)]
pub struct Distribution {
    inner: Arc<Mutex<State>>,
}

/// One histogram bucket. `upper` is `None` for the overflow bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub upper: Option<f64>,
    pub count: u64,
}

/// Point-in-time copy of a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSnapshot {
    pub count: u64,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub buckets: Vec<Bucket>,
}

impl DistributionSnapshot {
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

impl Distribution {
    /// Creates a distribution with the given ascending bucket bounds.
    pub fn with_bounds(mut bounds: Vec<f64>) -> Self {
        bounds.sort_by(f64::total_cmp);
        bounds.dedup();
        let counts = vec![0; bounds.len() + 1];
        Self {
            inner: Arc::new(Mutex::new(State {
                bounds,
                counts,
                ..State::default()
            })),
        }
    }

    /// Creates a distribution suited to millisecond latencies.
    pub fn latency_ms() -> Self {
        Self::with_bounds(LATENCY_BOUNDS_MS.to_vec())
    }

    /// Records one observation.
    pub fn add(&self, value: f64) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let idx = state
            .bounds
            .iter()
            .position(|&upper| value <= upper)
            .unwrap_or(state.bounds.len());
        state.counts[idx] += 1;
        if state.count == 0 {
            state.min = value;
            state.max = value;
        } else {
            state.min = state.min.min(value);
            state.max = state.max.max(value);
        }
        state.count += 1;
        state.sum += value;
    }

    pub fn snapshot(&self) -> DistributionSnapshot {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let buckets = state
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Bucket {
                upper: state.bounds.get(i).copied(),
                count,
            })
            .collect();
        let (min, max) = if state.count == 0 {
            (None, None)
        } else {
            (Some(state.min), Some(state.max))
        };
        DistributionSnapshot {
            count: state.count,
            sum: state.sum,
            min,
            max,
            buckets,
        }
    }
}
