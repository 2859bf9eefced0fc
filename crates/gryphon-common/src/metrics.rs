//! Error accounting for the response path.
//!
//! The frame encoder is handed a meter at construction time and never
//! consults a process-wide registry. Deployments that scrape Prometheus
//! wire up [`PrometheusErrorMeter`]; tests use [`AtomicErrorMeter`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use prometheus::IntCounter;

/// Sink for response-encoding error events.
pub trait ErrorMeter: Send + Sync {
    /// Record one encoding error.
    fn mark(&self);
}

/// Meter backed by a shared atomic counter.
///
/// Clones share the same underlying count. The count is eventually
/// consistent across concurrent markers; no ordering is guaranteed beyond
/// monotonicity.
#[derive(Debug, Clone, Default)]
pub struct AtomicErrorMeter {
    count: Arc<AtomicU64>,
}

impl AtomicErrorMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current error count.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl ErrorMeter for AtomicErrorMeter {
    fn mark(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Meter backed by an injected Prometheus counter.
pub struct PrometheusErrorMeter {
    counter: IntCounter,
}

impl PrometheusErrorMeter {
    pub fn new(counter: IntCounter) -> Self {
        Self { counter }
    }
}

impl ErrorMeter for PrometheusErrorMeter {
    fn mark(&self) {
        self.counter.inc();
    }
}
