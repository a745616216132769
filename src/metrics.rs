use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe, advisory activity counters for an [`EventQueue`](crate::EventQueue).
///
/// These are updated with `Relaxed` stores after the CAS that actually
/// performs the operation, and are never consulted by the CAS loops
/// themselves — they may drift relative to true concurrent activity and
/// exist purely for diagnostics (SPEC_FULL.md §9).
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    enqueued_total: AtomicU64,
    dropped_total: AtomicU64,
    polled_total: AtomicU64,
}

impl Metrics {
    #[inline]
    pub fn record_enqueued(&self) {
        self.enqueued_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self) {
        self.dropped_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_polled(&self) {
        self.polled_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enqueued_total: self.enqueued_total.load(Ordering::Relaxed),
            dropped_total: self.dropped_total.load(Ordering::Relaxed),
            polled_total: self.polled_total.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time, advisory snapshot of queue activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total events successfully linked onto the FIFO.
    pub enqueued_total: u64,
    /// Total events silently dropped because the pool was exhausted.
    pub dropped_total: u64,
    /// Total events successfully removed by `poll`.
    pub polled_total: u64,
}
