use crate::backoff::Backoff;
use crate::clock;
use crate::config::Config;
use crate::error::QueueError;
use crate::event::{Event, EventKind};
use crate::free_list::FreeList;
use crate::invariants::{debug_assert_not_null, debug_assert_valid_event};
use crate::link::{AtomicLink, Link, NULL_INDEX};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::pool::Pool;
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A lock-free, Michael-&-Scott style FIFO event queue over a fixed,
/// pre-allocated pool of entries.
///
/// The FIFO always holds at least one (sentinel) node; `head` and `tail`
/// are never null once a queue is built. Producers call [`enqueue`](Self::enqueue)
/// from any number of threads; a single consumer (or, since the algorithm
/// is MPMC-correct, multiple consumers) calls [`poll`](Self::poll).
///
/// # Example
///
/// ```
/// use eventq::{Config, EventKind, EventQueue};
///
/// let queue = EventQueue::with_capacity(4, Config::default()).unwrap();
/// queue.enqueue(EventKind::Random);
/// let event = queue.poll().unwrap();
/// assert_eq!(event.kind, EventKind::Random);
/// assert!(queue.poll().is_none());
/// ```
pub struct EventQueue {
    pool: Pool,
    free: FreeList,
    // `head` and `tail` are mutated by every poll and every enqueue
    // respectively, from different threads; padding them to their own
    // cache lines keeps a busy producer from bouncing the consumer's line
    // (and vice versa) on every operation.
    head: CachePadded<AtomicLink>,
    tail: CachePadded<AtomicLink>,
    count: AtomicUsize,
    metrics: Metrics,
    config: Config,
}

impl EventQueue {
    /// Builds a queue backed by `capacity` pre-allocated entries.
    ///
    /// One entry is consumed immediately as the permanent FIFO sentinel, so
    /// the queue can hold at most `capacity - 1` user events at a time.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InsufficientBuffer`] if `capacity` is `0` — a
    /// queue needs room for at least the sentinel.
    pub fn with_capacity(capacity: usize, config: Config) -> Result<Self, QueueError> {
        if capacity < 1 {
            return Err(QueueError::InsufficientBuffer { requested: capacity, minimum: 1 });
        }

        let pool = Pool::new(capacity);
        let free = FreeList::new(0, capacity);

        // Acquire the first free entry as the initial sentinel. The pool was
        // just built, so the free list cannot be exhausted here.
        let sentinel = free.pop(&pool).expect("a freshly built pool is never exhausted");
        pool.entry(sentinel).next.store_advancing(NULL_INDEX, Ordering::Relaxed);

        Ok(Self {
            pool,
            free,
            head: CachePadded::new(AtomicLink::new(Link { tag: 0, index: sentinel })),
            tail: CachePadded::new(AtomicLink::new(Link { tag: 0, index: sentinel })),
            count: AtomicUsize::new(0),
            metrics: Metrics::default(),
            config,
        })
    }

    /// Enqueues a new event of the given kind, stamped with the current
    /// timestamp and this thread's producer id.
    ///
    /// Returns `true` if the event was linked onto the FIFO, `false` if it
    /// was silently dropped because the pool is exhausted (policy: drop on
    /// saturation — SPEC_FULL.md §7). Dropped events are observable only via
    /// [`metrics`](Self::metrics).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `kind` is [`EventKind::Unknown`] —
    /// `Unknown` is a null-object sentinel and must never be enqueued. In
    /// release builds this is instead treated as a silent drop.
    pub fn enqueue(&self, kind: EventKind) -> bool {
        debug_assert_valid_event!(kind);
        if kind == EventKind::Unknown {
            return false;
        }

        let Some(idx) = self.free.pop(&self.pool) else {
            if self.config.enable_metrics {
                self.metrics.record_dropped();
            }
            return false;
        };

        let event = Event { kind, timestamp: clock::now(), producer_id: clock::producer_id() };
        let entry = self.pool.entry(idx);
        // SAFETY: `idx` was just exclusively popped from the free list; no
        // other actor holds a reference to this slot's payload yet.
        unsafe {
            (*entry.event.get()).write(event);
        }
        // store_advancing, not a plain store: a hard reset to a fixed bit
        // pattern here is exactly the ABA hazard this scheme exists to
        // prevent (see free_list::push's doc comment and INV-LINK-01) — a
        // long-stalled enqueuer from many generations ago could otherwise
        // find its stale CAS matching this slot's reset value again.
        entry.next.store_advancing(NULL_INDEX, Ordering::Relaxed);

        let mut backoff = Backoff::new();
        let t = loop {
            let t = self.tail.load(Ordering::Acquire);
            let t_entry = self.pool.entry(t.index);
            let next = t_entry.next.load(Ordering::Acquire);

            if t != self.tail.load(Ordering::Acquire) {
                backoff.spin();
                continue;
            }

            if next.is_null() {
                match t_entry.next.compare_exchange(next, idx, Ordering::AcqRel, Ordering::Acquire) {
                    Ok(_) => break t,
                    Err(_) => backoff.spin(),
                }
            } else {
                // A lagging tail: help advance it before retrying.
                let _ = self.tail.compare_exchange(t, next.index, Ordering::AcqRel, Ordering::Acquire);
                backoff.spin();
            }
        };

        // Publish the new tail. Whether this succeeds is irrelevant to
        // correctness — another enqueuer or poller may already have helped.
        let _ = self.tail.compare_exchange(t, idx, Ordering::AcqRel, Ordering::Acquire);

        self.count.fetch_add(1, Ordering::Relaxed);
        if self.config.enable_metrics {
            self.metrics.record_enqueued();
        }
        true
    }

    /// Removes and returns the oldest enqueued event, or `None` if the FIFO
    /// is observably empty.
    pub fn poll(&self) -> Option<Event> {
        let mut backoff = Backoff::new();
        loop {
            let h = self.head.load(Ordering::Acquire);
            let t = self.tail.load(Ordering::Acquire);
            let h_entry = self.pool.entry(h.index);
            let next = h_entry.next.load(Ordering::Acquire);

            if h != self.head.load(Ordering::Acquire) {
                backoff.spin();
                continue;
            }

            if h.index == t.index {
                if next.is_null() {
                    return None;
                }
                // A lagging tail: help advance it before retrying.
                let _ = self.tail.compare_exchange(t, next.index, Ordering::AcqRel, Ordering::Acquire);
                backoff.spin();
                continue;
            }

            debug_assert_not_null!(next, "head is not the tail, so its next must be set");
            let next_entry = self.pool.entry(next.index);
            // Read the candidate sentinel's payload BEFORE the head CAS:
            // once head advances, the old head becomes eligible for the
            // free list and a concurrent enqueue may overwrite it. `Event`
            // is `Copy`, so a losing racer's read here is simply discarded,
            // never double-freed or left dangling.
            let event = unsafe { (*next_entry.event.get()).assume_init_read() };

            match self.head.compare_exchange(h, next.index, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => {
                    self.free.push(&self.pool, h.index);
                    self.count.fetch_sub(1, Ordering::Relaxed);
                    if self.config.enable_metrics {
                        self.metrics.record_polled();
                    }
                    return Some(event);
                }
                Err(_) => backoff.spin(),
            }
        }
    }

    /// Advisory count of events currently reachable from `head`.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Returns `true` if no events are currently reachable from `head`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advisory count of entries currently on the free list.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total number of pre-allocated entries, including the one permanently
    /// consumed by the sentinel.
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// A point-in-time snapshot of advisory activity counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

// SAFETY: every field is itself Send + Sync (Pool and FreeList are built
// from atomics whose interior mutability is already synchronized by the
// CAS protocol); no additional unsynchronized state is introduced here.
unsafe impl Send for EventQueue {}
unsafe impl Sync for EventQueue {}
