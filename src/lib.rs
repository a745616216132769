//! eventq — a lock-free multi-producer / single-consumer event queue.
//!
//! A Michael-&-Scott style non-blocking FIFO operating over a fixed,
//! pre-allocated pool of entries, together with a lock-free free-list that
//! recycles entries without per-event heap allocation. A Rust port of the
//! queue core from [bostelk/event-queue](https://github.com/bostelk/event-queue).
//!
//! # Key Properties
//!
//! - No heap allocation on the hot path: entries are drawn from and
//!   returned to a fixed-capacity pool allocated once at construction.
//! - Lock-free: every operation completes in a bounded number of its own
//!   steps regardless of scheduling delays to other threads. No operation
//!   parks, sleeps, or acquires a lock.
//! - MPMC-correct algorithm (Michael & Scott), exercised as MPSC: any number
//!   of producer threads may call [`EventQueue::enqueue`]; any number of
//!   threads may call [`EventQueue::poll`].
//! - Saturation policy is silent drop: when the pool is exhausted, `enqueue`
//!   returns `false` rather than blocking the caller.
//!
//! # Example
//!
//! ```
//! use eventq::{Config, EventKind, EventQueue};
//!
//! let queue = EventQueue::with_capacity(1024, Config::default()).unwrap();
//!
//! queue.enqueue(EventKind::Random);
//!
//! while let Some(event) = queue.poll() {
//!     println!("producer {} stamped {:?} at {}", event.producer_id, event.kind, event.timestamp);
//! }
//! ```

mod backoff;
mod clock;
mod config;
mod entry;
mod error;
mod event;
mod free_list;
mod invariants;
mod link;
mod metrics;
mod pool;
mod queue;

pub use config::Config;
pub use error::QueueError;
pub use event::{Event, EventKind};
pub use metrics::MetricsSnapshot;
pub use queue::EventQueue;
