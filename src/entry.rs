use crate::event::Event;
use crate::link::AtomicLink;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

/// A cell in the [`Pool`](crate::pool::Pool): one event payload, one forward
/// link. Every entry is permanently resident; it migrates between the free
/// list and the FIFO by pointer (index) splicing only (SPEC_FULL.md §3).
pub(crate) struct Entry {
    pub event: UnsafeCell<MaybeUninit<Event>>,
    pub next: AtomicLink,
}

// SAFETY: `event` is only ever touched through the hand-off protocol
// enforced by `FreeList`/`EventQueue`: a slot is written by exactly one
// enqueuer before it is linked onto the FIFO, and read by pollers only
// while it is the FIFO's new sentinel — a state a slot enters exactly once
// per free-list acquisition. A losing poller's read races harmlessly
// because `Event` is `Copy` and the read has no side effects to undo.
unsafe impl Sync for Entry {}
