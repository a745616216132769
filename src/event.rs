/// The kind of event carried by an [`Event`].
///
/// `Unknown` is the null-object sentinel: [`EventQueue::enqueue`](crate::EventQueue::enqueue)
/// rejects it, and the garbage payload sitting behind the FIFO's permanent
/// sentinel entry must never be read back as one of the other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventKind {
    /// Must never be enqueued; reserved for the FIFO sentinel's garbage slot.
    Unknown,
    /// A randomly-occurring event, produced by the demo producer loop.
    Random,
    /// A periodic liveness event.
    Heartbeat,
}

/// An immutable event payload, stamped by the queue at enqueue time.
///
/// `Event` is `Copy`: a losing racer in [`EventQueue::poll`](crate::EventQueue::poll)
/// reads a payload that never actually becomes reachable to it, and simply
/// discards the copy on CAS failure — no drop glue to worry about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// The kind of event that occurred.
    pub kind: EventKind,
    /// A monotonic, process-relative nanosecond timestamp stamped at enqueue time.
    pub timestamp: u64,
    /// An opaque integer identifying the enqueuing thread of control.
    pub producer_id: u64,
}
