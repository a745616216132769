//! Debug assertion macros for the invariants documented in SPEC_FULL.md.
//!
//! Active only under `cfg(debug_assertions)`, so zero overhead in release
//! builds, mirroring how the teacher's own lock-free ring buffer guards its
//! sequence-number invariants.

// =============================================================================
// INV-EVQ-01: no Unknown events reach the FIFO
// =============================================================================

/// `enqueue` must never be asked to link the `Unknown` sentinel kind.
macro_rules! debug_assert_valid_event {
    ($kind:expr) => {
        debug_assert!(
            $kind != crate::event::EventKind::Unknown,
            "INV-EVQ-01 violated: attempted to enqueue the Unknown sentinel kind"
        )
    };
}

// =============================================================================
// INV-Q-01: head and tail are never null after initialization
// =============================================================================

/// A link read from `head`/`tail`, or a head's `next` when the queue is
/// non-empty, must never be null.
macro_rules! debug_assert_not_null {
    ($link:expr, $where:literal) => {
        debug_assert!(!$link.is_null(), "INV-Q-01 violated: {}", $where)
    };
}

// =============================================================================
// INV-POOL-01: free list never holds more entries than the pool has
// =============================================================================

/// The free list's advisory length must never exceed the pool's total
/// capacity.
macro_rules! debug_assert_bounded_free {
    ($free_len:expr, $capacity:expr) => {
        debug_assert!(
            $free_len <= $capacity,
            "INV-POOL-01 violated: free_count {} exceeds capacity {}",
            $free_len,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_free;
pub(crate) use debug_assert_not_null;
pub(crate) use debug_assert_valid_event;
