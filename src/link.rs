use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel index meaning "no entry" (the pool never holds `u32::MAX` entries).
pub(crate) const NULL_INDEX: u32 = u32::MAX;

/// A tagged reference to a pool entry: a 32-bit ABA-prevention generation
/// counter packed with a 32-bit pool index (`NULL_INDEX` means no entry).
///
/// INV-LINK-01: two `Link`s observed with the same `index` but different
/// `tag` refer to logically distinct occupancies of that slot — the tag
/// changes every time an atomic head is written, so a node that is popped
/// and later re-pushed with the same index can never be confused with the
/// node a stale CAS still expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub tag: u32,
    pub index: u32,
}

impl Link {
    pub const NULL: Link = Link { tag: 0, index: NULL_INDEX };

    #[inline]
    pub fn is_null(self) -> bool {
        self.index == NULL_INDEX
    }

    #[inline]
    const fn pack(self) -> u64 {
        (self.tag as u64) << 32 | self.index as u64
    }

    #[inline]
    const fn unpack(bits: u64) -> Self {
        Link { tag: (bits >> 32) as u32, index: bits as u32 }
    }
}

/// An atomic [`Link`], CAS'd as a single 64-bit word.
///
/// This is the crate's answer to Design Note "ABA in lock-free lists": every
/// successful [`compare_exchange`](AtomicLink::compare_exchange) bumps the
/// tag, so the classic free-list ABA hazard (pop A, push B, push A back,
/// racer's stale CAS of A succeeds against the wrong generation) cannot
/// occur — the stale CAS's expected bit pattern no longer matches once the
/// tag has moved on.
#[derive(Debug)]
pub(crate) struct AtomicLink(AtomicU64);

impl AtomicLink {
    pub fn new(link: Link) -> Self {
        Self(AtomicU64::new(link.pack()))
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> Link {
        Link::unpack(self.0.load(order))
    }

    #[inline]
    pub fn store(&self, link: Link, order: Ordering) {
        self.0.store(link.pack(), order);
    }

    /// Overwrites the index while advancing this slot's own tag by one,
    /// instead of hard-resetting it to whatever tag the caller's `Link`
    /// literal happens to carry.
    ///
    /// `entry.next` is shared by the free-list chain and the FIFO forward
    /// pointer for the same pool slot, and both `FreeList::push` and
    /// `EventQueue::enqueue` need to overwrite it outright (to the
    /// free-list's current top, or to `NULL`) rather than CAS it against a
    /// competitor. A plain [`store`](Self::store) of a fixed bit pattern
    /// (e.g. `Link::NULL`, tag `0`) can reproduce a bit pattern this slot
    /// held many generations ago, letting a CAS from a long-stalled thread
    /// — still holding that old snapshot — match it and splice itself onto
    /// an unrelated, much later occupancy of the slot (INV-LINK-01). Since
    /// only one thread ever holds exclusive ownership of a slot at the
    /// moment this is called, the tag only ever needs to move forward
    /// relative to its own last value, never back down to a fixed literal.
    #[inline]
    pub fn store_advancing(&self, new_index: u32, order: Ordering) {
        let current = Link::unpack(self.0.load(Ordering::Relaxed));
        let new = Link { tag: current.tag.wrapping_add(1), index: new_index };
        self.0.store(new.pack(), order);
    }

    /// CAS from `expected` to a link pointing at `new_index`, bumping the
    /// tag relative to `expected`. Returns the observed [`Link`] on failure.
    ///
    /// Implemented over `compare_exchange_weak`: every call site is already
    /// inside a retry loop, so spurious failures just cost one extra spin.
    #[inline]
    pub fn compare_exchange(
        &self,
        expected: Link,
        new_index: u32,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Link, Link> {
        let new = Link { tag: expected.tag.wrapping_add(1), index: new_index };
        match self.0.compare_exchange_weak(expected.pack(), new.pack(), success, failure) {
            Ok(_) => Ok(new),
            Err(actual) => Err(Link::unpack(actual)),
        }
    }
}
