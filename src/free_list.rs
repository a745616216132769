use crate::backoff::Backoff;
use crate::invariants::debug_assert_bounded_free;
use crate::link::{AtomicLink, Link};
use crate::pool::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A lock-free LIFO stack of unused pool entries — a Treiber stack over
/// tagged pool indices. Source of nodes for enqueues, sink for nodes
/// released by polls. Recycling order is unspecified (SPEC_FULL.md §3).
pub(crate) struct FreeList {
    head: AtomicLink,
    len: AtomicUsize,
}

impl FreeList {
    pub fn new(head_index: u32, len: usize) -> Self {
        Self {
            head: AtomicLink::new(Link { tag: 0, index: head_index }),
            len: AtomicUsize::new(len),
        }
    }

    /// Detaches the top entry, or returns `None` if the pool is exhausted
    /// (*PoolExhausted*, SPEC_FULL.md §7).
    pub fn pop(&self, pool: &Pool) -> Option<u32> {
        let mut backoff = Backoff::new();
        loop {
            let top = self.head.load(Ordering::Acquire);
            if top.is_null() {
                return None;
            }
            let next = pool.entry(top.index).next.load(Ordering::Acquire);
            match self.head.compare_exchange(top, next.index, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => {
                    self.len.fetch_sub(1, Ordering::Relaxed);
                    return Some(top.index);
                }
                Err(_) => backoff.spin(),
            }
        }
    }

    /// Returns an entry to the top of the stack.
    ///
    /// `entry.next` is written via [`AtomicLink::store_advancing`], not a
    /// plain [`AtomicLink::store`]: `index`'s `next` link also serves as the
    /// FIFO forward pointer whenever this slot is linked onto the queue
    /// instead of the free list, and a plain store back to a fixed bit
    /// pattern could reproduce a snapshot a long-stalled CAS from that other
    /// role still holds, defeating the tag's ABA protection (INV-LINK-01).
    /// `store_advancing` is sound here without re-reading first: at this
    /// point the caller holds exclusive logical ownership of `index` (it was
    /// just detached from the FIFO, or never linked anywhere), so no
    /// concurrent actor mutates it before the CAS below publishes it
    /// (Design Note open question, SPEC_FULL.md §9) — it only ever needs to
    /// advance relative to its own last value.
    pub fn push(&self, pool: &Pool, index: u32) {
        let mut backoff = Backoff::new();
        loop {
            let top = self.head.load(Ordering::Relaxed);
            pool.entry(index).next.store_advancing(top.index, Ordering::Relaxed);
            match self.head.compare_exchange(top, index, Ordering::Release, Ordering::Relaxed) {
                Ok(_) => {
                    let len = self.len.fetch_add(1, Ordering::Relaxed) + 1;
                    debug_assert_bounded_free!(len, pool.len());
                    return;
                }
                Err(_) => backoff.spin(),
            }
        }
    }

    /// Advisory count of entries currently on the free list.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_then_push_restores_len() {
        let pool = Pool::new(4);
        let free = FreeList::new(0, 4);

        let a = free.pop(&pool).unwrap();
        let b = free.pop(&pool).unwrap();
        assert_eq!(free.len(), 2);

        free.push(&pool, a);
        free.push(&pool, b);
        assert_eq!(free.len(), 4);
    }

    #[test]
    fn pop_exhausts_to_none() {
        let pool = Pool::new(2);
        let free = FreeList::new(0, 2);

        assert!(free.pop(&pool).is_some());
        assert!(free.pop(&pool).is_some());
        assert!(free.pop(&pool).is_none());
        assert_eq!(free.len(), 0);
    }

    #[test]
    fn push_is_lifo() {
        let pool = Pool::new(4);
        let free = FreeList::new(0, 4);

        let a = free.pop(&pool).unwrap();
        let b = free.pop(&pool).unwrap();
        free.push(&pool, a);
        // Most recently pushed is popped first.
        assert_eq!(free.pop(&pool), Some(a));
        free.push(&pool, b);
        assert_eq!(free.pop(&pool), Some(b));
    }
}
