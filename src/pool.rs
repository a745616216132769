use crate::entry::Entry;
use crate::link::{AtomicLink, Link, NULL_INDEX};
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;

/// The fixed, pre-allocated arena backing an [`EventQueue`](crate::EventQueue).
///
/// Entries are never freed individually; the whole arena is dropped with the
/// queue. SPEC_FULL.md §3 resolves the original "caller-supplied buffer"
/// wording as an owned allocation: `Pool` is the Rust-idiomatic realization
/// of that buffer, and no pointer into it ever escapes this module or
/// [`crate::queue`].
pub(crate) struct Pool {
    entries: Box<[Entry]>,
}

impl Pool {
    /// Builds a pool of `capacity` entries, linking entries `0..capacity-1`
    /// forward into a free chain terminated by entry `capacity - 1`.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        for i in 0..capacity {
            let next = if i + 1 < capacity { (i + 1) as u32 } else { NULL_INDEX };
            entries.push(Entry {
                event: UnsafeCell::new(MaybeUninit::uninit()),
                next: AtomicLink::new(Link { tag: 0, index: next }),
            });
        }
        Self { entries: entries.into_boxed_slice() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn entry(&self, index: u32) -> &Entry {
        &self.entries[index as usize]
    }
}

// SAFETY: Pool is Send + Sync because access to each Entry's UnsafeCell is
// mediated by the CAS protocol in `FreeList`/`EventQueue`, not by Pool
// itself (see Entry's own Sync impl).
unsafe impl Send for Pool {}
unsafe impl Sync for Pool {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn new_links_entries_into_a_forward_chain_terminated_by_null() {
        let pool = Pool::new(4);
        assert_eq!(pool.entry(0).next.load(Ordering::Relaxed).index, 1);
        assert_eq!(pool.entry(1).next.load(Ordering::Relaxed).index, 2);
        assert_eq!(pool.entry(2).next.load(Ordering::Relaxed).index, 3);
        assert!(pool.entry(3).next.load(Ordering::Relaxed).is_null());
    }

    #[test]
    fn single_entry_pool_terminates_immediately() {
        let pool = Pool::new(1);
        assert!(pool.entry(0).next.load(Ordering::Relaxed).is_null());
        assert_eq!(pool.len(), 1);
    }
}
