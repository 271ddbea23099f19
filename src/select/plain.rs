//! Plain top-K selection: keep the k best rows seen so far.
//!
//! A candidate only displaces the current worst retained item when it ranks
//! strictly better. On a tie at the eviction boundary the earlier-seen item
//! survives; that policy is observable and relied upon by callers.

use std::cmp::Ordering;

use super::heap::RankHeap;

pub struct TopKSelector<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    k: usize,
    rank: C,
    heap: RankHeap<T>,
}

impl<T, C> TopKSelector<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// `rank` returns `Greater` when its first argument is the better item.
    ///
    /// Panics if `k` is zero; callers validate the count before any item is
    /// consumed.
    pub fn new(k: usize, rank: C) -> Self {
        assert!(k >= 1, "selection count must be positive");
        Self {
            k,
            rank,
            heap: RankHeap::with_capacity(k),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer one item. Amortized O(log k).
    pub fn consume(&mut self, item: T) {
        if self.heap.len() < self.k {
            self.heap.push(item, &self.rank);
            return;
        }
        // Heap is non-empty here because k >= 1.
        let displaces = match self.heap.peek() {
            Some(worst) => (self.rank)(&item, worst) == Ordering::Greater,
            None => true,
        };
        if displaces {
            self.heap.replace_root(item, &self.rank);
        }
    }

    /// Retained items in unspecified order. Idempotent between consumes.
    pub fn top(&self) -> &[T] {
        self.heap.as_slice()
    }

    /// Final retained set in unspecified order.
    pub fn into_vec(self) -> Vec<T> {
        self.heap.into_vec()
    }
}
