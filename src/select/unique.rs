//! Unique-values top-K selection: keep every row whose ordering value ranks
//! among the k best distinct values.
//!
//! Retained rows cluster into groups, one per distinct value, held in the
//! heap by value and compared only through their representative (the first
//! row that opened the group). A group accumulates all equal-valued rows in
//! consumption order, so the flattened output can exceed k rows whenever the
//! boundary value is tied.
//!
//! Finding an existing group for an incoming row is a linear scan bounded by
//! k; k is expected to be small next to the stream length.

use std::cmp::Ordering;

use super::heap::RankHeap;

/// Rows sharing one ordering value. Non-empty; the first member represents
/// the group in all comparisons.
#[derive(Debug, Clone)]
pub struct Group<T> {
    members: Vec<T>,
}

impl<T> Group<T> {
    fn new(item: T) -> Self {
        Self {
            members: vec![item],
        }
    }

    pub fn representative(&self) -> &T {
        &self.members[0]
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

pub struct UniqueTopKSelector<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    k: usize,
    rank: C,
    heap: RankHeap<Group<T>>,
}

impl<T, C> UniqueTopKSelector<T, C>
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

    /// Number of retained distinct-value groups. Always `<= k`.
    pub fn group_count(&self) -> usize {
        self.heap.len()
    }

    /// Offer one item.
    pub fn consume(&mut self, item: T) {
        let rank = &self.rank;
        let by_representative =
            |a: &Group<T>, b: &Group<T>| rank(a.representative(), b.representative());

        let Some(worst) = self.heap.peek() else {
            self.heap.push(Group::new(item), &by_representative);
            return;
        };

        match rank(&item, worst.representative()) {
            // Same value as the boundary group: grow it in place.
            Ordering::Equal => {
                if let Some(worst) = self.heap.peek_mut() {
                    worst.members.push(item);
                }
            }
            // Worse than every retained value: only worth a group while
            // capacity remains.
            Ordering::Less => {
                if self.heap.len() < self.k {
                    self.heap.push(Group::new(item), &by_representative);
                }
            }
            Ordering::Greater => {
                // One group per distinct value: join an existing equal-valued
                // group before considering a new one. Linear in k.
                if let Some(group) = self
                    .heap
                    .iter_mut()
                    .find(|group| rank(&item, group.representative()) == Ordering::Equal)
                {
                    group.members.push(item);
                } else if self.heap.len() < self.k {
                    self.heap.push(Group::new(item), &by_representative);
                } else {
                    // Evict the worst group wholesale, accumulated ties and all.
                    self.heap.replace_root(Group::new(item), &by_representative);
                }
            }
        }
    }

    /// Retained groups in unspecified order. Idempotent between consumes.
    pub fn groups(&self) -> &[Group<T>] {
        self.heap.as_slice()
    }

    /// Flatten surviving groups. Within a group rows keep consumption order;
    /// across groups the order is unspecified.
    pub fn into_rows(self) -> Vec<T> {
        self.heap
            .into_vec()
            .into_iter()
            .flat_map(|group| group.members)
            .collect()
    }
}
