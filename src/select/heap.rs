//! Bounded min-heap over an externally supplied rank comparator.
//!
//! `std::collections::BinaryHeap` needs `Ord`, which a runtime-configured
//! ordering cannot provide, so the sift routines here take the comparator as
//! an argument. The root is the minimum under the comparator: with a rank
//! comparison ("Greater = better") the root is the worst retained item.
//!
//! Iteration order over the backing storage is heap order, which callers
//! must treat as unspecified.

use std::cmp::Ordering;

#[derive(Debug)]
pub struct RankHeap<T> {
    items: Vec<T>,
}

impl<T> RankHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum item under the comparator used to build the heap.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Mutable access to the root. The caller must not change how the root
    /// compares to other items.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.first_mut()
    }

    /// Iterate all items in unspecified (heap) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable iteration in unspecified order. The caller must not change
    /// how any item compares to the others.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn push<C>(&mut self, item: T, cmp: &C)
    where
        C: Fn(&T, &T) -> Ordering,
    {
        self.items.push(item);
        self.sift_up(self.items.len() - 1, cmp);
    }

    pub fn pop<C>(&mut self, cmp: &C) -> Option<T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let root = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0, cmp);
        }
        root
    }

    /// Replace the root and restore the heap property in O(log n).
    pub fn replace_root<C>(&mut self, item: T, cmp: &C) -> Option<T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        if self.items.is_empty() {
            self.items.push(item);
            return None;
        }
        let old = std::mem::replace(&mut self.items[0], item);
        self.sift_down(0, cmp);
        Some(old)
    }

    fn sift_up<C>(&mut self, mut index: usize, cmp: &C)
    where
        C: Fn(&T, &T) -> Ordering,
    {
        while index > 0 {
            let parent = (index - 1) / 2;
            if cmp(&self.items[index], &self.items[parent]) == Ordering::Less {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<C>(&mut self, mut index: usize, cmp: &C)
    where
        C: Fn(&T, &T) -> Ordering,
    {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && cmp(&self.items[right], &self.items[left]) == Ordering::Less {
                smallest = right;
            }
            if cmp(&self.items[smallest], &self.items[index]) == Ordering::Less {
                self.items.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T> Default for RankHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
