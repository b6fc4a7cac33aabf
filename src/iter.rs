use std::fmt;
use std::iter::FusedIterator;

use crate::tree::{Link, Tree};

/// An iterator over the values of a set in ascending order.
///
/// Walks parent links from node to node and keeps no stack. The iterator
/// borrows the set, so the set cannot be changed while it is alive.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    next: Link,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            next: tree.first(),
            remaining: tree.len(),
        }
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node_id = self.next?;
        self.next = self.tree.successor(node_id);
        self.remaining -= 1;
        Some(&self.tree.node(node_id).key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Ord> ExactSizeIterator for Iter<'_, T> {}

impl<T: Ord> FusedIterator for Iter<'_, T> {}
