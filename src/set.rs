//! An ordered set implemented with an arena-allocated AVL tree.

use std::fmt;
use std::iter::FromIterator;

use crate::cursor::Cursor;
use crate::iter::Iter;
use crate::tree::Tree;

/// An ordered set implemented with an AVL tree.
///
/// ```
/// use arena_avl::{AvlTreeSet, Lookup};
/// let mut set = AvlTreeSet::new();
/// assert!(set.insert(20));
/// assert!(set.insert(10));
/// assert!(set.insert(30));
/// assert!(!set.insert(20));
/// assert_eq!(set.in_order_string(), "10 20 30");
/// assert!(set.remove(&10));
/// assert_eq!(set.find(&10), Lookup::NotFound);
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct AvlTreeSet<T> {
    tree: Tree<T>,
}

/// Outcome of [`AvlTreeSet::find`].
///
/// Displays as `found` or `not found`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    Found,
    NotFound,
}

impl Lookup {
    pub fn is_found(self) -> bool {
        self == Lookup::Found
    }
}

impl From<bool> for Lookup {
    fn from(found: bool) -> Self {
        if found {
            Lookup::Found
        } else {
            Lookup::NotFound
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lookup::Found => f.write_str("found"),
            Lookup::NotFound => f.write_str("not found"),
        }
    }
}

impl<T: Ord> AvlTreeSet<T> {
    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree
            .find(value)
            .map(|node_id| &self.tree.node(node_id).key)
    }

    /// Returns true if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    /// Reports whether the set contains a value.
    pub fn find(&self, value: &T) -> Lookup {
        self.contains(value).into()
    }

    /// Inserts a value into the set.
    /// Returns false, leaving the set untouched, if the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    ///
    /// A value with two children is replaced by its in-order predecessor.
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value)
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency()
    }
}

impl<T> AvlTreeSet<T> {
    /// Creates an empty set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of levels of the underlying tree.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|node_id| &self.tree.node(node_id).key)
    }

    /// Returns the largest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|node_id| &self.tree.node(node_id).key)
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree)
    }

    /// Returns a detached cursor at the smallest value.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.tree.first(), self.tree.generation())
    }

    pub(crate) fn tree(&self) -> &Tree<T> {
        &self.tree
    }
}

impl<T: Ord + fmt::Display> AvlTreeSet<T> {
    /// Renders the values in ascending order, separated by spaces.
    /// An empty set renders as `empty`.
    ///
    /// # Panics
    ///
    /// Panics if the `Display` implementation of `T` returns an error,
    /// as `ToString::to_string` does.
    pub fn in_order_string(&self) -> String {
        let mut out = String::new();
        self.tree
            .write_in_order(&mut out)
            .expect("a Display implementation returned an error unexpectedly");
        out
    }
}

impl<T: fmt::Display> AvlTreeSet<T> {
    /// Renders the tree level by level.
    ///
    /// Each level is a line break, two spaces and `<level>:` followed by its
    /// values, each preceded by a space. A missing child whose sibling exists
    /// shows as `_`. An empty set renders as `empty`.
    ///
    /// # Panics
    ///
    /// Panics if the `Display` implementation of `T` returns an error.
    ///
    /// ```
    /// use arena_avl::AvlTreeSet;
    /// let set: AvlTreeSet<i32> = [2, 1, 3, 4].into_iter().collect();
    /// assert_eq!(set.structure_string(), "\n  1: 2\n  2: 1 3\n  3: _ 4");
    /// ```
    pub fn structure_string(&self) -> String {
        let mut out = String::new();
        self.tree
            .write_levels(&mut out)
            .expect("a Display implementation returned an error unexpectedly");
        out
    }
}

impl<T> Default for AvlTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for AvlTreeSet<T> {}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T> Extend<&'a T> for AvlTreeSet<T>
where
    T: Ord + Copy,
    T: 'a,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}
