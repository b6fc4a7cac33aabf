use crate::error::{Error, Result};
use crate::set::AvlTreeSet;
use crate::tree::Link;

/// A position in a set that does not borrow it.
///
/// A cursor remembers the mutation generation of the set it was created from.
/// Once the set has been changed by a successful insert, a successful remove
/// or a clear, every use of the cursor fails with [`Error::StaleCursor`].
/// Generations are never shared between sets, so using a cursor with any
/// set other than the one that created it (or an unchanged clone of it)
/// fails the same way.
///
/// ```
/// use arena_avl::{AvlTreeSet, Error};
///
/// let mut set: AvlTreeSet<i32> = (1..=3).collect();
/// let mut cursor = set.cursor();
/// assert_eq!(cursor.get(&set), Ok(Some(&1)));
/// cursor.move_next(&set).unwrap();
/// assert_eq!(cursor.get(&set), Ok(Some(&2)));
///
/// set.insert(4);
/// assert!(matches!(cursor.get(&set), Err(Error::StaleCursor { .. })));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    node: Link,
    generation: u64,
}

impl Cursor {
    pub(crate) fn new(node: Link, generation: u64) -> Self {
        Self { node, generation }
    }

    /// Returns the value under the cursor, or `None` past the last value.
    pub fn get<'a, T: Ord>(&self, set: &'a AvlTreeSet<T>) -> Result<Option<&'a T>> {
        self.check(set)?;
        let tree = set.tree();
        Ok(self.node.map(|node_id| &tree.node(node_id).key))
    }

    /// Moves to the next greater value. Past the last value this is a no-op.
    pub fn move_next<T: Ord>(&mut self, set: &AvlTreeSet<T>) -> Result<()> {
        self.check(set)?;
        if let Some(node_id) = self.node {
            self.node = set.tree().successor(node_id);
        }
        Ok(())
    }

    /// Returns `true` if the cursor is past the last value.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    fn check<T>(&self, set: &AvlTreeSet<T>) -> Result<()> {
        let current = set.tree().generation();
        if current != self.generation {
            return Err(Error::StaleCursor {
                created: self.generation,
                current,
            });
        }
        Ok(())
    }
}
