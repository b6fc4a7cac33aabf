use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::balance::{Balance, Dir, HeightChange, Mode};

/// Handle of a node slot in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) type Link = Option<NodeId>;

// Shared by all trees, so no two trees are ever at the same generation
// unless one is an unmutated clone of the other.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, AtomicOrdering::Relaxed)
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
    pub(crate) balance: Balance,
}

impl<T> Node<T> {
    fn new(key: T, parent: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            balance: Balance::Balanced,
        }
    }

    pub(crate) fn child(&self, dir: Dir) -> Link {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    fn child_mut(&mut self, dir: Dir) -> &mut Link {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

/// AVL tree over an arena of node slots.
///
/// Children and parents are slot handles, so rotations and removals only
/// rewrite handles and never move nodes. Vacated slots are recycled through a
/// free list.
#[derive(Clone)]
pub(crate) struct Tree<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    root: Link,
    num_nodes: usize,
    generation: u64,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            num_nodes: 0,
            generation: next_generation(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.num_nodes
    }

    pub(crate) fn root(&self) -> Link {
        self.root
    }

    /// Changes on every successful mutation. Unique across trees.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of levels, 0 for an empty tree.
    /// Follows the taller side at each node, so this is logarithmic.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node_id) = current {
            height += 1;
            let node = self.node(node_id);
            current = match node.balance {
                Balance::RightHeavy => node.right,
                _ => node.left,
            };
        }
        height
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.num_nodes = 0;
        self.generation = next_generation();
    }

    pub(crate) fn node(&self, node_id: NodeId) -> &Node<T> {
        match self.slots.get(node_id.0) {
            Some(Some(node)) => node,
            _ => unreachable!("dangling node handle {:?}", node_id),
        }
    }

    fn node_mut(&mut self, node_id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(node_id.0) {
            Some(Some(node)) => node,
            _ => unreachable!("dangling node handle {:?}", node_id),
        }
    }

    fn child_of(&self, node_id: NodeId, dir: Dir) -> NodeId {
        match self.node(node_id).child(dir) {
            Some(child_id) => child_id,
            None => unreachable!("node {:?} has no {:?} child", node_id, dir),
        }
    }

    /// Descends from `node_id` along `dir` links as far as possible.
    pub(crate) fn extreme(&self, mut node_id: NodeId, dir: Dir) -> NodeId {
        while let Some(child_id) = self.node(node_id).child(dir) {
            node_id = child_id;
        }
        node_id
    }

    pub(crate) fn first(&self) -> Link {
        self.root.map(|root_id| self.extreme(root_id, Dir::Left))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root_id| self.extreme(root_id, Dir::Right))
    }

    fn alloc(&mut self, key: T, parent: Link) -> NodeId {
        let node = Node::new(key, parent);
        self.num_nodes += 1;
        match self.free.pop() {
            Some(node_id) => {
                self.slots[node_id.0] = Some(node);
                node_id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    // Node must already be detached from the tree.
    fn release(&mut self, node_id: NodeId) -> Node<T> {
        match self.slots.get_mut(node_id.0).and_then(Option::take) {
            Some(node) => {
                self.free.push(node_id);
                self.num_nodes -= 1;
                node
            }
            None => unreachable!("double release of node {:?}", node_id),
        }
    }

    // Points the link that reached `old` (root or a child link of `parent`) at `new`.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent_id) => {
                let parent = self.node_mut(parent_id);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            }
        }
    }

    /// Single rotation promoting the child of `node_id` on side `up`.
    ///
    /// `rotate(n, Dir::Right)` is a left rotation, `rotate(n, Dir::Left)` a
    /// right rotation. The promoted child's inner subtree moves across to the
    /// demoted node, and every parent link, including the link from above
    /// into the subtree, is rewritten. Balance indicators are left alone.
    /// Returns the new subtree root.
    fn rotate(&mut self, node_id: NodeId, up: Dir) -> NodeId {
        let pivot_id = self.child_of(node_id, up);
        let parent = self.node(node_id).parent;

        let inner = self.node(pivot_id).child(!up);
        *self.node_mut(node_id).child_mut(up) = inner;
        if let Some(inner_id) = inner {
            self.node_mut(inner_id).parent = Some(node_id);
        }

        *self.node_mut(pivot_id).child_mut(!up) = Some(node_id);
        self.node_mut(node_id).parent = Some(pivot_id);

        self.node_mut(pivot_id).parent = parent;
        self.replace_child(parent, node_id, Some(pivot_id));
        pivot_id
    }

    /// Restores the AVL condition at `node_id`, whose `heavy` side is two
    /// levels taller than the other.
    ///
    /// Indicators of every node that moves are settled before rotating.
    /// Returns the new subtree root.
    fn rebalance(&mut self, node_id: NodeId, heavy: Dir, mode: Mode) -> NodeId {
        let child_id = self.child_of(node_id, heavy);
        let child_balance = self.node(child_id).balance;

        if child_balance.leans(!heavy) {
            // Zig-zag: the inner grandchild ends up on top.
            let inner_id = self.child_of(child_id, !heavy);
            let (node_balance, child_balance) = match self.node(inner_id).balance {
                b if b.leans(heavy) => (Balance::leaning(!heavy), Balance::Balanced),
                b if b.leans(!heavy) => (Balance::Balanced, Balance::leaning(heavy)),
                _ => (Balance::Balanced, Balance::Balanced),
            };
            self.node_mut(node_id).balance = node_balance;
            self.node_mut(child_id).balance = child_balance;
            self.node_mut(inner_id).balance = Balance::Balanced;
            self.rotate(child_id, !heavy);
        } else if mode == Mode::Erase && child_balance == Balance::Balanced {
            // Subtree keeps its height, both ends stay leaning.
            self.node_mut(node_id).balance = Balance::leaning(heavy);
            self.node_mut(child_id).balance = Balance::leaning(!heavy);
        } else {
            self.node_mut(node_id).balance = Balance::Balanced;
            self.node_mut(child_id).balance = Balance::Balanced;
        }
        self.rotate(node_id, heavy)
    }

    // The subtree on side `dir` of `node_id` just grew by one level.
    fn absorb_growth(&mut self, node_id: NodeId, dir: Dir) -> HeightChange {
        match self.node(node_id).balance {
            b if b.leans(!dir) => {
                self.node_mut(node_id).balance = Balance::Balanced;
                HeightChange::Unchanged
            }
            Balance::Balanced => {
                self.node_mut(node_id).balance = Balance::leaning(dir);
                HeightChange::Grew
            }
            _ => {
                self.rebalance(node_id, dir, Mode::Insert);
                HeightChange::Unchanged
            }
        }
    }

    // The subtree on side `dir` of `node_id` just lost one level.
    fn absorb_shrink(&mut self, node_id: NodeId, dir: Dir) -> HeightChange {
        match self.node(node_id).balance {
            b if b.leans(dir) => {
                self.node_mut(node_id).balance = Balance::Balanced;
                HeightChange::Shrank
            }
            Balance::Balanced => {
                self.node_mut(node_id).balance = Balance::leaning(!dir);
                HeightChange::Unchanged
            }
            _ => {
                let top_id = self.rebalance(node_id, !dir, Mode::Erase);
                if self.node(top_id).balance == Balance::Balanced {
                    HeightChange::Shrank
                } else {
                    HeightChange::Unchanged
                }
            }
        }
    }

    /// Removes the rightmost node below `node_id` and hands back its key.
    /// Balances on the way back up are fixed as for any erase.
    fn take_predecessor(&mut self, node_id: NodeId) -> (T, HeightChange) {
        match self.node(node_id).right {
            Some(right_id) => {
                let (key, change) = self.take_predecessor(right_id);
                let change = match change {
                    HeightChange::Shrank => self.absorb_shrink(node_id, Dir::Right),
                    _ => HeightChange::Unchanged,
                };
                (key, change)
            }
            None => {
                let Node { parent, left, .. } = *self.node(node_id);
                if let Some(left_id) = left {
                    self.node_mut(left_id).parent = parent;
                }
                self.replace_child(parent, node_id, left);
                (self.release(node_id).key, HeightChange::Shrank)
            }
        }
    }

    // Detaches the node holding the erased key, or splices its predecessor's key into it.
    fn unlink(&mut self, node_id: NodeId) -> HeightChange {
        let Node { left, right, parent, .. } = *self.node(node_id);
        match (left, right) {
            (Some(left_id), Some(_)) => {
                let (key, change) = self.take_predecessor(left_id);
                self.node_mut(node_id).key = key;
                match change {
                    HeightChange::Shrank => self.absorb_shrink(node_id, Dir::Left),
                    _ => HeightChange::Unchanged,
                }
            }
            (only, None) | (None, only) => {
                if let Some(child_id) = only {
                    self.node_mut(child_id).parent = parent;
                }
                self.replace_child(parent, node_id, only);
                self.release(node_id);
                HeightChange::Shrank
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn shape(&self) -> Vec<(T, Balance, Option<T>)>
    where
        T: Clone,
    {
        let mut shape = Vec::with_capacity(self.num_nodes);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(node_id) = stack.pop() {
            let node = self.node(node_id);
            let parent_key = node.parent.map(|parent_id| self.node(parent_id).key.clone());
            shape.push((node.key.clone(), node.balance, parent_key));
            stack.extend(node.right);
            stack.extend(node.left);
        }
        shape
    }
}

impl<T: Ord> Tree<T> {
    pub(crate) fn find(&self, key: &T) -> Link {
        let mut current = self.root;
        while let Some(node_id) = current {
            let node = self.node(node_id);
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        current
    }

    pub(crate) fn insert(&mut self, key: T) -> bool {
        let change = match self.root {
            None => {
                self.root = Some(self.alloc(key, None));
                Some(HeightChange::Grew)
            }
            Some(root_id) => self.insert_into(root_id, key),
        };
        if change.is_some() {
            self.generation = next_generation();
        }
        change.is_some()
    }

    pub(crate) fn remove(&mut self, key: &T) -> bool {
        let change = match self.root {
            None => None,
            Some(root_id) => self.erase_from(root_id, key),
        };
        if change.is_some() {
            self.generation = next_generation();
        }
        change.is_some()
    }

    // None if the key is already present.
    fn insert_into(&mut self, node_id: NodeId, key: T) -> Option<HeightChange> {
        let dir = match key.cmp(&self.node(node_id).key) {
            Ordering::Equal => return None,
            Ordering::Less => Dir::Left,
            Ordering::Greater => Dir::Right,
        };
        let change = match self.node(node_id).child(dir) {
            Some(child_id) => self.insert_into(child_id, key)?,
            None => {
                let leaf_id = self.alloc(key, Some(node_id));
                *self.node_mut(node_id).child_mut(dir) = Some(leaf_id);
                HeightChange::Grew
            }
        };
        Some(match change {
            HeightChange::Grew => self.absorb_growth(node_id, dir),
            _ => HeightChange::Unchanged,
        })
    }

    // None if the key is absent.
    fn erase_from(&mut self, node_id: NodeId, key: &T) -> Option<HeightChange> {
        let dir = match key.cmp(&self.node(node_id).key) {
            Ordering::Equal => return Some(self.unlink(node_id)),
            Ordering::Less => Dir::Left,
            Ordering::Greater => Dir::Right,
        };
        let child_id = self.node(node_id).child(dir)?;
        Some(match self.erase_from(child_id, key)? {
            HeightChange::Shrank => self.absorb_shrink(node_id, dir),
            _ => HeightChange::Unchanged,
        })
    }

    /// In-order successor: leftmost node of the right subtree, or else the
    /// first ancestor whose key is greater.
    pub(crate) fn successor(&self, node_id: NodeId) -> Link {
        let node = self.node(node_id);
        if let Some(right_id) = node.right {
            return Some(self.extreme(right_id, Dir::Left));
        }
        let mut current = node.parent;
        while let Some(ancestor_id) = current {
            let ancestor = self.node(ancestor_id);
            if ancestor.key > node.key {
                break;
            }
            current = ancestor.parent;
        }
        current
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self) {
        // Check root link
        if let Some(root_id) = self.root {
            assert!(self.node(root_id).parent.is_none());
        }

        // Check tree nodes
        let mut num_nodes = 0;
        self.check_subtree(self.root, &mut num_nodes);
        assert_eq!(num_nodes, self.num_nodes);

        // Check slot accounting
        assert_eq!(self.slots.len(), self.num_nodes + self.free.len());
        for node_id in &self.free {
            assert!(self.slots[node_id.0].is_none());
        }

        // Check in-order sequence
        let mut count = 0;
        let mut current = self.first();
        while let Some(node_id) = current {
            let next = self.successor(node_id);
            if let Some(next_id) = next {
                assert!(self.node(node_id).key < self.node(next_id).key);
            }
            count += 1;
            current = next;
        }
        assert_eq!(count, self.num_nodes);
    }

    // Returns the number of levels below and including `link`.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_subtree(&self, link: Link, num_nodes: &mut usize) -> usize {
        let node_id = match link {
            None => return 0,
            Some(node_id) => node_id,
        };
        let node = self.node(node_id);
        *num_nodes += 1;

        // Check link for left child node
        if let Some(left_id) = node.left {
            assert_eq!(self.node(left_id).parent, Some(node_id));
            assert!(self.node(left_id).key < node.key);
        }

        // Check link for right child node
        if let Some(right_id) = node.right {
            assert_eq!(self.node(right_id).parent, Some(node_id));
            assert!(self.node(right_id).key > node.key);
        }

        let left_height = self.check_subtree(node.left, num_nodes);
        let right_height = self.check_subtree(node.right, num_nodes);

        // Check AVL condition and stored indicator
        let diff = left_height as isize - right_height as isize;
        assert!((-1..=1).contains(&diff));
        assert_eq!(diff, node.balance.factor() as isize);

        1 + left_height.max(right_height)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}
