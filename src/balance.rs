use std::ops::Not;

/// Side of a node: which child link is meant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Relative height of a node's two subtrees.
///
/// `LeftHeavy` means the left subtree is exactly one level taller than the
/// right one, `RightHeavy` the opposite. Any other difference is a broken
/// AVL condition and is never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) enum Balance {
    LeftHeavy,
    #[default]
    Balanced,
    RightHeavy,
}

impl Balance {
    /// The indicator of a node leaning toward `dir`.
    pub(crate) fn leaning(dir: Dir) -> Self {
        match dir {
            Dir::Left => Balance::LeftHeavy,
            Dir::Right => Balance::RightHeavy,
        }
    }

    /// Whether the taller subtree is on side `dir`.
    pub(crate) fn leans(self, dir: Dir) -> bool {
        self == Balance::leaning(dir)
    }

    /// `height(left) - height(right)`.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn factor(self) -> i8 {
        match self {
            Balance::LeftHeavy => 1,
            Balance::Balanced => 0,
            Balance::RightHeavy => -1,
        }
    }
}

/// How a subtree's height moved during one insert or erase step.
///
/// Returned from each level of recursion to its caller and consumed there;
/// it never outlives the operation that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum HeightChange {
    Grew,
    Shrank,
    Unchanged,
}

/// Which mutation triggered a rebalance.
///
/// The two differ only when the heavy child is itself balanced, which can
/// happen after an erase but never after an insert.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Insert,
    Erase,
}
