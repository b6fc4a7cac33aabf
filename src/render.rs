use std::fmt::{self, Write};

use crate::tree::{Link, Tree};

const EMPTY: &str = "empty";

impl<T: Ord + fmt::Display> Tree<T> {
    /// Keys in ascending order separated by single spaces, or `empty`.
    pub(crate) fn write_in_order<W: Write>(&self, w: &mut W) -> fmt::Result {
        let mut current = match self.first() {
            None => return w.write_str(EMPTY),
            Some(node_id) => node_id,
        };
        write!(w, "{}", self.node(current).key)?;
        while let Some(node_id) = self.successor(current) {
            write!(w, " {}", self.node(node_id).key)?;
            current = node_id;
        }
        Ok(())
    }
}

impl<T: fmt::Display> Tree<T> {
    /// One line per depth, each starting with a line break and `  <depth>:`.
    ///
    /// A node with exactly one child gets a ` _` in place of the missing one.
    /// Stops after the first depth where no node has children.
    pub(crate) fn write_levels<W: Write>(&self, w: &mut W) -> fmt::Result {
        if self.is_empty() {
            return w.write_str(EMPTY);
        }
        let mut depth = 0;
        loop {
            depth += 1;
            write!(w, "\n  {depth}:")?;
            if !self.write_level(w, self.root(), depth)? {
                return Ok(());
            }
        }
    }

    // Writes the nodes `depth` levels below `link`.
    // Returns whether any of them has a child.
    fn write_level<W: Write>(
        &self,
        w: &mut W,
        link: Link,
        depth: usize,
    ) -> Result<bool, fmt::Error> {
        let node = match link {
            None => return Ok(false),
            Some(node_id) => self.node(node_id),
        };
        if depth == 1 {
            write!(w, " {}", node.key)?;
            return Ok(node.left.is_some() || node.right.is_some());
        }
        if depth == 2 && node.left.is_none() && node.right.is_some() {
            w.write_str(" _")?;
        }
        let left = self.write_level(w, node.left, depth - 1)?;
        let right = self.write_level(w, node.right, depth - 1)?;
        if depth == 2 && node.left.is_some() && node.right.is_none() {
            w.write_str(" _")?;
        }
        Ok(left || right)
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Tree;

    fn levels(keys: &[i32]) -> String {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key);
        }
        let mut out = String::new();
        tree.write_levels(&mut out).unwrap();
        out
    }

    #[test]
    fn test_levels_empty() {
        assert_eq!(levels(&[]), "empty");
    }

    #[test]
    fn test_levels_single() {
        assert_eq!(levels(&[7]), "\n  1: 7");
    }

    #[test]
    fn test_levels_placeholders() {
        //   2
        //  / \
        // 1   3
        //      \
        //       4
        assert_eq!(levels(&[2, 1, 3, 4]), "\n  1: 2\n  2: 1 3\n  3: _ 4");
        //     3
        //    / \
        //   2   4
        //  /
        // 1
        assert_eq!(levels(&[3, 2, 4, 1]), "\n  1: 3\n  2: 2 4\n  3: 1 _");
    }

    #[test]
    fn test_in_order() {
        let mut tree = Tree::new();
        let mut out = String::new();
        tree.write_in_order(&mut out).unwrap();
        assert_eq!(out, "empty");

        for key in [5, 1, 3] {
            tree.insert(key);
        }
        out.clear();
        tree.write_in_order(&mut out).unwrap();
        assert_eq!(out, "1 3 5");
    }
}
