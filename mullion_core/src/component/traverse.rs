// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{ComponentId, INVALID};
use super::tree::ComponentTree;

/// An iterator over the direct children of a component.
///
/// Created by [`ComponentTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a ComponentTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a ComponentTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<ComponentId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(self.tree.id_at(idx))
    }
}

/// A depth-first, pre-order iterator over a subtree, root first.
///
/// Created by [`ComponentTree::subtree`]. Walks the sibling links without
/// allocating.
#[derive(Debug)]
pub struct Subtree<'a> {
    tree: &'a ComponentTree,
    root: u32,
    current: u32,
}

impl<'a> Subtree<'a> {
    pub(crate) fn new(tree: &'a ComponentTree, root: u32) -> Self {
        Self {
            tree,
            root,
            current: root,
        }
    }

    /// Pre-order successor of `idx` within the subtree, or [`INVALID`].
    fn successor(&self, idx: u32) -> u32 {
        let first = self.tree.first_child[idx as usize];
        if first != INVALID {
            return first;
        }
        let mut at = idx;
        while at != self.root {
            let next = self.tree.next_sibling[at as usize];
            if next != INVALID {
                return next;
            }
            at = self.tree.parent[at as usize];
        }
        INVALID
    }
}

impl Iterator for Subtree<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<ComponentId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.successor(idx);
        Some(self.tree.id_at(idx))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::component::{ComponentTree, Roles};

    #[test]
    fn subtree_is_pre_order() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let a = tree.create(Roles::block());
        let a1 = tree.create(Roles::text());
        let a2 = tree.create(Roles::text());
        let b = tree.create(Roles::block());
        tree.add(root, &[a, b]);
        tree.add(a, &[a1, a2]);

        let order: Vec<_> = tree.subtree(root).collect();
        assert_eq!(order, vec![root, a, a1, a2, b]);
    }

    #[test]
    fn subtree_stays_inside_its_root() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let a = tree.create(Roles::block());
        let a1 = tree.create(Roles::text());
        let b = tree.create(Roles::block());
        tree.add(root, &[a, b]);
        tree.add(a, &[a1]);

        let order: Vec<_> = tree.subtree(a).collect();
        assert_eq!(order, vec![a, a1], "sibling `b` must not be visited");
    }

    #[test]
    fn lone_node_subtree_is_itself() {
        let mut tree = ComponentTree::new();
        let solo = tree.create(Roles::block());
        let order: Vec<_> = tree.subtree(solo).collect();
        assert_eq!(order, vec![solo]);
    }
}
