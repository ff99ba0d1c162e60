// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stand-in elements for leave transitions.
//!
//! Host frameworks remove an element from the tree as soon as it is
//! unrendered and give no way to defer that. To still animate the removal, a
//! deep copy of the element is inserted where the original was and the leave
//! transition runs on the copy. The copy's id is the original's with a
//! `_clone` suffix so it never collides with the live tree.

use alloc::format;
use alloc::string::String;

use crate::backend::DomNode;
use crate::error::TransitionError;

/// Where an element sat in its tree, remembered after it was installed.
///
/// Only a fallback: the element's *current* position wins whenever it still
/// has a parent.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionMemo<N> {
    /// The parent element at capture time.
    pub parent: Option<N>,
    /// The next element sibling at capture time.
    pub next_sibling: Option<N>,
}

impl<N: DomNode> PositionMemo<N> {
    /// Records the current parent and next sibling of `node`.
    #[must_use]
    pub fn capture(node: &N) -> Self {
        Self {
            parent: node.parent(),
            next_sibling: node.next_sibling(),
        }
    }
}

/// Returns the id given to the clone of an element with id `id`.
///
/// An element without an id yields the degenerate `"_clone"`.
#[must_use]
pub fn clone_id(id: &str) -> String {
    format!("{id}_clone")
}

/// An inserted clone, owned by the leave job that animates it.
///
/// [`destroy`](Self::destroy) consumes the handle, so a clone cannot be
/// removed twice through the same handle.
#[derive(Debug)]
pub struct CloneHandle<N> {
    node: N,
}

impl<N: DomNode> CloneHandle<N> {
    /// Clones `original` and inserts the copy at the original's position.
    ///
    /// The position is the original's current parent and next sibling, or,
    /// when the original has already been detached, the remembered `memo`.
    /// A remembered sibling that has since moved to another parent is
    /// ignored and the clone is appended instead.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::MissingParent`] when neither the original
    /// nor the memo provide a parent, and [`TransitionError::CloneFailed`]
    /// when the backend cannot copy the element.
    pub fn create(original: &N, memo: Option<&PositionMemo<N>>) -> Result<Self, TransitionError> {
        let (parent, reference) = match original.parent() {
            Some(parent) => (parent, original.next_sibling()),
            None => {
                let memo = memo.ok_or(TransitionError::MissingParent)?;
                let parent = memo.parent.clone().ok_or(TransitionError::MissingParent)?;
                (parent, memo.next_sibling.clone())
            }
        };
        let reference = reference.filter(|r| r.parent().as_ref() == Some(&parent));

        let node = original.deep_clone().ok_or(TransitionError::CloneFailed)?;
        node.set_id(&clone_id(&original.id()));
        parent.insert_before(&node, reference.as_ref());
        Ok(Self { node })
    }

    /// Returns the clone element.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Removes the clone from its parent.
    ///
    /// A no-op when something else already detached it.
    pub fn destroy(self) {
        if let Some(parent) = self.node.parent() {
            parent.remove_child(&self.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestNode;

    fn tree() -> (TestNode, TestNode, TestNode, TestNode) {
        let root = TestNode::new("root");
        let a = TestNode::new("a");
        let b = TestNode::new("b");
        let c = TestNode::new("c");
        root.insert_before(&a, None);
        root.insert_before(&b, None);
        root.insert_before(&c, None);
        (root, a, b, c)
    }

    #[test]
    fn clone_takes_the_original_position() {
        let (root, _a, b, _c) = tree();
        b.add_class("card");
        let handle = CloneHandle::create(&b, None).unwrap();
        assert_eq!(handle.node().id(), "b_clone");
        assert!(handle.node().has_class("card"));
        assert_eq!(root.child_ids(), ["a", "b", "b_clone", "c"]);

        // The host then removes the original.
        root.remove_child(&b);
        assert_eq!(root.child_ids(), ["a", "b_clone", "c"]);

        handle.destroy();
        assert_eq!(root.child_ids(), ["a", "c"]);
    }

    #[test]
    fn detached_original_falls_back_to_memo() {
        let (root, _a, b, c) = tree();
        let memo = PositionMemo::capture(&b);
        assert_eq!(memo.next_sibling.as_ref(), Some(&c));
        root.remove_child(&b);

        let handle = CloneHandle::create(&b, Some(&memo)).unwrap();
        assert_eq!(root.child_ids(), ["a", "b_clone", "c"]);
        handle.destroy();
    }

    #[test]
    fn moved_memo_sibling_appends() {
        let (root, _a, b, c) = tree();
        let memo = PositionMemo::capture(&b);
        root.remove_child(&b);
        root.remove_child(&c);

        let _handle = CloneHandle::create(&b, Some(&memo)).unwrap();
        assert_eq!(root.child_ids(), ["a", "b_clone"]);
    }

    #[test]
    fn missing_parent_is_an_error() {
        let lone = TestNode::new("lone");
        assert_eq!(
            CloneHandle::create(&lone, None).unwrap_err(),
            TransitionError::MissingParent
        );
        let memo = PositionMemo::capture(&lone);
        assert_eq!(
            CloneHandle::create(&lone, Some(&memo)).unwrap_err(),
            TransitionError::MissingParent
        );
    }

    #[test]
    fn empty_id_gives_degenerate_clone_id() {
        let root = TestNode::new("root");
        let anon = TestNode::new("");
        root.insert_before(&anon, None);
        let handle = CloneHandle::create(&anon, None).unwrap();
        assert_eq!(handle.node().id(), "_clone");
    }

    #[test]
    fn destroy_of_detached_clone_is_a_noop() {
        let (root, _a, b, _c) = tree();
        let handle = CloneHandle::create(&b, None).unwrap();
        root.remove_child(handle.node());
        handle.destroy();
        assert_eq!(root.child_ids(), ["a", "b", "c"]);
    }
}
