//! Forward cursor over one stack
//!
//! A `Cursor` borrows the pool and walks a chain from a starting handle to
//! the end sentinel, yielding `&T` for each node. It never mutates the
//! pool. Because it holds a shared borrow, the pool cannot be pushed to,
//! popped from or dropped while the cursor is alive.
//!
//! Cursors compare equal when they sit on the same handle. Every exhausted
//! cursor sits on 0, so all end positions are equal regardless of which
//! stack they walked. Mid-traversal, two cursors over different stacks
//! never compare equal because a live node belongs to one stack only.
//!
//! A cursor is restartable: building a new one from the same head walks the
//! same values again, as long as the chain was not changed in between.
//!
//! Traversal terminates only if the chain is acyclic. Debug builds assert
//! that a cursor never takes more steps than the arena has nodes, and that
//! every link it follows reaches a live node or the sentinel. Release
//! builds end the walk at a bad link and leave cycles to the caller.

use crate::handle::Handle;
use crate::pool::StackPool;
use std::iter::FusedIterator;

/// Read-only cursor over a stack, top to bottom
pub struct Cursor<'a, T, H: Handle = usize> {
    pool: &'a StackPool<T, H>,
    node: H,
    steps: usize,
}

impl<'a, T, H: Handle> Cursor<'a, T, H> {
    /// Cursor positioned at `head`
    pub fn new(pool: &'a StackPool<T, H>, head: H) -> Self {
        Cursor {
            pool,
            node: head,
            steps: 0,
        }
    }

    /// Handle the cursor currently points at
    #[inline]
    pub fn position(&self) -> H {
        self.node
    }

    /// True once the cursor reached the end sentinel
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_end()
    }

    /// Value at the current position without advancing
    pub fn get(&self) -> Option<&'a T> {
        self.pool.link(self.node).map(|(value, _)| value)
    }
}

impl<'a, T, H: Handle> Iterator for Cursor<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let Some((value, next)) = self.pool.link(self.node) else {
            debug_assert!(
                self.node.is_end(),
                "stack chain reaches freed or out-of-arena handle {:?}",
                self.node
            );
            self.node = H::END;
            return None;
        };
        self.node = next;
        self.steps += 1;
        debug_assert!(
            self.steps <= self.pool.node_count(),
            "cycle detected in stack chain"
        );
        Some(value)
    }
}

impl<T, H: Handle> FusedIterator for Cursor<'_, T, H> {}

impl<T, H: Handle> Clone for Cursor<'_, T, H> {
    fn clone(&self) -> Self {
        Cursor {
            pool: self.pool,
            node: self.node,
            steps: self.steps,
        }
    }
}

impl<T, H: Handle> PartialEq for Cursor<'_, T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T, H: Handle> Eq for Cursor<'_, T, H> {}

impl<T, H: Handle> std::fmt::Debug for Cursor<'_, T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").field("node", &self.node).finish()
    }
}
