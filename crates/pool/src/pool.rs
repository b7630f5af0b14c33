//! Stack Node Pool - one arena of nodes shared by many singly-linked stacks
//!
//! Instead of allocating a heap node for every push and freeing it on every
//! pop, all stacks draw their nodes from a single `Vec` and give them back
//! through a free list. A stack is nothing more than the handle of its head
//! node; the pool does not track which stacks exist.
//!
//! Design:
//! - Nodes live at fixed positions; a handle is a 1-based position
//! - Handle 0 is the end sentinel (empty stack, end of chain)
//! - The free list is one more stack, threaded through the same `next` fields
//! - Push reuses the free-list head before appending to the arena
//! - The arena never shrinks and never moves a node to another position
//!
//! ```text
//! nodes:  [ 1 | 2 | 3 | 4 | 5 ]
//! stack a:  3 -> 1 -> 0
//! stack b:  5 -> 0
//! free:     4 -> 2 -> 0
//! ```
//!
//! Ownership:
//! - Every node belongs to exactly one live stack or to the free list
//! - Each node records whether it is live; handles of freed nodes are
//!   rejected by every accessor until a push revives them
//! - `push`, `pop`, `move_head` and `free_stack` transfer ownership
//! - `value_mut` and `next_mut` bypass this; chains must stay acyclic
//!
//! Freed values are not dropped until their node is reused by a later
//! push (or the pool itself is dropped).

use crate::config::PoolConfig;
use crate::cursor::Cursor;
use crate::error::{PoolError, Result};
use crate::handle::Handle;
use tracing::{debug, trace};

/// A single arena slot
#[derive(Debug, Clone)]
struct Node<T, H> {
    value: T,
    next: H,
    /// False while the node sits on the free list
    in_use: bool,
}

/// Arena of nodes backing any number of independent stacks
///
/// `T` is the stored value type, `H` the integer type used for handles.
#[derive(Debug, Clone)]
pub struct StackPool<T, H: Handle = usize> {
    /// Node storage; handle `h` lives at `nodes[h - 1]`
    nodes: Vec<Node<T, H>>,

    /// Head of the free list (END when no node is free)
    free_nodes: H,
}

/// Both heads after [`StackPool::move_head`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovedHead<H> {
    /// New head of the stack the node was taken from
    pub source: H,
    /// New head of the stack the node was moved onto
    pub target: H,
}

/// Pool statistics for debugging/profiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Nodes ever created (arena length)
    pub nodes: usize,
    /// Nodes currently on the free list
    pub free: usize,
    /// Nodes owned by live stacks
    pub live: usize,
    /// Nodes the arena can hold without reallocating
    pub capacity: usize,
}

impl<T, H: Handle> Default for StackPool<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H: Handle> StackPool<T, H> {
    /// Create a new empty pool
    pub fn new() -> Self {
        StackPool {
            nodes: Vec::new(),
            free_nodes: H::END,
        }
    }

    /// Create an empty pool with room for `capacity` nodes
    ///
    /// No nodes are created; only backing storage is reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        debug!(capacity, "reserving node arena");
        StackPool {
            nodes: Vec::with_capacity(capacity),
            free_nodes: H::END,
        }
    }

    /// Create a pool sized by `config`
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// The end sentinel shared by all stacks
    #[inline]
    pub fn end(&self) -> H {
        H::END
    }

    /// Handle of a new, empty stack
    #[inline]
    pub fn new_stack(&self) -> H {
        H::END
    }

    /// True if `head` denotes an empty stack
    #[inline]
    pub fn is_empty(&self, head: H) -> bool {
        head.is_end()
    }

    /// Ensure the arena can hold at least `capacity` nodes in total
    pub fn reserve(&mut self, capacity: usize) {
        let additional = capacity.saturating_sub(self.nodes.len());
        self.nodes.reserve(additional);
        debug!(
            requested = capacity,
            capacity = self.nodes.capacity(),
            "reserved node arena"
        );
    }

    /// Fallible [`reserve`](Self::reserve)
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity.saturating_sub(self.nodes.len());
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Number of nodes the arena can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of nodes ever created, live or free
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Arena index for a handle, rejecting the sentinel and out-of-range values
    #[inline]
    fn raw_slot(&self, handle: H) -> Result<usize> {
        let index = handle.to_index();
        if index == 0 || index > self.nodes.len() {
            return Err(PoolError::InvalidHandle(index));
        }
        Ok(index - 1)
    }

    /// Arena index for a live node; freed nodes are rejected too
    #[inline]
    fn slot(&self, handle: H) -> Result<usize> {
        let slot = self.raw_slot(handle)?;
        if !self.nodes[slot].in_use {
            return Err(PoolError::InvalidHandle(handle.to_index()));
        }
        Ok(slot)
    }

    /// True if `handle` addresses a node owned by some live stack
    pub fn is_live(&self, handle: H) -> bool {
        self.slot(handle).is_ok()
    }

    /// Value stored at `handle`
    pub fn value(&self, handle: H) -> Result<&T> {
        let slot = self.slot(handle)?;
        Ok(&self.nodes[slot].value)
    }

    /// Mutable value stored at `handle`
    pub fn value_mut(&mut self, handle: H) -> Result<&mut T> {
        let slot = self.slot(handle)?;
        Ok(&mut self.nodes[slot].value)
    }

    /// Handle of the node after `handle`
    pub fn next(&self, handle: H) -> Result<H> {
        let slot = self.slot(handle)?;
        Ok(self.nodes[slot].next)
    }

    /// Mutable link of the node at `handle`
    ///
    /// Low-level escape hatch for splicing stacks together. The caller must
    /// keep every chain acyclic and must not link one node into two stacks.
    pub fn next_mut(&mut self, handle: H) -> Result<&mut H> {
        let slot = self.slot(handle)?;
        Ok(&mut self.nodes[slot].next)
    }

    /// Push `value` onto the stack headed by `head`, returning the new head
    ///
    /// Reuses a free node if there is one, otherwise appends to the arena.
    /// Appending may reallocate the arena; handles stay valid.
    ///
    /// # Panics
    /// Panics if the handle type cannot address another node. Use
    /// [`try_push`](Self::try_push) to handle that case.
    pub fn push(&mut self, value: T, head: H) -> H {
        match self.try_push(value, head) {
            Ok(handle) => handle,
            Err(e) => panic!("{}", e),
        }
    }

    /// Push `value` onto the stack headed by `head`
    ///
    /// Fails with [`PoolError::HandleSpaceExhausted`] when the free list is
    /// empty and the next arena position does not fit in `H`.
    pub fn try_push(&mut self, value: T, head: H) -> Result<H> {
        if self.free_nodes.is_end() {
            // No free node - grow the arena
            let handle = H::from_index(self.nodes.len() + 1)
                .ok_or(PoolError::HandleSpaceExhausted(self.nodes.len()))?;
            let before = self.nodes.capacity();
            self.nodes.push(Node {
                value,
                next: head,
                in_use: true,
            });
            if self.nodes.capacity() != before {
                debug!(from = before, to = self.nodes.capacity(), "node arena grew");
            }
            Ok(handle)
        } else {
            // Reuse the head of the free list
            let handle = self.free_nodes;
            let slot = self.raw_slot(handle)?;
            let node = &mut self.nodes[slot];
            self.free_nodes = node.next;
            node.value = value;
            node.next = head;
            node.in_use = true;
            Ok(handle)
        }
    }

    /// Pop the head node of a stack, returning the new head
    ///
    /// The node moves to the free list; its value stays in place until
    /// the node is reused. Fails on an empty stack and on a handle that
    /// was already popped.
    pub fn pop(&mut self, head: H) -> Result<H> {
        let slot = self.slot(head)?;
        let node = &mut self.nodes[slot];
        node.in_use = false;
        let new_head = std::mem::replace(&mut node.next, self.free_nodes);
        self.free_nodes = head;
        Ok(new_head)
    }

    /// Release every node of a stack, returning the (empty) new head
    ///
    /// If the chain reaches a freed or out-of-arena handle, the nodes
    /// released before that point stay on the free list and the error is
    /// returned.
    pub fn free_stack(&mut self, mut head: H) -> Result<H> {
        let mut released = 0usize;
        while !head.is_end() {
            head = self.pop(head)?;
            released += 1;
            debug_assert!(
                released <= self.nodes.len(),
                "cycle detected while freeing stack"
            );
        }
        trace!(released, "stack freed");
        Ok(head)
    }

    /// Move the head node of `source` onto the top of `target`
    ///
    /// Returns both updated heads. The moved node keeps its handle, so
    /// `target`'s new head is the old `source` head.
    ///
    /// `source` must be a live head. `target` must be END or a live node
    /// other than `source`.
    pub fn move_head(&mut self, source: H, target: H) -> Result<MovedHead<H>> {
        let slot = self.slot(source)?;
        if target == source || !(target.is_end() || self.is_live(target)) {
            return Err(PoolError::InvalidHandle(target.to_index()));
        }
        let rest = std::mem::replace(&mut self.nodes[slot].next, target);
        Ok(MovedHead {
            source: rest,
            target: source,
        })
    }

    /// Cursor over the stack headed by `head`, top to bottom
    pub fn iter(&self, head: H) -> Cursor<'_, T, H> {
        Cursor::new(self, head)
    }

    /// Cursor at the end sentinel
    pub fn end_cursor(&self) -> Cursor<'_, T, H> {
        Cursor::new(self, H::END)
    }

    /// Apply `f` to every value of the stack headed by `head`, top to bottom
    pub fn for_each_mut<F>(&mut self, head: H, mut f: F) -> Result<()>
    where
        F: FnMut(&mut T),
    {
        let mut current = head;
        let mut steps = 0usize;
        while !current.is_end() {
            let slot = self.slot(current)?;
            let node = &mut self.nodes[slot];
            f(&mut node.value);
            current = node.next;
            steps += 1;
            debug_assert!(steps <= self.nodes.len(), "cycle detected in stack chain");
        }
        Ok(())
    }

    /// Number of nodes in the stack headed by `head`
    pub fn stack_len(&self, head: H) -> usize {
        self.iter(head).count()
    }

    /// Number of nodes on the free list
    pub fn free_len(&self) -> usize {
        self.nodes.iter().filter(|node| !node.in_use).count()
    }

    /// Get current pool statistics
    pub fn stats(&self) -> PoolStats {
        let free = self.free_len();
        PoolStats {
            nodes: self.nodes.len(),
            free,
            live: self.nodes.len() - free,
            capacity: self.nodes.capacity(),
        }
    }

    /// Value and link of a live node, or None for the sentinel, freed
    /// nodes and out-of-range handles
    #[inline]
    pub(crate) fn link(&self, handle: H) -> Option<(&T, H)> {
        let node = self.nodes.get(handle.to_index().checked_sub(1)?)?;
        node.in_use.then_some((&node.value, node.next))
    }
}
