//! Stack Pool: many singly-linked stacks sharing one node arena
//!
//! Algorithms that juggle lots of small worklists (graph frontiers,
//! union-find auxiliary stacks, per-bucket queues) pay for a heap
//! allocation on every push when each list owns its nodes. A `StackPool`
//! keeps all nodes in one `Vec` and recycles popped nodes through a free
//! list, so steady-state push/pop never touches the allocator.
//!
//! Key design principles:
//! - Handle: 1-based node position; 0 is the empty-stack / end sentinel
//! - Stack: just the handle of its head node, held by the caller
//! - Free list: one more stack threaded through the same arena
//! - Cursor: borrowed, read-only iterator from a head to the sentinel
//!
//! # Modules
//!
//! - `handle`: Integer handle types and the end sentinel
//! - `pool`: The node arena, free list and stack operations
//! - `cursor`: Forward iteration over one stack
//! - `config`: Pool sizing from the environment or TOML
//! - `error`: Error type for contract violations and setup failures
//!
//! # Example
//!
//! ```
//! use stack_pool::StackPool;
//!
//! let mut pool: StackPool<i32> = StackPool::new();
//! let mut s = pool.new_stack();
//! s = pool.push(1, s);
//! s = pool.push(2, s);
//! assert_eq!(pool.iter(s).copied().collect::<Vec<_>>(), vec![2, 1]);
//!
//! s = pool.pop(s)?;
//! assert_eq!(pool.value(s)?, &1);
//! s = pool.free_stack(s)?;
//! assert!(pool.is_empty(s));
//! # Ok::<(), stack_pool::PoolError>(())
//! ```
//!
//! The pool is single-threaded: every mutating operation takes `&mut self`
//! and nothing inside is synchronized.

pub mod config;
pub mod cursor;
pub mod error;
pub mod handle;
pub mod pool;

// Re-export key types
pub use config::{CAPACITY_ENV, PoolConfig};
pub use cursor::Cursor;
pub use error::{PoolError, Result};
pub use handle::Handle;
pub use pool::{MovedHead, PoolStats, StackPool};
