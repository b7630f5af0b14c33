//! Pool error types

use std::collections::TryReserveError;

/// Errors reported by [`StackPool`](crate::StackPool) operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Handle is the end sentinel or lies beyond the arena
    InvalidHandle(usize),
    /// Handle type cannot address another node (holds the current node count)
    HandleSpaceExhausted(usize),
    /// Backing storage could not grow
    AllocationFailure(TryReserveError),
    /// Configuration could not be read or parsed
    Config(String),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::InvalidHandle(0) => {
                write!(f, "invalid handle: 0 is the end sentinel, not a node")
            }
            PoolError::InvalidHandle(h) => write!(f, "invalid handle: {} is out of range", h),
            PoolError::HandleSpaceExhausted(nodes) => write!(
                f,
                "handle space exhausted: cannot address node {} with this handle type",
                nodes + 1
            ),
            PoolError::AllocationFailure(e) => write!(f, "node arena allocation failed: {}", e),
            PoolError::Config(msg) => write!(f, "invalid pool configuration: {}", msg),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::AllocationFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for PoolError {
    fn from(e: TryReserveError) -> Self {
        PoolError::AllocationFailure(e)
    }
}

/// Result alias for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;
