//! Node handles
//!
//! A handle is a 1-based position in the node arena. The value 0 is
//! reserved as the end sentinel: it marks both an empty stack and the end
//! of every chain, and never addresses a node.
//!
//! Any unsigned integer type can serve as a handle. Narrow types make the
//! `next` field smaller at the cost of a lower node limit (a `u8` handle
//! addresses at most 255 nodes).

use std::fmt::Debug;
use std::hash::Hash;

/// Integer type used to address nodes in a [`StackPool`](crate::StackPool)
pub trait Handle: Copy + Eq + Ord + Hash + Debug + Default + 'static {
    /// The end sentinel (0)
    const END: Self;

    /// Raw integer value as a `usize`
    ///
    /// Saturates to `usize::MAX` when the value does not fit, so an
    /// oversized handle never aliases a real arena position.
    fn to_index(self) -> usize;

    /// Convert a raw integer value back into a handle
    ///
    /// Returns None if the value does not fit in this handle type.
    fn from_index(index: usize) -> Option<Self>;

    /// True for the end sentinel
    #[inline]
    fn is_end(self) -> bool {
        self == Self::END
    }
}

macro_rules! impl_handle {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Handle for $ty {
                const END: Self = 0;

                // Values wider than usize map to usize::MAX, which is
                // always out of range
                #[inline]
                fn to_index(self) -> usize {
                    usize::try_from(self).unwrap_or(usize::MAX)
                }

                #[inline]
                fn from_index(index: usize) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

impl_handle!(u8, u16, u32, u64, usize);
