//! Filter operations
//!
//! This module provides the blur engines behind the blur transforms. All of
//! them are separable and replicate the edge samples for window positions
//! that fall outside the image.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;

/// Sliding window box filter
mod box_filter;
pub use box_filter::*;

/// Clamp a possibly negative window index to `0..len`.
#[inline]
pub(crate) fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}
