//! The three composition operators: [`left_fuse`], [`right_fuse`] and
//! [`mid_fuse`]. Each is algebraic — none of them run anything until a
//! [`crate::connect::connect`] (or [`crate::buffered::connect_buffered`])
//! drives the result.

mod left;
mod mid;
mod right;

pub use left::{left_fuse, left_fuse_buffered, LeftFuse, LeftFuseBuffered};
pub use mid::{mid_fuse, MidFuse};
pub use right::right_fuse;
