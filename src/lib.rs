//! Array-backed first-in, first-out queue.
//!
//! [`RingQueue`] keeps its elements in a circular buffer that doubles when
//! full and halves when it falls below half occupancy. A detached [`Cursor`]
//! walks the queue and fails fast once the queue is structurally modified.

pub mod core;

pub use crate::core::config::{QueueConfig, GROW_FACTOR, MAX_GROW_FACTOR, START_CAPACITY};
pub use crate::core::cursor::Cursor;
pub use crate::core::error::QueueError;
pub use crate::core::queue::{IntoIter, Iter, RingQueue};
