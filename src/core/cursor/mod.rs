use crate::core::error::QueueError;
use crate::core::queue::RingQueue;

/// Fail-fast enumerator over a `RingQueue`
///
/// A cursor does not borrow the queue. It keeps the queue's version from the
/// moment it was created plus a position, and every step is handed the queue
/// again. The queue may therefore be mutated between steps, and the next
/// [`Cursor::move_next`] reports that with [`QueueError::ConcurrentModification`].
///
/// A cursor does not remember which queue created it. Handing it a different
/// queue that happens to be at the same version walks that queue instead, so
/// keep each cursor paired with the queue it came from.
///
/// ```
/// use ringqueue::{QueueError, RingQueue};
///
/// let mut queue: RingQueue<i32> = RingQueue::from_source(vec![-1, 5, 8]).unwrap();
/// let mut cursor = queue.cursor();
/// assert!(cursor.move_next(&queue).unwrap());
/// queue.enqueue(0).unwrap();
/// assert!(matches!(cursor.move_next(&queue), Err(QueueError::ConcurrentModification)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    version: u64,
    // None until the first advance
    position: Option<usize>,
}

impl Cursor {
    pub(crate) fn new(version: u64) -> Self {
        Self { version, position: None }
    }

    /// Advance to the next element
    ///
    /// Returns `Ok(false)` once the live elements are exhausted. The version
    /// check runs before anything else, so a stale cursor fails even at the end.
    pub fn move_next<T>(&mut self, queue: &RingQueue<T>) -> Result<bool, QueueError> {
        if self.version != queue.version() {
            return Err(QueueError::ConcurrentModification);
        }

        let next = match self.position {
            None => 0,
            Some(index) => (index + 1).min(queue.len()),
        };
        self.position = Some(next);
        Ok(next < queue.len())
    }

    /// Element under the cursor, read from the queue's current storage
    pub fn current<'q, T>(&self, queue: &'q RingQueue<T>) -> Result<&'q T, QueueError> {
        self.position
            .and_then(|index| queue.get(index))
            .ok_or(QueueError::InvalidIteratorState)
    }

    /// Move back before the first element, keeping the original version
    pub fn reset(&mut self) {
        self.position = None;
    }
}
