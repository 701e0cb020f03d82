use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace};
use crate::core::config::{QueueConfig, GROW_FACTOR, START_CAPACITY};
use crate::core::cursor::Cursor;
use crate::core::error::QueueError;

/// First-in, first-out queue over a circular, resizable buffer
///
/// Live elements occupy `count` slots starting at `head` and wrapping around
/// the end of `buffer`. Every vacant slot holds `None`. The buffer is replaced
/// wholesale whenever it grows or shrinks, and the live window is moved to
/// the front of the new buffer.
///
/// `version` is bumped by every structural mutation so that detached
/// [`Cursor`]s can notice the queue changed under them.
#[derive(Clone)]
pub struct RingQueue<T> {
    buffer: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    count: usize,
    version: u64,
    grow_factor: usize,
}

fn allocate<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Most slots a buffer of `Option<T>` can address
fn max_capacity<T>() -> usize {
    isize::MAX as usize / std::mem::size_of::<Option<T>>().max(1)
}

fn check_capacity<T>(capacity: usize) -> Result<usize, QueueError> {
    if capacity == 0 {
        return Err(QueueError::InvalidArgument(
            "capacity of queue must be more than 0".into(),
        ));
    }
    if capacity > max_capacity::<T>() {
        return Err(QueueError::InvalidArgument(format!(
            "capacity {capacity} exceeds the largest allocatable buffer of {} slots",
            max_capacity::<T>()
        )));
    }
    Ok(capacity)
}

impl<T> RingQueue<T> {
    /// Create an empty queue with the default capacity
    pub fn new() -> Self {
        Self::build(START_CAPACITY, GROW_FACTOR)
    }

    /// Create an empty queue able to hold `capacity` elements before growing
    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        let capacity = check_capacity::<T>(capacity)?;
        Ok(Self::build(capacity, GROW_FACTOR))
    }

    /// Create an empty queue from validated settings
    pub fn with_config(config: &QueueConfig) -> Result<Self, QueueError> {
        let capacity = check_capacity::<T>(config.validate()?)?;
        Ok(Self::build(capacity, config.grow_factor))
    }

    /// Create a queue holding every element of `source` in iteration order
    ///
    /// The queue starts at the default capacity and grows as elements are
    /// added. Passing `None` fails with [`QueueError::NullInput`].
    pub fn from_source<I>(source: impl Into<Option<I>>) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        let source = source.into().ok_or(QueueError::NullInput("source"))?;
        let mut queue = Self::new();
        for item in source {
            queue.push(item);
        }
        Ok(queue)
    }

    fn build(capacity: usize, grow_factor: usize) -> Self {
        Self {
            buffer: allocate(capacity),
            head: 0,
            tail: 0,
            count: 0,
            version: 0,
            grow_factor,
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots in the current buffer
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Structural modification counter
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Element `index` positions behind the head, if there is one
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        self.buffer[self.slot(index)].as_ref()
    }

    /// Add an element at the back of the queue
    ///
    /// A full buffer is replaced by one `grow_factor` times larger, up to the
    /// largest allocatable buffer, before the element is stored. Passing `None` fails with [`QueueError::NullInput`]
    /// and leaves the queue untouched.
    pub fn enqueue(&mut self, item: impl Into<Option<T>>) -> Result<(), QueueError> {
        let Some(item) = item.into() else {
            return Err(QueueError::NullInput("item"));
        };
        self.push(item);
        Ok(())
    }

    fn push(&mut self, item: T) {
        let len_before = self.count;
        if self.count == self.capacity() {
            let grown = self
                .capacity()
                .saturating_mul(self.grow_factor)
                .min(max_capacity::<T>());
            self.resize(grown);
        }

        self.buffer[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.capacity();
        self.count += 1;
        self.version = self.version.wrapping_add(1);

        // --- Negative-space assertion: exactly one element was added ---
        assert_eq!(self.count, len_before + 1, "Queue length should increase by 1");
        assert!(self.count <= self.capacity(), "Queue must never hold more than its capacity");
    }

    /// Remove and return the element at the front of the queue
    ///
    /// When the buffer is more than `grow_factor` times larger than the
    /// number of live elements, it is shrunk before the element is removed.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyCollection);
        }

        // Occupancy is measured before the removal.
        let capacity = self.capacity();
        if capacity > self.count.saturating_mul(self.grow_factor) {
            let shrunk = capacity / self.grow_factor;
            if shrunk >= 1 && shrunk >= self.count {
                self.resize(shrunk);
            }
        }

        let len_before = self.count;
        let Some(item) = self.buffer[self.head].take() else {
            unreachable!("live slot {} of the queue is vacant", self.head);
        };
        self.head = (self.head + 1) % self.capacity();
        self.count -= 1;
        self.version = self.version.wrapping_add(1);

        // -- post op assertion: queue size decreased by exactly one
        assert_eq!(self.count, len_before - 1, "Queue length should decrease by 1");
        Ok(item)
    }

    /// Element at the front of the queue, without removing it
    pub fn peek(&self) -> Result<&T, QueueError> {
        self.get(0).ok_or(QueueError::EmptyCollection)
    }

    /// Drop every element and reset the cursors
    pub fn clear(&mut self) {
        trace!(count = self.count, capacity = self.capacity(), "Clearing ring queue");
        for slot in self.buffer.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Check whether some live element equals `item`
    ///
    /// Equality is whatever `T: PartialEq` says it is, so a type comparing by
    /// identity only matches the very instance that was enqueued. With `None`
    /// this answers whether any live slot is vacant.
    pub fn contains<'a>(&self, item: impl Into<Option<&'a T>>) -> bool
    where
        T: PartialEq + 'a,
    {
        match item.into() {
            Some(item) => self.iter().any(|live| live == item),
            None => (0..self.count).any(|index| self.buffer[self.slot(index)].is_none()),
        }
    }

    /// Clone the live elements, oldest first, into `destination` from `index` on
    ///
    /// Fails with [`QueueError::OutOfRange`] when `len - 1 - index > count`, or
    /// when `destination` has fewer than `count` slots from `index`.
    pub fn copy_to<'d>(
        &self,
        destination: impl Into<Option<&'d mut [T]>>,
        index: usize,
    ) -> Result<(), QueueError>
    where
        T: Clone + 'd,
    {
        let destination = destination
            .into()
            .ok_or(QueueError::NullInput("destination"))?;
        let len = destination.len();
        let out_of_range = || QueueError::OutOfRange {
            index,
            len,
            count: self.count,
        };

        // Rejects destinations with more than one slot to spare after the window.
        if (len as i128) - 1 - (index as i128) > (self.count as i128) {
            return Err(out_of_range());
        }
        let end = index
            .checked_add(self.count)
            .filter(|&end| end <= len)
            .ok_or_else(out_of_range)?;

        for (target, item) in destination[index..end].iter_mut().zip(self.iter()) {
            *target = item.clone();
        }
        Ok(())
    }

    /// Clone the live elements into a new vector, oldest first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Borrowing iterator over the live elements, oldest first
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { queue: self, index: 0 }
    }

    /// Detached cursor that fails once the queue is structurally modified
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.version)
    }

    fn slot(&self, index: usize) -> usize {
        (self.head + index) % self.capacity()
    }

    fn resize(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.count && new_capacity > 0,
            "Resize must keep every live element"
        );
        debug!(
            from = self.capacity(),
            to = new_capacity,
            count = self.count,
            "Reallocating ring queue buffer"
        );

        let mut buffer = allocate(new_capacity);
        for (index, target) in buffer.iter_mut().take(self.count).enumerate() {
            let source = self.slot(index);
            *target = self.buffer[source].take();
        }

        self.buffer = buffer;
        self.head = 0;
        self.tail = self.count % new_capacity;
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for item in iter {
            queue.push(item);
        }
        queue
    }
}

/// Borrowing iterator returned by [`RingQueue::iter`]
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    queue: &'a RingQueue<T>,
    index: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.queue.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Draining iterator that dequeues until the queue is empty
#[derive(Debug)]
pub struct IntoIter<T> {
    queue: RingQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for RingQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { queue: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_wraps_before_growing() {
        let mut queue: RingQueue<i32> = RingQueue::with_capacity(4).unwrap();
        for item in 1..=3 {
            queue.enqueue(item).unwrap();
        }
        assert_eq!(queue.dequeue().unwrap(), 1);
        assert_eq!(queue.dequeue().unwrap(), 2);

        for item in 4..=6 {
            queue.enqueue(item).unwrap();
        }
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.head, 2);
        assert_eq!(queue.tail, 2);
        assert_eq!(queue.to_vec(), vec![3, 4, 5, 6]);

        queue.enqueue(7).unwrap();
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.head, 0);
        assert_eq!(queue.tail, 5);
        assert_eq!(queue.to_vec(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn dequeue_vacates_the_slot() {
        let mut queue: RingQueue<String> = RingQueue::with_capacity(2).unwrap();
        queue.enqueue(String::from("a")).unwrap();
        queue.enqueue(String::from("b")).unwrap();
        queue.dequeue().unwrap();
        assert!(queue.buffer[0].is_none());
        assert_eq!(queue.buffer[1].as_deref(), Some("b"));
    }

    #[test]
    fn shrink_is_decided_before_removal() {
        let mut queue: RingQueue<u32> = (0..5).collect();
        assert_eq!(queue.capacity(), 8);

        // 8 > 4 * 2 is false while four elements are live.
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        assert_eq!(queue.capacity(), 8);

        // 8 > 3 * 2 holds, so the buffer halves before the third removal.
        queue.dequeue().unwrap();
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.to_vec(), vec![3, 4]);
    }

    #[test]
    fn single_slot_queue_never_shrinks_to_zero() {
        let mut queue: RingQueue<i32> = RingQueue::with_capacity(1).unwrap();
        queue.enqueue(1).unwrap();
        assert_eq!(queue.dequeue().unwrap(), 1);
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(2).unwrap();
        assert_eq!(queue.peek().unwrap(), &2);
    }

    #[test]
    fn clear_vacates_every_slot() {
        let mut queue: RingQueue<i32> = (0..6).collect();
        let version = queue.version();
        queue.clear();
        assert!(queue.buffer.iter().all(Option::is_none));
        assert_eq!((queue.head, queue.tail, queue.len()), (0, 0, 0));
        assert!(queue.version() > version);
    }

    #[test]
    fn unallocatable_capacity_is_invalid() {
        let config = QueueConfig { initial_capacity: i64::MAX, grow_factor: 2 };
        assert!(matches!(
            RingQueue::<u64>::with_config(&config),
            Err(QueueError::InvalidArgument(_))
        ));
        assert!(matches!(
            RingQueue::<u64>::with_capacity(max_capacity::<u64>() + 1),
            Err(QueueError::InvalidArgument(_))
        ));
    }

    #[test]
    fn largest_grow_factor_grows_without_panicking() {
        let config = QueueConfig {
            initial_capacity: 1,
            grow_factor: crate::core::config::MAX_GROW_FACTOR,
        };
        let mut queue: RingQueue<i32> = RingQueue::with_config(&config).unwrap();
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        assert_eq!(queue.capacity(), 16);
        assert_eq!(queue.to_vec(), vec![1, 2]);
    }

    #[test]
    fn custom_grow_factor_triples_capacity() {
        let config = QueueConfig { initial_capacity: 2, grow_factor: 3 };
        let mut queue: RingQueue<i32> = RingQueue::with_config(&config).unwrap();
        for item in 0..3 {
            queue.enqueue(item).unwrap();
        }
        assert_eq!(queue.capacity(), 6);

        // 6 > 3 * 3 and 6 > 2 * 3 are false, 6 > 1 * 3 holds.
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        assert_eq!(queue.capacity(), 6);
        assert_eq!(queue.dequeue().unwrap(), 2);
        assert_eq!(queue.capacity(), 2);
        assert!(queue.is_empty());
    }
}
