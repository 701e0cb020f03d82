use std::fmt;
use std::marker::PhantomData;
use serde::de::{Deserialize, Deserializer, Error, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use crate::core::queue::RingQueue;

/// Serialized as a plain sequence, oldest element first
impl<T: Serialize> Serialize for RingQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct QueueVisitor<T> {
    marker: PhantomData<fn() -> RingQueue<T>>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for QueueVisitor<T> {
    type Value = RingQueue<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of queue elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut queue = RingQueue::new();
        // Elements are read as optional so an explicit null gets a precise error.
        while let Some(item) = seq.next_element::<Option<T>>()? {
            queue.enqueue(item).map_err(A::Error::custom)?;
        }
        Ok(queue)
    }
}

/// Rebuilt by enqueueing every element in order, exactly like `from_source`
impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingQueue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(QueueVisitor { marker: PhantomData })
    }
}

