use std::io::Read;
use serde::{Deserialize, Serialize};
use crate::core::error::QueueError;

/// Capacity of a queue built without an explicit capacity
pub const START_CAPACITY: usize = 4;
/// Multiplier applied on growth and divisor applied on shrink
pub const GROW_FACTOR: usize = 2;
/// Largest accepted grow factor
pub const MAX_GROW_FACTOR: usize = 16;

/// Construction settings for a `RingQueue`
/// `initial_capacity` is signed so a negative value read from a document can be rejected
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub initial_capacity: i64,
    pub grow_factor: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: START_CAPACITY as i64,
            grow_factor: GROW_FACTOR,
        }
    }
}

impl QueueConfig {
    /// Parse a config from a JSON document
    pub fn from_json(json: &str) -> Result<Self, QueueError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a config from any JSON byte stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QueueError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check the settings and return the initial capacity as a `usize`
    pub fn validate(&self) -> Result<usize, QueueError> {
        if self.initial_capacity <= 0 {
            return Err(QueueError::InvalidArgument(format!(
                "capacity of queue must be more than 0, got {}",
                self.initial_capacity
            )));
        }
        if !(2..=MAX_GROW_FACTOR).contains(&self.grow_factor) {
            return Err(QueueError::InvalidArgument(format!(
                "grow factor must be between 2 and {MAX_GROW_FACTOR}, got {}",
                self.grow_factor
            )));
        }
        usize::try_from(self.initial_capacity).map_err(|_| {
            QueueError::InvalidArgument(format!(
                "capacity {} does not fit in memory",
                self.initial_capacity
            ))
        })
    }
}
