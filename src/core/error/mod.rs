use thiserror::Error;

/// Failures surfaced by queue operations, cursors and configuration loading
///
/// Every failure is reported synchronously to the caller. Nothing is retried
/// or recovered internally.
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Argument '{0}' is absent")]
    NullInput(&'static str),

    #[error("Queue is empty")]
    EmptyCollection,

    #[error("Index {index} is out of range for a destination of length {len} receiving {count} elements")]
    OutOfRange { index: usize, len: usize, count: usize },

    #[error("Collection was modified during iteration")]
    ConcurrentModification,

    #[error("Cursor is not positioned on an element")]
    InvalidIteratorState,

    #[error("Failed to parse queue configuration: {0}")]
    Config(#[from] serde_json::Error),
}
