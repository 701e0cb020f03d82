pub mod codec;
pub mod config;
pub mod cursor;
pub mod error;
pub mod queue;
