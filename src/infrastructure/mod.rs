//! External concerns: persistence behind the [`storage::Storage`] seam

pub mod storage;

pub use storage::{InMemoryStorage, Storage};
