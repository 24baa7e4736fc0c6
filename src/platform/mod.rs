//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Viewport fitting (logical resolution to window size)

pub mod storage;
pub mod viewport;

pub use storage::{KeyValueStore, MemoryStore};
pub use viewport::Viewport;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
