//! Thread-safe and cursor-addressed collections.
//!
//! This module hosts the two collections of the support library:
//!
//! - [`LazyMap`] - A reader/writer-locked map with an atomic compute-if-absent operation
//! - [`CursorQueue`] - A bounded, index-addressed queue with a backward-walking read cursor
//!
//! Both are independent of each other. [`LazyMap`] is `Sync` and meant to be shared
//! through an [`std::sync::Arc`]; [`CursorQueue`] is a single-owner collection.

mod config;
mod cursorqueue;
mod lazymap;

pub use config::{QueueConfig, DEFAULT_QUEUE_CAPACITY};
pub use cursorqueue::{CursorQueue, Enqueued, QueueItem, CURSOR_EXHAUSTED};
pub use lazymap::{LazyMap, MergePolicy};
