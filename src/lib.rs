// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dotsupport
//!
//! Collections from the generic .NET support library, rebuilt in safe Rust:
//!
//! - **Thread-safe lazy map** - [`collections::LazyMap`] guards a hash map with a
//!   reader/writer lock and offers a compute-if-absent operation that never commits two
//!   values for the same key
//! - **Cursor queue** - [`collections::CursorQueue`] is a bounded, index-addressed queue
//!   with a backward-walking read cursor and rewind-to-name
//!
//! ## Quick Start
//!
//! ```rust
//! use dotsupport::prelude::*;
//!
//! let cache: LazyMap<&str, usize> = LazyMap::new();
//! let len = cache.get_or_add("WindowsBase", || "WindowsBase".len());
//! assert_eq!(len, 11);
//! assert_eq!(cache.get("WindowsBase"), Some(11));
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`collections`] - The map and the queue
//! - [`diagnostics`] - Collector for boundary conditions the collections absorb silently
//! - [`Error`] and [`Result`] - Error handling for the strict and timed operations
//!
//! ## Logging
//!
//! The collections emit `tracing` events at `trace` and `debug` level. Install any
//! `tracing` subscriber in the application to see them.
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotsupport::prelude::*;
///
/// let map: LazyMap<u32, &str> = LazyMap::new();
/// map.set(1, "one");
/// assert!(map.contains_key(&1));
/// ```
pub mod prelude;

/// Thread-safe map and cursor queue.
///
/// # Key Types
///
/// - [`collections::LazyMap`] - Reader/writer-locked map with compute-if-absent
/// - [`collections::CursorQueue`] - Bounded queue with a backward read cursor
/// - [`collections::QueueConfig`] - Construction parameters for the queue
pub mod collections;

/// Recording of silently absorbed boundary conditions.
pub mod diagnostics;

/// `dotsupport` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotsupport` Error type
///
/// The main error type for all fallible operations in this crate.
pub use error::Error;
