use std::time::Duration;

use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Routine outcomes are deliberately not part of this enum: a missing key is reported as
/// `None`, a full queue as [`crate::collections::Enqueued::Rejected`] and an exhausted cursor
/// as `None`. Only conditions that the caller asked to be strict about end up here.
///
/// # Error Categories
///
/// ## Map Errors
/// - [`Error::DuplicateKey`] - A strict insert or merge hit an existing key
/// - [`Error::LockTimeout`] - A timed lock acquisition gave up
///
/// ## Configuration Errors
/// - [`Error::InvalidCapacity`] - A queue was configured with an unusable capacity
///
/// # Examples
///
/// ```rust
/// use dotsupport::{Error, collections::LazyMap};
///
/// let map = LazyMap::new();
/// map.set("answer", 42);
///
/// match map.try_insert("answer", 43) {
///     Ok(()) => println!("inserted"),
///     Err(Error::DuplicateKey) => println!("already present"),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The key is already present in the map.
    ///
    /// Raised by [`crate::collections::LazyMap::try_insert`] and by strict merges. The map
    /// is left exactly as it was before the call.
    #[error("An entry with the same key already exists")]
    DuplicateKey,

    /// Failed to lock target within the given time.
    ///
    /// Raised by the timed `*_for` operations of [`crate::collections::LazyMap`]. The
    /// operation had no effect.
    ///
    /// The associated value is the timeout that elapsed.
    #[error("Failed to lock target within {0:?}")]
    LockTimeout(Duration),

    /// The requested queue capacity can not hold any item.
    ///
    /// The associated value is the rejected capacity.
    #[error("Invalid queue capacity - {0}")]
    InvalidCapacity(usize),
}
