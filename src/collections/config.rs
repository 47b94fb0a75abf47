//! Configuration for [`crate::collections::CursorQueue`].

use crate::{Error, Result};

/// Capacity used by [`crate::collections::CursorQueue::new`] and [`QueueConfig::default`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Construction parameters for a cursor queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of stored items; further enqueues are refused (default: 1024)
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl QueueConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration without a practical capacity ceiling.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            capacity: usize::MAX,
        }
    }

    /// Checks that the configuration describes a usable queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }

        Ok(())
    }
}
