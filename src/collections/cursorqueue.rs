//! Capacity-bounded queue addressed by a monotonically increasing index.
//!
//! [`CursorQueue`] stores items under 1-based indices handed out in insertion order and
//! keeps a separate read cursor that walks backward from the newest item towards index 1.
//! The cursor can be rewound to just before the first item carrying a given name with
//! [`CursorQueue::move_index`].
//!
//! # Cursor Model
//!
//! ```text
//!   index:    0     1     2     3
//!   item:     -     A     B     C
//!                               ^ cursor after enqueue(C)
//!   seek() -> C, B, A, None      (cursor 3 -> 2 -> 1 -> 0 -> -1)
//!   move_index("B")              (cursor = 2 - 1 = 1)
//!   seek() -> A
//! ```
//!
//! A cursor of `-1` marks the queue as exhausted: [`CursorQueue::seek`] keeps returning
//! `None` until the cursor is moved again by [`CursorQueue::move_index`],
//! [`CursorQueue::enqueue`] or [`CursorQueue::clear`].
//!
//! # Boundary Conditions
//!
//! A full queue and an exhausted cursor are routine outcomes. They are reported through
//! [`Enqueued`] and `Option` return values, and optionally recorded in an attached
//! [`Diagnostics`] container, but never raised as errors.
//!
//! # Thread Safety
//!
//! The queue has no internal locking. All mutating operations take `&mut self`; share it
//! between threads by wrapping it in a lock of your choice.

use std::{collections::BTreeMap, fmt, sync::Arc};

use tracing::debug;

use crate::{
    collections::config::{QueueConfig, DEFAULT_QUEUE_CAPACITY},
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    Result,
};

/// Cursor value signalling that no more items can be read.
pub const CURSOR_EXHAUSTED: isize = -1;

/// An item that can be stored in a [`CursorQueue`].
///
/// The name is a display name used by [`CursorQueue::move_index`]; it does not need to be
/// unique.
pub trait QueueItem {
    /// Returns the display name of this item.
    fn item_name(&self) -> &str;
}

/// Outcome of [`CursorQueue::enqueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// The item was stored under the contained index.
    Stored(usize),

    /// The contained index was already occupied; the item was dropped but the insertion
    /// index still advanced past it.
    Skipped(usize),

    /// The queue is at capacity; nothing changed.
    Rejected,
}

impl Enqueued {
    /// Returns `true` if the item ended up in the queue.
    pub fn is_stored(&self) -> bool {
        matches!(self, Enqueued::Stored(_))
    }

    /// Returns the index the item was stored under, if it was stored.
    pub fn index(&self) -> Option<usize> {
        match self {
            Enqueued::Stored(index) => Some(*index),
            Enqueued::Skipped(_) | Enqueued::Rejected => None,
        }
    }
}

/// A capacity-bounded, index-addressed queue with a backward-walking read cursor.
///
/// Items live behind [`Arc`] so [`CursorQueue::seek`] can hand them out without removing
/// them from the queue.
///
/// # Examples
///
/// ```rust
/// use dotsupport::collections::{CursorQueue, QueueItem};
///
/// struct Page(&'static str);
///
/// impl QueueItem for Page {
///     fn item_name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut history = CursorQueue::new();
/// history.enqueue(Page("home"));
/// history.enqueue(Page("search"));
/// history.enqueue(Page("results"));
///
/// assert_eq!(history.seek().unwrap().item_name(), "results");
/// assert_eq!(history.seek().unwrap().item_name(), "search");
///
/// history.move_index("results");
/// assert_eq!(history.seek().unwrap().item_name(), "search");
/// ```
pub struct CursorQueue<T> {
    /// Maximum number of stored items
    capacity: usize,
    /// Number of stored items
    count: usize,
    /// Last assigned insertion index; the next item goes to `next_index + 1`
    next_index: usize,
    /// Read position, `CURSOR_EXHAUSTED` once reading ran past index 1
    cursor: isize,
    items: BTreeMap<usize, Arc<T>>,
    diagnostics: Option<Arc<Diagnostics>>,
}

impl<T> CursorQueue<T>
where
    T: QueueItem,
{
    /// Creates an empty queue with the default capacity of 1024 items.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates an empty queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, as such a queue could never store anything.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "CursorQueue capacity must be greater than 0");

        Self {
            capacity,
            count: 0,
            next_index: 0,
            cursor: 0,
            items: BTreeMap::new(),
            diagnostics: None,
        }
    }

    /// Creates an empty queue from a [`QueueConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCapacity`] if the configuration is invalid.
    pub fn from_config(config: QueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_capacity(config.capacity))
    }

    /// Attaches a diagnostics container that records absorbed boundary conditions.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Appends `item` under the next insertion index.
    ///
    /// On success the cursor is placed on the new item, so the following
    /// [`CursorQueue::seek`] returns it.
    ///
    /// Returns [`Enqueued::Rejected`] without any change if the queue is full, and
    /// [`Enqueued::Skipped`] if the next index is already occupied. A skip drops `item`
    /// and advances the insertion index without changing the item count.
    pub fn enqueue(&mut self, item: T) -> Enqueued {
        if self.count >= self.capacity {
            debug!(capacity = self.capacity, "enqueue rejected, queue is full");
            self.report(|| {
                Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Capacity,
                    format!(
                        "Queue is full ({} items), dropped '{}'",
                        self.capacity,
                        item.item_name()
                    ),
                )
            });
            return Enqueued::Rejected;
        }

        let index = self.next_index + 1;
        self.next_index = index;

        if self.items.contains_key(&index) {
            debug!(index, "enqueue skipped occupied slot");
            self.report(|| {
                Diagnostic::new(
                    DiagnosticSeverity::Info,
                    DiagnosticCategory::Slot,
                    format!("Slot already occupied, dropped '{}'", item.item_name()),
                )
                .with_index(index)
            });
            return Enqueued::Skipped(index);
        }

        self.items.insert(index, Arc::new(item));
        self.count += 1;
        self.cursor = index as isize;
        Enqueued::Stored(index)
    }

    /// Returns the item under the cursor and moves the cursor one step towards index 0.
    ///
    /// Returns `None` once the cursor is exhausted. Reading past index 1 sets the cursor to
    /// [`CURSOR_EXHAUSTED`].
    pub fn seek(&mut self) -> Option<Arc<T>> {
        if self.cursor == CURSOR_EXHAUSTED {
            return None;
        }

        let item = self.items.get(&(self.cursor as usize)).cloned();

        match item {
            Some(item) => {
                self.cursor -= 1;
                Some(item)
            }
            None => {
                self.cursor = CURSOR_EXHAUSTED;
                None
            }
        }
    }

    /// Rewinds the cursor to just before the lowest-indexed item named `name`.
    ///
    /// The next [`CursorQueue::seek`] then returns the item preceding that match, or `None`
    /// if the match sits at index 1. Returns `false` and leaves the cursor untouched if no
    /// item carries the name.
    pub fn move_index(&mut self, name: &str) -> bool {
        let first = self
            .items
            .iter()
            .find(|(_, item)| item.item_name() == name)
            .map(|(index, _)| *index);

        match first {
            Some(index) => {
                self.cursor = index as isize - 1;
                true
            }
            None => {
                self.report(|| {
                    Diagnostic::new(
                        DiagnosticSeverity::Info,
                        DiagnosticCategory::Cursor,
                        format!("No item named '{}', cursor unchanged", name),
                    )
                });
                false
            }
        }
    }

    /// Returns the stored item at `index`, without touching the cursor.
    pub fn get(&self, index: usize) -> Option<Arc<T>> {
        self.items.get(&index).cloned()
    }

    /// Returns all stored items in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Arc<T>)> + '_ {
        self.items
            .iter()
            .map(|(index, item)| (*index, Arc::clone(item)))
    }

    /// Empties the queue and resets the cursor and insertion index to 0.
    pub fn clear(&mut self) {
        debug!(count = self.count, "clearing cursor queue");
        self.items.clear();
        self.count = 0;
        self.next_index = 0;
        self.cursor = 0;
    }

    fn report(&self, diagnostic: impl FnOnce() -> Diagnostic) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.push(diagnostic());
        }
    }
}

impl<T> CursorQueue<T> {
    /// Returns the current cursor position.
    ///
    /// This is the index the next [`CursorQueue::seek`] reads from, or
    /// [`CURSOR_EXHAUSTED`].
    pub fn cursor_position(&self) -> isize {
        self.cursor
    }

    /// Returns the current cursor position.
    ///
    /// Note that this is *not* the number of stored items; use [`CursorQueue::len`] for
    /// that. Kept for callers written against the `Size` accessor of the .NET queue.
    pub fn size(&self) -> isize {
        self.cursor_position()
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if further enqueues will be rejected.
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Returns the maximum number of stored items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the last assigned insertion index, 0 if none was assigned since creation or
    /// the last [`CursorQueue::clear`].
    pub fn last_index(&self) -> usize {
        self.next_index
    }
}

impl<T> Default for CursorQueue<T>
where
    T: QueueItem,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CursorQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorQueue")
            .field("capacity", &self.capacity)
            .field("count", &self.count)
            .field("next_index", &self.next_index)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
