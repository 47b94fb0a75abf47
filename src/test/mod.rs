//! Shared fixtures for the unit tests.

use crate::collections::{CursorQueue, QueueItem};

/// Queue item carrying a display name and a payload to tell equal names apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedItem {
    pub name: String,
    pub payload: u32,
}

impl QueueItem for NamedItem {
    fn item_name(&self) -> &str {
        &self.name
    }
}

// Helper function to create a NamedItem
pub fn create_item(name: &str) -> NamedItem {
    NamedItem {
        name: name.to_string(),
        payload: 0,
    }
}

// Helper function to create a default-capacity queue holding `names` at indices 1..=n
pub fn create_queue(names: &[&str]) -> CursorQueue<NamedItem> {
    let mut queue = CursorQueue::new();
    for (payload, name) in names.iter().enumerate() {
        queue.enqueue(NamedItem {
            name: (*name).to_string(),
            payload: payload as u32,
        });
    }
    queue
}
