//! Integration tests for `CursorQueue` through the public API.

use dotsupport::collections::{CursorQueue, Enqueued, QueueConfig, QueueItem, CURSOR_EXHAUSTED};
use dotsupport::diagnostics::{DiagnosticCategory, DiagnosticSeverity, Diagnostics};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug)]
struct Waypoint {
    name: String,
    x: i32,
    y: i32,
}

impl Waypoint {
    fn new(name: &str, x: i32, y: i32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
        }
    }
}

impl QueueItem for Waypoint {
    fn item_name(&self) -> &str {
        &self.name
    }
}

#[test]
fn route_backtracking() {
    let mut route = CursorQueue::new();
    route.enqueue(Waypoint::new("depot", 0, 0));
    route.enqueue(Waypoint::new("bridge", 4, 1));
    route.enqueue(Waypoint::new("tunnel", 9, 3));
    route.enqueue(Waypoint::new("harbor", 12, 8));

    let last = route.seek().unwrap();
    assert_eq!((last.name.as_str(), last.x, last.y), ("harbor", 12, 8));

    // Jump back to just before the bridge and walk out
    assert!(route.move_index("bridge"));
    let before_bridge = route.seek().unwrap();
    assert_eq!((before_bridge.x, before_bridge.y), (0, 0));
    assert!(route.seek().is_none());
    assert_eq!(route.size(), CURSOR_EXHAUSTED);
}

#[test]
fn default_capacity_overflow() {
    let mut queue = CursorQueue::from_config(QueueConfig::default()).unwrap();
    for i in 0..1024 {
        assert!(queue.enqueue(Waypoint::new(&format!("wp{}", i), i, i)).is_stored());
    }

    assert_eq!(queue.enqueue(Waypoint::new("overflow", 0, 0)), Enqueued::Rejected);
    assert_eq!(queue.len(), 1024);
    assert_eq!(queue.seek().unwrap().name, "wp1023");
}

#[test]
fn clear_restarts_indices() {
    let mut queue = CursorQueue::with_capacity(4);
    for name in ["a", "b", "c"] {
        queue.enqueue(Waypoint::new(name, 0, 0));
    }

    queue.clear();
    assert_eq!(queue.size(), 0);
    assert!(queue.is_empty());
    assert_eq!(queue.enqueue(Waypoint::new("d", 0, 0)).index(), Some(1));
}

#[test]
fn diagnostics_shared_between_queues() {
    let diagnostics = Arc::new(Diagnostics::new());
    let queue = Arc::new(Mutex::new(
        CursorQueue::with_capacity(2).with_diagnostics(Arc::clone(&diagnostics)),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                queue
                    .lock()
                    .unwrap()
                    .enqueue(Waypoint::new(&format!("t{}", i), i, 0))
            })
        })
        .collect();

    let stored = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Enqueued::is_stored)
        .count();

    assert_eq!(stored, 2);
    assert_eq!(queue.lock().unwrap().len(), 2);
    assert_eq!(diagnostics.by_category(DiagnosticCategory::Capacity).len(), 2);
    assert!(diagnostics
        .iter()
        .all(|d| d.severity == DiagnosticSeverity::Warning));
}
