#![no_main]

use dotsupport::collections::{CursorQueue, QueueItem, CURSOR_EXHAUSTED};
use libfuzzer_sys::fuzz_target;

struct Item(String);

impl QueueItem for Item {
    fn item_name(&self) -> &str {
        &self.0
    }
}

// Each byte is one operation: the low two bits select it, the rest is its argument.
fuzz_target!(|data: &[u8]| {
    let mut queue = CursorQueue::with_capacity(16);

    for byte in data {
        let name = format!("n{}", (byte >> 2) & 0x7);
        match byte & 0x3 {
            0 => {
                queue.enqueue(Item(name));
            }
            1 => {
                let _ = queue.seek();
            }
            2 => {
                queue.move_index(&name);
            }
            _ => queue.clear(),
        }

        assert!(queue.len() <= queue.capacity());
        assert!(queue.size() >= CURSOR_EXHAUSTED);
        assert!(queue.size() <= queue.last_index() as isize);
    }
});
