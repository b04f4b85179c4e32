//! In-process `slotted` notifications.

use flume::{Receiver, Sender};
use log::debug;

use crate::slot::Category;
use crate::table::RowId;

/// A device row was placed into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlottedEvent {
    pub row_id: RowId,
    pub slot: u32,
    pub category: Category,
}

/// Fan-out of [`SlottedEvent`]s: every subscriber receives every event.
#[derive(Debug, Default)]
pub struct SlottedEvents {
    subscribers: Vec<Sender<SlottedEvent>>,
}

impl SlottedEvents {
    pub fn subscribe(&mut self) -> Receiver<SlottedEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers `event` to all live subscribers and forgets dropped ones.
    pub fn emit(&mut self, event: SlottedEvent) {
        debug!("Slotted {} into {} ({})", event.row_id, event.slot, event.category);
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
