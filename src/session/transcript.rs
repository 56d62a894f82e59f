use std::collections::HashSet;

use crate::common::ChatEvent;

/// The visible message history: an append-only sequence plus a set of seen
/// timestamps for O(1) duplicate detection.
///
/// The relay delivers at-least-once (it echoes the sender's own messages
/// back), so both the local optimistic append and the inbound path run
/// through the same dedup gate. Display order is arrival order; the sequence
/// is never reordered.
#[derive(Debug, Default)]
pub struct Transcript {
    events: Vec<ChatEvent>,
    seen: HashSet<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inbound event unless its timestamp was already seen.
    /// Returns whether the event was appended.
    pub fn ingest(&mut self, event: ChatEvent) -> bool {
        if !self.seen.insert(event.timestamp.clone()) {
            log::debug!("Dropping duplicate event at {}", event.timestamp);
            return false;
        }
        self.events.push(event);
        true
    }

    /// Optimistic local echo for an event this client just sent. Same dedup
    /// rule as [`Transcript::ingest`], so the relay's re-broadcast of the
    /// message is recognized and dropped.
    pub fn append_local(&mut self, event: ChatEvent) -> bool {
        self.ingest(event)
    }

    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
