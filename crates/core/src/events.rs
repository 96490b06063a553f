use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    CardDrawn { tag: String, pile_left: usize },
    CardFocused { tag: String },
    CardCommitted {
        tag: String,
        hand: usize,
        capacity: usize,
    },
    DeckCompleted { tags: Vec<String> },
    SessionReset,
    FocusOpened { tag: String },
    FocusClosed { tag: String },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
