use crate::{card_tag, Face, Transform};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u32);

/// Runtime card instance occupying a slot (pile, focus, hand or viewer
/// list). Created when drawn or rendered into a list, destroyed when the
/// surrounding session is cleared.
#[derive(Debug, Clone)]
pub struct CardHandle {
    pub id: HandleId,
    pub card: u32,
    pub tag: String,
    pub face: Face,
    pub transform: Transform,
    pub visible: bool,
    pub interactive: bool,
}

/// Arena owning every live card handle.
#[derive(Debug, Default)]
pub struct Table {
    handles: HashMap<HandleId, CardHandle>,
    next: u32,
}

impl Table {
    pub fn spawn(&mut self, card: u32, face: Face, transform: Transform) -> HandleId {
        let id = HandleId(self.next);
        self.next += 1;
        self.handles.insert(
            id,
            CardHandle {
                id,
                card,
                tag: card_tag(card),
                face,
                transform,
                visible: true,
                interactive: true,
            },
        );
        id
    }

    pub fn despawn(&mut self, id: HandleId) {
        self.handles.remove(&id);
    }

    pub fn get(&self, id: HandleId) -> Option<&CardHandle> {
        self.handles.get(&id)
    }

    pub fn get_mut(&mut self, id: HandleId) -> Option<&mut CardHandle> {
        self.handles.get_mut(&id)
    }

    pub fn ids(&self) -> Vec<HandleId> {
        let mut ids: Vec<HandleId> = self.handles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

/// Draw source: last in, first out, only the top card interactable.
#[derive(Debug, Default)]
pub struct Pile {
    stack: Vec<HandleId>,
}

impl Pile {
    pub fn push(&mut self, id: HandleId) {
        self.stack.push(id);
    }

    pub fn top(&self) -> Option<HandleId> {
        self.stack.last().copied()
    }

    pub fn pop_top(&mut self) -> Option<HandleId> {
        self.stack.pop()
    }

    pub fn contains(&self, id: HandleId) -> bool {
        self.stack.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

/// Accumulated selection, append-only during a session. Order is commit
/// order and is authoritative for both layout angle and persisted order.
#[derive(Debug)]
pub struct Hand {
    slots: Vec<HandleId>,
    capacity: usize,
}

impl Hand {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, id: HandleId) {
        debug_assert!(self.slots.len() < self.capacity);
        self.slots.push(id);
    }

    pub fn slots(&self) -> &[HandleId] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_unique_ids_and_tags() {
        let mut table = Table::default();
        let a = table.spawn(3, Face::Down, Transform::default());
        let b = table.spawn(3, Face::Down, Transform::default());
        assert_ne!(a, b);
        assert_eq!(table.get(a).expect("live").tag, "card_id_3");
        table.despawn(a);
        assert!(table.get(a).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn pile_is_lifo() {
        let mut pile = Pile::default();
        let mut table = Table::default();
        let a = table.spawn(1, Face::Down, Transform::default());
        let b = table.spawn(2, Face::Down, Transform::default());
        pile.push(a);
        pile.push(b);
        assert_eq!(pile.top(), Some(b));
        assert_eq!(pile.pop_top(), Some(b));
        assert_eq!(pile.top(), Some(a));
    }
}
