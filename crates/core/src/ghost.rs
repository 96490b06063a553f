use crate::{Animator, Event, EventBus, HandleId, Table, Transform, TweenId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Enlarged view of a card already placed in a layout-managed list.
///
/// The original is hidden in place (still occupying its slot, so the list
/// never reflows) and a transient duplicate is animated to the focus
/// anchor. Closing animates the ghost back onto the original's current
/// position, restores the original and destroys the ghost. At most one
/// ghost exists at a time; input during either animation is dropped.
#[derive(Debug)]
pub struct GhostOverlay {
    anchor: Transform,
    duration: f32,
    phase: GhostPhase,
    original: Option<HandleId>,
    ghost: Option<HandleId>,
    awaited: Option<TweenId>,
}

impl GhostOverlay {
    pub fn new(anchor: Transform, duration: f32) -> Self {
        Self {
            anchor,
            duration,
            phase: GhostPhase::Closed,
            original: None,
            ghost: None,
            awaited: None,
        }
    }

    pub fn phase(&self) -> GhostPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == GhostPhase::Open
    }

    pub fn ghost(&self) -> Option<HandleId> {
        self.ghost
    }

    pub fn open(
        &mut self,
        original: HandleId,
        table: &mut Table,
        animator: &mut dyn Animator,
        events: &mut EventBus,
    ) {
        if self.phase != GhostPhase::Closed {
            return;
        }
        let Some(card) = table.get_mut(original) else {
            return;
        };
        let (card_id, face, from, tag) = (card.card, card.face, card.transform, card.tag.clone());
        card.visible = false;
        card.interactive = false;

        let ghost = table.spawn(card_id, face, from);
        self.original = Some(original);
        self.ghost = Some(ghost);
        self.phase = GhostPhase::Opening;
        self.awaited = Some(animator.tween(ghost, from, self.anchor, self.duration));
        events.push(Event::FocusOpened { tag });
    }

    /// Triggered by the full-screen input catcher that intercepts any
    /// click while the overlay is open.
    pub fn close(&mut self, table: &mut Table, animator: &mut dyn Animator) {
        if self.phase != GhostPhase::Open {
            return;
        }
        let (Some(original), Some(ghost)) = (self.original, self.ghost) else {
            return;
        };
        // Return to wherever the original sits *now*, not where it was
        // when the overlay opened.
        let Some(back) = table.get(original).map(|card| card.transform) else {
            return;
        };
        let from = table
            .get(ghost)
            .map(|card| card.transform)
            .unwrap_or(self.anchor);
        self.phase = GhostPhase::Closing;
        self.awaited = Some(animator.tween(ghost, from, back, self.duration));
    }

    pub fn on_tween_complete(&mut self, id: TweenId, table: &mut Table, events: &mut EventBus) {
        if self.awaited != Some(id) {
            return;
        }
        self.awaited = None;
        match self.phase {
            GhostPhase::Opening => {
                if let Some(ghost) = self.ghost.and_then(|g| table.get_mut(g)) {
                    ghost.transform = self.anchor;
                }
                self.phase = GhostPhase::Open;
            }
            GhostPhase::Closing => {
                let tag = self
                    .ghost
                    .and_then(|g| table.get(g))
                    .map(|card| card.tag.clone());
                if let Some(ghost) = self.ghost.take() {
                    table.despawn(ghost);
                }
                if let Some(original) = self.original.take().and_then(|o| table.get_mut(o)) {
                    original.visible = true;
                    original.interactive = true;
                }
                self.phase = GhostPhase::Closed;
                if let Some(tag) = tag {
                    events.push(Event::FocusClosed { tag });
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Face, Tweens, Vec2};

    fn setup() -> (Table, Tweens, EventBus, GhostOverlay, HandleId) {
        let mut table = Table::default();
        let original = table.spawn(9, Face::Up, Transform::at(Vec2::new(50.0, 400.0)));
        let anchor = Transform {
            pos: Vec2::new(640.0, 330.0),
            scale: 1.6,
            rot: 0.0,
        };
        let overlay = GhostOverlay::new(anchor, 0.2);
        (table, Tweens::new(), EventBus::default(), overlay, original)
    }

    fn settle(
        overlay: &mut GhostOverlay,
        table: &mut Table,
        tweens: &mut Tweens,
        events: &mut EventBus,
    ) {
        while !tweens.is_idle() {
            for id in tweens.finish_all(table) {
                overlay.on_tween_complete(id, table, events);
            }
        }
    }

    #[test]
    fn open_hides_original_and_parks_ghost_on_anchor() {
        let (mut table, mut tweens, mut events, mut overlay, original) = setup();
        overlay.open(original, &mut table, &mut tweens, &mut events);
        assert_eq!(overlay.phase(), GhostPhase::Opening);
        assert!(!table.get(original).expect("live").visible);
        assert_eq!(table.len(), 2);

        settle(&mut overlay, &mut table, &mut tweens, &mut events);
        assert!(overlay.is_open());
        let ghost = overlay.ghost().expect("ghost");
        let parked = table.get(ghost).expect("live").transform;
        assert_eq!(parked.pos, Vec2::new(640.0, 330.0));
        assert!((parked.scale - 1.6).abs() < 1e-5);
    }

    #[test]
    fn close_returns_ghost_and_restores_original() {
        let (mut table, mut tweens, mut events, mut overlay, original) = setup();
        let slot = table.get(original).expect("live").transform;
        overlay.open(original, &mut table, &mut tweens, &mut events);
        settle(&mut overlay, &mut table, &mut tweens, &mut events);

        overlay.close(&mut table, &mut tweens);
        assert_eq!(overlay.phase(), GhostPhase::Closing);
        settle(&mut overlay, &mut table, &mut tweens, &mut events);

        assert_eq!(overlay.phase(), GhostPhase::Closed);
        assert_eq!(table.len(), 1);
        let restored = table.get(original).expect("live");
        assert!(restored.visible);
        assert!(restored.interactive);
        assert_eq!(restored.transform, slot);

        let drained: Vec<_> = events.drain().collect();
        assert!(drained
            .iter()
            .any(|event| matches!(event, Event::FocusOpened { tag } if tag == "card_id_9")));
        assert!(drained
            .iter()
            .any(|event| matches!(event, Event::FocusClosed { tag } if tag == "card_id_9")));
    }

    #[test]
    fn only_one_ghost_may_exist() {
        let (mut table, mut tweens, mut events, mut overlay, original) = setup();
        let other = table.spawn(10, Face::Up, Transform::at(Vec2::new(150.0, 400.0)));

        overlay.open(original, &mut table, &mut tweens, &mut events);
        overlay.open(other, &mut table, &mut tweens, &mut events);
        // The second open is dropped while the first is still animating.
        assert_eq!(table.len(), 3);
        assert!(table.get(other).expect("live").visible);

        settle(&mut overlay, &mut table, &mut tweens, &mut events);
        overlay.open(other, &mut table, &mut tweens, &mut events);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn close_is_dropped_while_opening() {
        let (mut table, mut tweens, mut events, mut overlay, original) = setup();
        overlay.open(original, &mut table, &mut tweens, &mut events);
        overlay.close(&mut table, &mut tweens);
        assert_eq!(overlay.phase(), GhostPhase::Opening);
    }
}
