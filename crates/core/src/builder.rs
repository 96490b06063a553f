use crate::{
    arc_slots, Animator, BuildRules, Catalog, Event, EventBus, Face, Hand, HandleId, Pile,
    RngState, SetupError, Table, Transform, TweenId, Vec2,
};
use std::collections::VecDeque;

/// The move whose animation is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMove {
    DrawToFocus { handle: HandleId },
    CommitToHand { handle: HandleId },
}

/// Session phase. The mid-animation gate lives in the state type itself:
/// while `Animating`, every input is dropped, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    ReadyToDraw,
    Animating(PendingMove),
    Focusing { can_finish: bool },
    Built,
}

#[derive(Debug, Clone, Copy)]
enum StepEffect {
    FlipFaceUp,
}

#[derive(Debug, Clone, Copy)]
struct TweenStep {
    to: Transform,
    duration: f32,
    effect: Option<StepEffect>,
}

#[derive(Debug, Clone, Copy)]
struct AwaitedStep {
    tween: TweenId,
    to: Transform,
    effect: Option<StepEffect>,
}

/// Orchestrates pile -> focus -> hand transitions. All input is dispatched
/// here regardless of what is on screen; eligibility is decided by the
/// current phase and identity checks against the pile top.
#[derive(Debug)]
pub struct BuildSession {
    pub table: Table,
    pub pile: Pile,
    pub hand: Hand,
    pub rules: BuildRules,
    rng: RngState,
    catalog_ids: Vec<u32>,
    phase: BuildPhase,
    focused: Option<HandleId>,
    script: VecDeque<TweenStep>,
    awaited: Option<AwaitedStep>,
}

impl BuildSession {
    pub fn new(catalog: &Catalog, rules: BuildRules, rng: RngState) -> Result<Self, SetupError> {
        if catalog.is_empty() {
            return Err(SetupError::EmptyCatalog);
        }
        let capacity = rules.hand_capacity;
        let mut session = Self {
            table: Table::default(),
            pile: Pile::default(),
            hand: Hand::new(capacity),
            rules,
            rng,
            catalog_ids: catalog.ids(),
            phase: BuildPhase::ReadyToDraw,
            focused: None,
            script: VecDeque::new(),
            awaited: None,
        };
        session.deal_pile();
        Ok(session)
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn focused(&self) -> Option<HandleId> {
        self.focused
    }

    pub fn is_built(&self) -> bool {
        self.phase == BuildPhase::Built
    }

    pub fn can_draw(&self) -> bool {
        self.phase == BuildPhase::ReadyToDraw && !self.pile.is_empty() && !self.hand.is_full()
    }

    /// Persisted card tags in commit order.
    pub fn deck_tags(&self) -> Vec<String> {
        self.hand
            .slots()
            .iter()
            .filter_map(|&id| self.table.get(id).map(|handle| handle.tag.clone()))
            .collect()
    }

    /// A click landed on a specific card handle.
    pub fn on_card_clicked(
        &mut self,
        clicked: HandleId,
        animator: &mut dyn Animator,
        events: &mut EventBus,
    ) {
        match self.phase {
            BuildPhase::ReadyToDraw => {
                // Only the current pile top is interactable.
                if Some(clicked) != self.pile.top() {
                    return;
                }
                if self.hand.is_full() || self.pile.is_empty() {
                    return;
                }
                self.start_draw(animator, events);
            }
            BuildPhase::Focusing { can_finish: true } => self.start_commit(animator, events),
            _ => {}
        }
    }

    /// A click landed anywhere else. Confirms the focused card.
    pub fn on_confirm(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        if self.phase == (BuildPhase::Focusing { can_finish: true }) {
            self.start_commit(animator, events);
        }
    }

    /// Per-frame tick. Arms `can_finish` the frame after the focus
    /// animation settles, so the input that opened focus can never also
    /// close it. Call before the animation tick each frame.
    pub fn tick(&mut self) {
        if let BuildPhase::Focusing { can_finish } = &mut self.phase {
            *can_finish = true;
        }
    }

    /// Completion callback from the animation port. Ids that do not match
    /// the awaited script step (hand re-layout tweens) are ignored.
    pub fn on_tween_complete(
        &mut self,
        id: TweenId,
        animator: &mut dyn Animator,
        events: &mut EventBus,
    ) {
        let Some(awaited) = self.awaited else {
            return;
        };
        if awaited.tween != id {
            return;
        }
        self.awaited = None;
        let Some(moving) = self.moving_handle() else {
            return;
        };
        if let Some(handle) = self.table.get_mut(moving) {
            handle.transform = awaited.to;
            if let Some(StepEffect::FlipFaceUp) = awaited.effect {
                handle.face = Face::Up;
            }
        }
        self.issue_next(animator, events);
    }

    /// Discard the session: clears pile, hand and all runtime handles,
    /// redraws and reshuffles the pile, and returns to `ReadyToDraw`.
    pub fn reset(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        for id in self.table.ids() {
            animator.cancel(id);
        }
        self.table.clear();
        self.pile.clear();
        self.hand.clear();
        self.script.clear();
        self.awaited = None;
        self.focused = None;
        self.deal_pile();
        self.phase = BuildPhase::ReadyToDraw;
        events.push(Event::SessionReset);
    }

    fn deal_pile(&mut self) {
        let drawn = self
            .rng
            .draw_subset(&self.catalog_ids, self.rules.pile_draw);
        for (index, card) in drawn.into_iter().enumerate() {
            let pos = self.rules.pile_origin + self.rules.pile_step * index as f32;
            let id = self.table.spawn(card, Face::Down, Transform::at(pos));
            self.pile.push(id);
        }
    }

    fn moving_handle(&self) -> Option<HandleId> {
        match self.phase {
            BuildPhase::Animating(PendingMove::DrawToFocus { handle })
            | BuildPhase::Animating(PendingMove::CommitToHand { handle }) => Some(handle),
            _ => None,
        }
    }

    fn start_draw(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        let Some(handle) = self.pile.pop_top() else {
            return;
        };
        let Some(card) = self.table.get(handle) else {
            return;
        };
        let tag = card.tag.clone();
        let current = card.transform;
        let lifted = Transform {
            pos: current.pos + Vec2::new(0.0, -self.rules.lift_height),
            ..current
        };
        let focus = self.rules.focus_anchor;
        // The face flip lands partway through the travel, so the travel is
        // issued in two halves with the flip between them.
        let midway = lifted.lerp(focus, 0.5);
        let half_travel = self.rules.travel_duration / 2.0;
        self.script = VecDeque::from([
            TweenStep {
                to: lifted,
                duration: self.rules.lift_duration,
                effect: None,
            },
            TweenStep {
                to: midway,
                duration: half_travel,
                effect: Some(StepEffect::FlipFaceUp),
            },
            TweenStep {
                to: focus,
                duration: half_travel,
                effect: None,
            },
        ]);
        self.phase = BuildPhase::Animating(PendingMove::DrawToFocus { handle });
        events.push(Event::CardDrawn {
            tag,
            pile_left: self.pile.len(),
        });
        self.issue_next(animator, events);
    }

    fn start_commit(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        let Some(handle) = self.focused.take() else {
            return;
        };
        self.script = VecDeque::from([TweenStep {
            to: Transform::at(self.rules.hand_pivot),
            duration: self.rules.settle_duration,
            effect: None,
        }]);
        self.phase = BuildPhase::Animating(PendingMove::CommitToHand { handle });
        self.issue_next(animator, events);
    }

    fn issue_next(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        let Some(handle) = self.moving_handle() else {
            return;
        };
        match self.script.pop_front() {
            Some(step) => {
                let from = self
                    .table
                    .get(handle)
                    .map(|card| card.transform)
                    .unwrap_or_default();
                let tween = animator.tween(handle, from, step.to, step.duration);
                self.awaited = Some(AwaitedStep {
                    tween,
                    to: step.to,
                    effect: step.effect,
                });
            }
            None => self.finish_move(animator, events),
        }
    }

    fn finish_move(&mut self, animator: &mut dyn Animator, events: &mut EventBus) {
        match self.phase {
            BuildPhase::Animating(PendingMove::DrawToFocus { handle }) => {
                self.focused = Some(handle);
                self.phase = BuildPhase::Focusing { can_finish: false };
                if let Some(card) = self.table.get(handle) {
                    events.push(Event::CardFocused {
                        tag: card.tag.clone(),
                    });
                }
            }
            BuildPhase::Animating(PendingMove::CommitToHand { handle }) => {
                self.hand.push(handle);
                if let Some(card) = self.table.get(handle) {
                    events.push(Event::CardCommitted {
                        tag: card.tag.clone(),
                        hand: self.hand.len(),
                        capacity: self.hand.capacity(),
                    });
                }
                self.relayout_hand(animator);
                if self.hand.is_full() {
                    self.phase = BuildPhase::Built;
                    events.push(Event::DeckCompleted {
                        tags: self.deck_tags(),
                    });
                } else {
                    self.phase = BuildPhase::ReadyToDraw;
                }
            }
            _ => {}
        }
    }

    /// Re-send every hand slot toward its arc pose. Completions of these
    /// tweens are cosmetic and carry no state transition.
    fn relayout_hand(&mut self, animator: &mut dyn Animator) {
        let slots = arc_slots(self.hand.len(), self.rules.hand_pivot, &self.rules.layout);
        for (slot, &handle) in slots.iter().zip(self.hand.slots()) {
            let Some(card) = self.table.get(handle) else {
                continue;
            };
            let to = Transform {
                pos: slot.pos,
                scale: 1.0,
                rot: slot.rot,
            };
            animator.tween(handle, card.transform, to, self.rules.settle_duration);
        }
    }
}
