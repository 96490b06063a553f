use deckforge_core::{
    BuildPhase, BuildRules, BuildSession, Catalog, CardRecord, EventBus, RngState, Tweens,
};

fn catalog() -> Catalog {
    let records = (1..=20u32)
        .map(|id| CardRecord {
            id,
            name: format!("Card {id}"),
            cost: id % 5,
            text: format!("Effect text {id}"),
            stats: format!("{}/{}", id % 4, id % 3),
            art: format!("art/{id}.png"),
        })
        .collect();
    Catalog::from_records(records).expect("catalog")
}

fn pump(session: &mut BuildSession, tweens: &mut Tweens, events: &mut EventBus) {
    for _ in 0..100_000 {
        session.tick();
        if tweens.is_idle() {
            return;
        }
        for id in tweens.tick(1.0 / 60.0, &mut session.table) {
            session.on_tween_complete(id, tweens, events);
        }
    }
    panic!("animations never settled");
}

#[test]
fn full_session_builds_a_persistable_deck() {
    let catalog = catalog();
    let mut session = BuildSession::new(
        &catalog,
        BuildRules::default(),
        RngState::from_seed(0xC0FFEE),
    )
    .expect("session");
    let mut tweens = Tweens::new();
    let mut events = EventBus::default();

    while !session.is_built() {
        let top = session.pile.top().expect("pile never empties first");
        session.on_card_clicked(top, &mut tweens, &mut events);
        pump(&mut session, &mut tweens, &mut events);
        session.on_confirm(&mut tweens, &mut events);
        pump(&mut session, &mut tweens, &mut events);
    }

    assert_eq!(session.phase(), BuildPhase::Built);
    let tags = session.deck_tags();
    assert_eq!(tags.len(), session.rules.hand_capacity);
    // Every committed tag resolves back through the catalog.
    for tag in &tags {
        catalog.by_tag(tag).expect("tag resolves");
    }
    // Commit order is preserved and free of duplicates.
    let mut unique = tags.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), tags.len());

    // A post-save reset yields a fresh, full-size session.
    session.reset(&mut tweens, &mut events);
    assert_eq!(session.phase(), BuildPhase::ReadyToDraw);
    assert_eq!(session.pile.len(), session.rules.pile_draw);
    assert!(session.hand.is_empty());
}

#[test]
fn hand_cards_fan_symmetrically_as_they_arrive() {
    let catalog = catalog();
    let mut session = BuildSession::new(
        &catalog,
        BuildRules::default(),
        RngState::from_seed(42),
    )
    .expect("session");
    let mut tweens = Tweens::new();
    let mut events = EventBus::default();

    for commits in 1..=3usize {
        let top = session.pile.top().expect("pile");
        session.on_card_clicked(top, &mut tweens, &mut events);
        pump(&mut session, &mut tweens, &mut events);
        session.on_confirm(&mut tweens, &mut events);
        pump(&mut session, &mut tweens, &mut events);

        assert_eq!(session.hand.len(), commits);
        let rots: Vec<f32> = session
            .hand
            .slots()
            .iter()
            .map(|&id| session.table.get(id).expect("live").transform.rot)
            .collect();
        // Tilt decreases monotonically across the fan (left end tilts
        // positive, right end negative) and mirrors about the center.
        for pair in rots.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        let mirrored: Vec<f32> = rots.iter().rev().map(|rot| -rot).collect();
        for (a, b) in rots.iter().zip(&mirrored) {
            assert!((a - b).abs() < 1e-3);
        }
    }
}
