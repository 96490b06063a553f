use crate::{DeckRecord, StoreRoot, UserRecord};
use serde::Deserialize;

// Permissive mirrors of the wire shapes. Whatever arrives is repaired
// into the strict schema types: absent collections become empty, deck
// records without a card array are dropped, never padded.

#[derive(Debug, Deserialize)]
struct RawRoot {
    #[serde(default)]
    users: Option<Vec<RawUser>>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    user_id: String,
    #[serde(default)]
    decks: Option<Vec<RawDeck>>,
}

#[derive(Debug, Deserialize)]
struct RawDeck {
    #[serde(default)]
    cards: Option<Vec<String>>,
}

/// The backend wraps stored payloads in an envelope; documents pasted by
/// hand during setup arrive bare.
#[derive(Debug, Deserialize)]
struct Envelope {
    record: RawRoot,
}

fn repair(raw: RawRoot) -> StoreRoot {
    let users = raw
        .users
        .unwrap_or_default()
        .into_iter()
        .map(|user| UserRecord {
            user_id: user.user_id,
            decks: user
                .decks
                .unwrap_or_default()
                .into_iter()
                .filter_map(|deck| deck.cards.map(|cards| DeckRecord { cards }))
                .collect(),
        })
        .collect();
    let mut root = StoreRoot { users };
    root.normalize();
    root
}

fn decode_wrapped(body: &str) -> Option<RawRoot> {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .map(|envelope| envelope.record)
}

fn decode_bare(body: &str) -> Option<RawRoot> {
    serde_json::from_str::<RawRoot>(body).ok()
}

/// Candidate decoders tried in order; the first success wins. A body no
/// candidate accepts yields an empty document rather than an error.
const DECODERS: &[(&str, fn(&str) -> Option<RawRoot>)] =
    &[("wrapped", decode_wrapped), ("bare", decode_bare)];

pub fn decode_root(body: &str) -> StoreRoot {
    for &(kind, decode) in DECODERS {
        if let Some(raw) = decode(body) {
            tracing::debug!(kind, "decoded remote deck document");
            return repair(raw);
        }
    }
    tracing::warn!("remote deck document unreadable, starting from empty");
    StoreRoot::default()
}
