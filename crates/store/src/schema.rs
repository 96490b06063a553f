use serde::{Deserialize, Serialize};

/// One saved deck: card tags in hand order. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRecord {
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default)]
    pub decks: Vec<DeckRecord>,
}

/// The full remote payload. Fetched fresh on every load, mutated in
/// memory, and written back whole: the store has no partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreRoot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl StoreRoot {
    pub fn user(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.user_id == user_id)
    }

    pub fn user_mut_or_create(&mut self, user_id: &str) -> &mut UserRecord {
        let index = match self.users.iter().position(|user| user.user_id == user_id) {
            Some(index) => index,
            None => {
                self.users.push(UserRecord {
                    user_id: user_id.to_string(),
                    decks: Vec::new(),
                });
                self.users.len() - 1
            }
        };
        &mut self.users[index]
    }

    /// Idempotent repair: merge duplicate user records into the first
    /// occurrence, concatenating decks in encounter order, so no two
    /// records share an identifier.
    pub fn normalize(&mut self) {
        let mut merged: Vec<UserRecord> = Vec::with_capacity(self.users.len());
        for user in self.users.drain(..) {
            match merged.iter_mut().find(|kept| kept.user_id == user.user_id) {
                Some(kept) => kept.decks.extend(user.decks),
                None => merged.push(user),
            }
        }
        self.users = merged;
    }
}
