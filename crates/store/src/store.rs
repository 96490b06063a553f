use crate::{decode_root, DeckRecord, RemoteTransport, StoreRoot, TransportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("encode deck document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Loads, normalizes, merges and persists per-user deck collections
/// against a single shared remote document.
///
/// `append_deck` is a read-modify-write with no conflict detection: two
/// concurrent writers race and the last one wins. The source system
/// accepts this and so does this one.
#[derive(Debug)]
pub struct DeckStore<T: RemoteTransport> {
    transport: T,
}

impl<T: RemoteTransport> DeckStore<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch the latest remote document. Unparseable or empty bodies
    /// yield an empty document; only transport failures surface.
    pub fn load_root(&self) -> Result<StoreRoot, StoreError> {
        let body = self.transport.fetch_latest()?;
        let root = decode_root(&body);
        tracing::debug!(users = root.users.len(), "loaded deck store root");
        Ok(root)
    }

    /// Normalize and overwrite the whole remote document.
    pub fn save_root(&self, mut root: StoreRoot) -> Result<(), StoreError> {
        root.normalize();
        let body = serde_json::to_string(&root)?;
        self.transport.overwrite(&body)?;
        tracing::debug!(users = root.users.len(), "saved deck store root");
        Ok(())
    }

    /// Append one deck to a user, creating the user record if absent.
    /// `cards` is expected to be capacity-length; that is the caller's
    /// responsibility.
    pub fn append_deck(&self, user_id: &str, cards: Vec<String>) -> Result<(), StoreError> {
        let mut root = self.load_root()?;
        root.user_mut_or_create(user_id)
            .decks
            .push(DeckRecord { cards });
        self.save_root(root)
    }

    /// The ordered decks saved for `user_id`, empty if the user is
    /// absent.
    pub fn decks_for_user(&self, user_id: &str) -> Result<Vec<DeckRecord>, StoreError> {
        let root = self.load_root()?;
        Ok(root
            .user(user_id)
            .map(|user| user.decks.clone())
            .unwrap_or_default())
    }
}
